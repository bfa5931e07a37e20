//! Binary entrypoint for fontdist

fn main() {
    if let Err(err) = fontdist_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
