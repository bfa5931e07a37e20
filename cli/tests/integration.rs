use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn write_font(root: &Path, rel: &str) {
    let path = root.join("data").join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, rel.as_bytes()).expect("write font");
}

fn fontdist(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fontdist"))
        .current_dir(cwd)
        .env_remove("FONTDIST_PUBLIC_URL")
        .args(args)
        .output()
        .expect("run fontdist")
}

#[test]
fn bare_invocation_builds_data_into_dist() {
    let tmp = tempdir().expect("tempdir");
    write_font(tmp.path(), "Acme/Acme-Bold.ttf");
    write_font(tmp.path(), "Acme/Acme-Bold.woff2");
    fs::write(tmp.path().join("CNAME"), b"fonts.example.com").expect("cname");

    let output = fontdist(tmp.path(), &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let dist = tmp.path().join("dist");
    for rel in [
        "files/Acme/Acme-Bold.ttf",
        "files/Acme/Acme-Bold.woff2",
        "css/Acme.css",
        "css/all.css",
        "fonts.json",
        "index.html",
        "console/index.html",
        "CNAME",
    ] {
        assert!(dist.join(rel).is_file(), "missing {rel}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 families, 1 variants, 2 font files"), "stdout: {stdout}");
}

#[test]
fn build_json_report() {
    let tmp = tempdir().expect("tempdir");
    write_font(tmp.path(), "Acme/Acme-Light.ttf");
    write_font(tmp.path(), "Beta/Beta-Italic.woff2");

    let output = fontdist(
        tmp.path(),
        &[
            "build",
            "--output",
            "public",
            "--public-url",
            "https://fonts.example.com/",
            "--jobs",
            "1",
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["families"], 2);
    assert_eq!(report["variants"], 2);
    assert_eq!(report["files_copied"], 2);

    let index = fs::read_to_string(tmp.path().join("public/index.html")).expect("index");
    assert!(index.contains("const PUBLIC_URL = \"https://fonts.example.com\";"));
}

#[test]
fn missing_input_exits_non_zero() {
    let tmp = tempdir().expect("tempdir");

    let output = fontdist(tmp.path(), &["build"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input directory does not exist"), "stderr: {stderr}");
}

#[test]
fn invalid_public_url_is_rejected() {
    let tmp = tempdir().expect("tempdir");
    write_font(tmp.path(), "Acme/Acme.ttf");

    let output = fontdist(tmp.path(), &["build", "--public-url", "fonts.example.com"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn classify_prints_tab_separated_rows() {
    let tmp = tempdir().expect("tempdir");

    let output = fontdist(
        tmp.path(),
        &["classify", "Acme-ExtraBold.woff2", "Acme-700-Italic", "Kit"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "Acme-ExtraBold\t800\tnormal",
            "Acme-700-Italic\t700\titalic",
            "Kit\t400\tnormal",
        ]
    );
}
