//! Static HTML pages that load `fonts.json` in the browser

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::SiteOptions;

const INDEX_CSS: &str = include_str!("../templates/index.css");
const INDEX_JS: &str = include_str!("../templates/index.js");
const CONSOLE_CSS: &str = include_str!("../templates/console.css");
const CONSOLE_JS: &str = include_str!("../templates/console.js");

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog. 1234567890";

/// Output-relative path of the catalog page.
pub const INDEX_PAGE: &str = "index.html";
/// Output-relative path of the preview console.
pub const CONSOLE_PAGE: &str = "console/index.html";

/// Catalog page: searchable family/variant listing with download links.
pub fn render_index(site: &SiteOptions) -> String {
    let body = html! {
        header {
            h1 { (site.title) }
            input id="q" placeholder="Search families or variants…";
            div class="topbar-links" {
                a href="./console/" { "Console" }
            }
        }
        main {
            div id="list" {}
        }
    };
    page(site, "Index", INDEX_CSS, body, INDEX_JS).into_string()
}

/// Console page: family/variant picker, live preview and usage snippet.
pub fn render_console(site: &SiteOptions) -> String {
    let body = html! {
        header {
            h1 { (site.title) " Console" }
            a href="../" { "← Index" }
        }
        main {
            div class="card" {
                div class="row" {
                    div {
                        label for="family" { "Family" }
                        select id="family" {}
                    }
                    div {
                        label for="variant" { "Variant (optional)" }
                        select id="variant" {}
                    }
                }
            }
            div class="card" {
                label for="sample" { "Sample text" }
                input id="sample" value=(SAMPLE_TEXT);
                div id="preview" class="preview" {}
            }
            div class="card" {
                label for="code" { "Usage" }
                textarea id="code" rows="8" readonly {}
                div style="margin-top:8px;" {
                    button class="btn" id="copy" { "Copy" }
                }
            }
        }
    };
    page(site, "Console", CONSOLE_CSS, body, CONSOLE_JS).into_string()
}

fn page(site: &SiteOptions, heading: &str, css: &str, body: Markup, js: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (site.title) " – " (heading) }
                @if let Some(url) = &site.public_url {
                    link rel="preconnect" href=(url);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (body)
                script {
                    "const PUBLIC_URL = "
                    (PreEscaped(script_literal(site.public_url.as_deref())))
                    ";\n"
                    (PreEscaped(js))
                }
            }
        }
    }
}

// JSON literal that cannot close the surrounding <script>.
fn script_literal(value: Option<&str>) -> String {
    serde_json::to_string(&value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}
