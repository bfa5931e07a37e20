//! `@font-face` generation; every URL is relative to the `css/` directory

use crate::copy::CopiedFiles;
use crate::discovery::FontVariant;

/// Directory (relative to the output root) holding generated stylesheets.
pub const CSS_DIR: &str = "css";

/// Catalog-wide stylesheet name inside [`CSS_DIR`].
pub const ALL_CSS: &str = "all.css";

/// Output-relative path of a family stylesheet.
pub fn family_css_path(family_key: &str) -> String {
    format!("{CSS_DIR}/{family_key}.css")
}

/// Escape `\` and `'` for a single-quoted CSS string.
pub fn escape_css_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render one `@font-face` rule, or `None` when the variant has no files.
pub fn render_font_face(
    family_name: &str,
    variant: &FontVariant,
    files: &CopiedFiles,
) -> Option<String> {
    let mut sources = Vec::with_capacity(2);
    if let Some(woff2) = &files.woff2 {
        sources.push(format!("url('{}') format('woff2')", css_url(woff2)));
    }
    if let Some(ttf) = &files.ttf {
        sources.push(format!("url('{}') format('truetype')", css_url(ttf)));
    }
    if sources.is_empty() {
        return None;
    }

    Some(format!(
        "@font-face {{\n  font-family: '{}';\n  src: {};\n  font-weight: {};\n  font-style: {};\n  font-display: swap;\n}}\n",
        escape_css_string(family_name),
        sources.join(", "),
        variant.weight,
        variant.style,
    ))
}

// Stylesheets live in css/, assets in files/.
fn css_url(asset: &str) -> String {
    escape_css_string(&format!("../{asset}"))
}

/// Accumulates rules for the current family and for the whole catalog.
#[derive(Debug, Default)]
pub struct CssBundle {
    family: String,
    all: String,
}

impl CssBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to both the family buffer and the catalog buffer.
    pub fn push_rule(&mut self, rule: &str) {
        self.family.push_str(rule);
        self.all.push_str(rule);
    }

    /// Hand over the current family's CSS and start a fresh family buffer.
    pub fn finish_family(&mut self) -> String {
        std::mem::take(&mut self.family)
    }

    pub fn all(&self) -> &str {
        &self.all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FontStyle;
    use crate::discovery::FilePair;

    fn bold() -> FontVariant {
        FontVariant {
            base: "Acme-Bold".into(),
            weight: 700,
            style: FontStyle::Normal,
            files: FilePair::default(),
        }
    }

    #[test]
    fn renders_woff2_before_truetype() {
        let files = CopiedFiles {
            woff2: Some("files/Acme/Acme-Bold.woff2".into()),
            ttf: Some("files/Acme/Acme-Bold.ttf".into()),
        };
        let rule = render_font_face("Acme", &bold(), &files).expect("rule");
        assert_eq!(
            rule,
            "@font-face {\n  font-family: 'Acme';\n  src: url('../files/Acme/Acme-Bold.woff2') format('woff2'), url('../files/Acme/Acme-Bold.ttf') format('truetype');\n  font-weight: 700;\n  font-style: normal;\n  font-display: swap;\n}\n"
        );
    }

    #[test]
    fn skips_variants_without_files() {
        assert!(render_font_face("Acme", &bold(), &CopiedFiles::default()).is_none());
    }

    #[test]
    fn escapes_family_names() {
        assert_eq!(escape_css_string(r"O'Neil\Sans"), r"O\'Neil\\Sans");
        let files = CopiedFiles {
            woff2: None,
            ttf: Some("files/Acme/Acme-Bold.ttf".into()),
        };
        let rule = render_font_face("Bob's", &bold(), &files).expect("rule");
        assert!(rule.contains("font-family: 'Bob\\'s';"));
    }

    #[test]
    fn bundle_keeps_catalog_across_families() {
        let mut bundle = CssBundle::new();
        bundle.push_rule("a\n");
        assert_eq!(bundle.finish_family(), "a\n");
        bundle.push_rule("b\n");
        assert_eq!(bundle.finish_family(), "b\n");
        assert_eq!(bundle.finish_family(), "");
        assert_eq!(bundle.all(), "a\nb\n");
    }
}
