//! Weight and style inference from font file names
//!
//! Every base name gets a classification; unmatched names fall back to
//! `400`/`normal`. The rules are a best-effort heuristic: a family called
//! `Route 500` will be classified as weight 500 whatever its real weight is.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weight used when neither a numeric token nor a keyword matches.
pub const DEFAULT_WEIGHT: u16 = 400;

/// Keyword groups, checked in order; the first substring hit wins.
///
/// The extra/ultra-bold group sits ahead of plain `bold`, otherwise every
/// `ExtraBold` would come out as 700.
const WEIGHT_KEYWORDS: &[(&[&str], u16)] = &[
    (&["thin", "hairline"], 100),
    (
        &[
            "extralight",
            "ultralight",
            "xlight",
            "extra-light",
            "ultra-light",
            "extra_light",
            "ultra_light",
            "lite",
            "light",
        ],
        300,
    ),
    (&["book", "regular", "normal"], 400),
    (&["medium"], 500),
    (
        &[
            "semibold",
            "demibold",
            "semi-bold",
            "demi-bold",
            "semi_bold",
            "demi_bold",
            "demi",
        ],
        600,
    ),
    (
        &[
            "extrabold",
            "ultrabold",
            "extra-bold",
            "ultra-bold",
            "extra_bold",
            "ultra_bold",
        ],
        800,
    ),
    (&["bold"], 700),
    (&["heavy", "black"], 900),
];

/// CSS `font-style` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight/style pair inferred for one base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub weight: u16,
    pub style: FontStyle,
}

/// Classify a base name (file name without extension).
pub fn classify(base: &str) -> Classification {
    Classification {
        weight: guess_weight(base),
        style: guess_style(base),
    }
}

/// Guess the CSS weight: numeric token first, then keywords, then 400.
pub fn guess_weight(base: &str) -> u16 {
    if let Some(weight) = numeric_weight(base) {
        return weight;
    }

    let low = base.to_lowercase();
    WEIGHT_KEYWORDS
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| low.contains(k)))
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_WEIGHT)
}

/// Guess the CSS style from `italic`/`oblique` or a standalone `it` token.
pub fn guess_style(base: &str) -> FontStyle {
    let low = base.to_lowercase();
    if low.contains("italic") || low.contains("oblique") || it_token().is_match(&low) {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}

fn numeric_weight(base: &str) -> Option<u16> {
    numeric_token()
        .captures(base)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn numeric_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^0-9])(100|200|300|400|500|600|700|800|900)(?:[^0-9]|$)")
            .expect("weight token pattern")
    })
}

fn it_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[^a-z])it(?:[^a-z]|$)").expect("italic token pattern"))
}
