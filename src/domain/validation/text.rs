//! Text cleanup for generated narrative strings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::modules::ModuleId;

static TEMPLATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^{}]*\}\}|\{[^{}\n]*\}").expect("valid regex"));

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*insert[^\]]*\]|\[\s*placeholder\s*\]|\blorem ipsum\b[^.]*\.?")
        .expect("valid regex")
});

/// Uppercase-only markers; lowercase "xxx" or "tbd" in prose are left alone.
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(TBD|XXX)\b").expect("valid regex"));

static RUN_OF_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +([.,;:!?])").expect("valid regex"));

/// Module ids that cannot appear in prose by accident.
static MODULE_ID_PATTERNS: Lazy<Vec<(ModuleId, Regex)>> = Lazy::new(|| {
    ModuleId::ALL
        .iter()
        .filter(|id| id.as_str().contains('_'))
        .map(|&id| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(id.as_str()));
            (id, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// Mis-decoded UTF-8 sequences and invisible characters, longest first.
const ENCODING_ARTIFACTS: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    ("\u{e2}\u{20ac}\u{2dc}", "'"),
    ("\u{e2}\u{20ac}\u{153}", "\""),
    ("\u{e2}\u{20ac}\u{9d}", "\""),
    ("\u{e2}\u{20ac}\u{201c}", "-"),
    ("\u{e2}\u{20ac}\u{201d}", "-"),
    ("\u{e2}\u{20ac}\u{a6}", "..."),
    ("\u{c2}\u{a0}", " "),
    ("\u{c2}", ""),
    ("\u{fffd}", ""),
    ("\u{200b}", ""),
    ("\u{200c}", ""),
    ("\u{200d}", ""),
    ("\u{feff}", ""),
];

/// What a single scrub found and removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrubReport {
    pub template_tokens: Vec<String>,
    pub leaked_module_ids: Vec<ModuleId>,
    /// Placeholder markers or encoding artifacts were removed.
    pub artifacts_removed: bool,
}

impl ScrubReport {
    pub fn changed(&self) -> bool {
        self.artifacts_removed
            || !self.template_tokens.is_empty()
            || !self.leaked_module_ids.is_empty()
    }
}

/// Cleans one string in place.
///
/// Template tokens are stripped and leaked module ids are replaced by their
/// display names; both are reported so the caller can treat them as fatal.
pub fn scrub_text(text: &mut String, detect_module_ids: bool) -> ScrubReport {
    let mut report = ScrubReport::default();
    let mut current = text.clone();

    for (broken, fixed) in ENCODING_ARTIFACTS {
        if current.contains(broken) {
            current = current.replace(broken, fixed);
            report.artifacts_removed = true;
        }
    }

    if PLACEHOLDER.is_match(&current) || MARKER.is_match(&current) {
        current = PLACEHOLDER.replace_all(&current, "").into_owned();
        current = MARKER.replace_all(&current, "").into_owned();
        report.artifacts_removed = true;
    }

    report.template_tokens = TEMPLATE_TOKEN
        .find_iter(&current)
        .map(|m| m.as_str().to_string())
        .collect();
    // Stripping "{name}" out of "{ {name} }" leaves "{ }" behind.
    while TEMPLATE_TOKEN.is_match(&current) {
        current = TEMPLATE_TOKEN.replace_all(&current, "").into_owned();
    }

    if detect_module_ids {
        for (id, pattern) in MODULE_ID_PATTERNS.iter() {
            if pattern.is_match(&current) {
                report.leaked_module_ids.push(*id);
                current = pattern.replace_all(&current, id.display_name()).into_owned();
            }
        }
    }

    if report.changed() {
        current = RUN_OF_SPACES.replace_all(&current, " ").into_owned();
        current = SPACE_BEFORE_PUNCT.replace_all(&current, "$1").into_owned();
        *text = current.trim().to_string();
    }
    report
}
