use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| compile(r"[^A-Za-z0-9_-]+"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| compile(r"--+"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("invalid built-in slug pattern {pattern:?}: {err}"),
    }
}

/// Turn a product title into a URL-safe slug.
///
/// `"Fjallraven Backpack"` becomes `"fjallraven-backpack"`, `"Salt & Pepper"`
/// becomes `"salt-and-pepper"`. Characters outside `[a-z0-9_-]` are dropped
/// after lower-casing, so non-ASCII letters vanish rather than being
/// transliterated.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = WHITESPACE.replace_all(lowered.trim(), "-");
    let anded = dashed.replace('&', "-and-");
    let stripped = NON_WORD.replace_all(&anded, "");
    HYPHEN_RUNS.replace_all(&stripped, "-").into_owned()
}
