//! Placeholder substitution over component code.
//!
//! Substitution is purely textual: placeholders are matched literally and
//! replacement text is inserted as-is, so `$` or `\` in a name never get
//! interpreted. Occurrences inside string literals are replaced too.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Replaced with the run's version tag, when one is given.
pub const VERSION_PLACEHOLDER: &str = "{{version}}";
/// Replaced with the component name.
pub const NAME_PLACEHOLDER: &str = "{{name}}";
/// Replaced with the output file name.
pub const GHUSER_NAME_PLACEHOLDER: &str = "{{ghuser_name}}";

fn literal(placeholder: &str) -> Regex {
    Regex::new(&regex::escape(placeholder)).unwrap_or_else(|e| {
        unreachable!("escaped literal {placeholder:?} failed to compile: {e}")
    })
}

static VERSION: LazyLock<Regex> = LazyLock::new(|| literal(VERSION_PLACEHOLDER));
static NAME: LazyLock<Regex> = LazyLock::new(|| literal(NAME_PLACEHOLDER));
static GHUSER_NAME: LazyLock<Regex> = LazyLock::new(|| literal(GHUSER_NAME_PLACEHOLDER));

/// Values substituted into component code.
#[derive(Clone, Copy, Debug)]
pub struct TemplateValues<'a> {
    /// Version tag; `None` leaves `{{version}}` untouched.
    pub version: Option<&'a str>,
    /// Component name.
    pub name: &'a str,
    /// File name the host will know the component by (e.g. `Add.ghuser`).
    pub ghuser_name: &'a str,
}

/// Replaces every placeholder occurrence in `code`.
pub fn replace_templates(code: &str, values: &TemplateValues<'_>) -> String {
    let code = match values.version {
        Some(version) => VERSION.replace_all(code, NoExpand(version)),
        None => code.into(),
    };
    let code = NAME.replace_all(&code, NoExpand(values.name)).into_owned();
    GHUSER_NAME
        .replace_all(&code, NoExpand(values.ghuser_name))
        .into_owned()
}
