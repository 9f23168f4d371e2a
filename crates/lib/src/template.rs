//! # Placeholder Substitution
//!
//! Templates use `{name}` placeholders. Substitution is a single pass over the
//! template text, so values that themselves contain `{...}` are inserted verbatim.

use crate::errors::PromptError;
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Returns the distinct placeholder names of `template`, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps["name"];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Fills every placeholder of `template` from `values`.
///
/// Extra entries in `values` are ignored. A placeholder without a value is an error.
pub fn fill(template: &str, values: &HashMap<String, String>) -> Result<String, PromptError> {
    if let Some(missing) = placeholders(template)
        .into_iter()
        .find(|name| !values.contains_key(name))
    {
        return Err(PromptError::MissingTemplateVariable(missing));
    }

    let filled = PLACEHOLDER.replace_all(template, |caps: &regex::Captures| {
        values[&caps["name"]].clone()
    });
    Ok(filled.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_deduplicated_in_order() {
        let names = placeholders("{title} / {input} / {title}");
        assert_eq!(names, vec!["title".to_string(), "input".to_string()]);
    }

    #[test]
    fn non_identifier_braces_are_left_alone() {
        assert!(placeholders("금113,560원 {} { spaced } {1x}").is_empty());
    }
}
