//! `{placeholder}` substitution for agent and task text
//!
//! Only `{identifier}` is recognized. Anything else in braces, such as a
//! JSON snippet or `{ }`, is copied through unchanged.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Named values substituted at kickoff
pub type Inputs = BTreeMap<String, String>;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex")
});

/// Placeholder names in `text`, in order of appearance (duplicates kept)
#[must_use]
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Substitute every placeholder in `text` from `inputs`
pub fn render(text: &str, inputs: &Inputs) -> Result<String> {
    if let Some(missing) = placeholders(text)
        .into_iter()
        .find(|name| !inputs.contains_key(*name))
    {
        return Err(Error::MissingInput {
            name: missing.to_string(),
        });
    }

    Ok(PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            inputs.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned())
}

/// Build [`Inputs`] from pairs
pub fn inputs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Inputs
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let vars = inputs([("customer", "Gister App"), ("person", "Ike")]);
        let out = render("{person} from {customer} asked; {customer} matters.", &vars).unwrap();
        assert_eq!(out, "Ike from Gister App asked; Gister App matters.");
    }

    #[test]
    fn test_missing_input() {
        let err = render("Plan content on {topic}", &Inputs::new()).unwrap_err();
        assert!(matches!(err, Error::MissingInput { name } if name == "topic"));
    }

    #[test]
    fn test_non_identifiers_untouched() {
        let text = r#"Return {"a": 1} or { } or {1st}"#;
        assert_eq!(render(text, &Inputs::new()).unwrap(), text);
        assert!(placeholders(text).is_empty());
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(
            placeholders("{customer} {inquiry} {customer}"),
            vec!["customer", "inquiry", "customer"]
        );
    }
}
