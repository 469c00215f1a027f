use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::errors::{EvalError, Result};
use crate::parser::split_top_level;

/// Allow/deny lists narrowing which values an identifier accepts.
///
/// Values are stored lower-cased. Attribute predicates are keyed by the
/// lower-cased option token of the *other* attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub include_attr: BTreeMap<String, BTreeSet<String>>,
    pub exclude_attr: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
            && self.exclude.is_empty()
            && self.include_attr.is_empty()
            && self.exclude_attr.is_empty()
    }
}

/// Whether a list is an allow-list (`+` or no modifier) or a deny-list (`-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Include,
    Exclude,
}

/// Strips a leading `+`/`-` item and reports the mode it selects.
fn take_modifier<'a, I>(items: I) -> (Mode, Vec<&'a str>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut items = items.into_iter().map(str::trim).peekable();
    let mode = match items.peek() {
        Some(&"-") => {
            items.next();
            Mode::Exclude
        }
        Some(&"+") => {
            items.next();
            Mode::Include
        }
        _ => Mode::Include,
    };
    (mode, items.collect())
}

/// Parses the text between a filter's outer parentheses.
/// Malformed attribute predicates are skipped; the remaining items still apply.
pub fn parse_filter_body(body: &str) -> FilterSpec {
    let mut spec = FilterSpec::default();
    if body.trim().is_empty() {
        return spec;
    }
    let (mode, items) = take_modifier(split_top_level(body));
    for item in items.into_iter().filter(|item| !item.is_empty()) {
        if item.contains('(') {
            match parse_attribute_item(item) {
                Ok((attr, Mode::Include, values)) => {
                    spec.include_attr.insert(attr, values);
                }
                Ok((attr, Mode::Exclude, values)) => {
                    spec.exclude_attr.insert(attr, values);
                }
                Err(e) => warn!(item, error = %e, "skipping filter item"),
            }
            continue;
        }
        let value = item.to_lowercase();
        match mode {
            Mode::Include => spec.include.insert(value),
            Mode::Exclude => spec.exclude.insert(value),
        };
    }
    spec
}

/// Parses `attrname(modifier?, value, ...)`.
pub fn parse_attribute_item(item: &str) -> Result<(String, Mode, BTreeSet<String>)> {
    let (Some(open), Some(close)) = (item.find('('), item.find(')')) else {
        return Err(EvalError::MalformedAttributeFilter(item.to_string()));
    };
    if close < open || item.matches('(').count() > 1 || item.matches(')').count() > 1 {
        return Err(EvalError::MalformedAttributeFilter(item.to_string()));
    }
    let attr = item[..open].trim().to_lowercase();
    let (mode, values) = take_modifier(item[open + 1..close].split(','));
    let values = values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
        .collect();
    Ok((attr, mode, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_items_are_an_allow_list() {
        let spec = parse_filter_body("Work, home");
        assert_eq!(spec.include, set(&["work", "home"]));
        assert!(spec.exclude.is_empty());
    }

    #[test]
    fn minus_turns_the_list_into_a_deny_list() {
        let spec = parse_filter_body("-,work,home");
        assert_eq!(spec.exclude, set(&["work", "home"]));
        assert!(spec.include.is_empty());

        let spec = parse_filter_body("+, work");
        assert_eq!(spec.include, set(&["work"]));
    }

    #[test]
    fn attribute_predicates_sit_beside_plain_items() {
        let spec = parse_filter_body("type(restaurant,bar),home");
        assert_eq!(spec.include, set(&["home"]));
        assert_eq!(
            spec.include_attr,
            BTreeMap::from([("type".to_string(), set(&["restaurant", "bar"]))])
        );
        assert!(spec.exclude_attr.is_empty());
    }

    #[test]
    fn attribute_predicate_has_its_own_modifier() {
        let spec = parse_filter_body("-, unclassified, category(-, highway)");
        assert_eq!(spec.exclude, set(&["unclassified"]));
        assert_eq!(
            spec.exclude_attr,
            BTreeMap::from([("category".to_string(), set(&["highway"]))])
        );
    }

    #[test]
    fn doubled_parens_skip_only_that_item() {
        let spec = parse_filter_body("type((x)), home");
        assert_eq!(spec.include, set(&["home"]));
        assert!(spec.include_attr.is_empty());
    }

    #[test]
    fn empty_body_is_an_empty_filter() {
        assert!(parse_filter_body("  ").is_empty());
    }
}
