use std::collections::BTreeSet;

use serde_json::Value;

/// Absent, JSON null and the empty string are blank. `0` and `false` are not.
pub fn is_blank_value(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Text form of a stored attribute; blank values have none.
pub fn value_text(v: Option<&Value>) -> Option<String> {
    if is_blank_value(v) {
        return None;
    }
    match v? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Case-insensitive membership against an already lower-cased set.
pub fn contains_folded(set: &BTreeSet<String>, value: &str) -> bool {
    set.contains(&value.trim().to_lowercase())
}

/// Membership of the value exactly as stored.
pub fn contains_exact(set: &BTreeSet<String>, value: &str) -> bool {
    set.contains(value)
}

pub fn is_all_lowercase(s: &str) -> bool {
    s == s.to_lowercase()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest,
/// so `fast_food` becomes `Fast_Food` and `o'neil` becomes `O'Neil`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
