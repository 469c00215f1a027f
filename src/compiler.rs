use crate::engine::ResolutionState;

const SEPARATOR: &str = ", ";

/// Joins resolved fragments into the final label.
///
/// A street number immediately followed by its street is joined with a
/// single space (`123 Main St`); every other pair uses `", "`. Passing
/// `street_spacing = false` always uses `", "`.
pub fn compile(state: &ResolutionState, street_spacing: bool) -> String {
    // The number is recorded one position before the street that follows it.
    let number_then_street = state.street_number_position.map(|n| n + 1);
    let mut out = String::new();
    for (i, fragment) in state.fragments.iter().enumerate() {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            let joined = street_spacing
                && state.street_position == Some(i)
                && number_then_street == Some(i);
            out.push_str(if joined { " " } else { SEPARATOR });
        }
        out.push_str(fragment);
    }
    out
}
