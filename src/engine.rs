use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::attributes::{
    AttributeStore, OptionNameMap, ZoneChecker, PLACE_CATEGORY, PLACE_TYPE, STREET,
    STREET_NUMBER, STREET_REF, ZONE, ZONE_NAME,
};
use crate::comparison::{contains_exact, contains_folded, is_all_lowercase, title_case, value_text};
use crate::expression::Node;
use crate::filter::FilterSpec;

/// Keys whose all-lowercase values are shown title-cased.
const TITLE_CASED: [&str; 3] = [ZONE_NAME, PLACE_TYPE, PLACE_CATEGORY];

/// Fragments resolved during one evaluation, plus the positions the
/// compiler needs for street spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionState {
    pub fragments: Vec<String>,
    pub position_counter: usize,
    pub street_position: Option<usize>,
    pub street_number_position: Option<usize>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, key: &str, text: String) {
        let position = self.position_counter;
        // Latest wins, so a number pairs with the street recorded after it.
        if key == STREET || key == STREET_REF {
            self.street_position = Some(position);
        } else if key == STREET_NUMBER {
            self.street_number_position = Some(position);
        }
        self.position_counter += 1;
        self.fragments.push(text);
    }
}

/// Resolves option tokens against the collaborators and walks parse trees.
pub struct Engine<'a> {
    attributes: &'a dyn AttributeStore,
    zone: &'a dyn ZoneChecker,
    options: &'a dyn OptionNameMap,
}

impl<'a> Engine<'a> {
    pub fn new(
        attributes: &'a dyn AttributeStore,
        zone: &'a dyn ZoneChecker,
        options: &'a dyn OptionNameMap,
    ) -> Self {
        Self {
            attributes,
            zone,
            options,
        }
    }

    /// Appends every fragment `node` resolves to, in order.
    pub fn evaluate<'s>(
        &'s self,
        node: &'s Node,
        state: &'s mut ResolutionState,
    ) -> BoxFuture<'s, ()> {
        async move {
            match node {
                Node::Sequence(nodes) => {
                    for child in nodes {
                        self.evaluate(child, state).await;
                    }
                }
                Node::Identifier(option) => {
                    self.resolve(option, &FilterSpec::default(), state).await;
                }
                Node::Filter { option, filter } => {
                    self.resolve(option, filter, state).await;
                }
                Node::Fallback {
                    primary,
                    alternative,
                } => {
                    let resolved = self.resolve(&primary.option, &primary.filter, state).await;
                    if !resolved {
                        debug!(?alternative, "taking fallback");
                        self.evaluate(alternative, state).await;
                    }
                }
            }
        }
        .boxed()
    }

    /// Resolves one option under `filter`, recording it in `state` when it
    /// produces text. Returns whether it did.
    pub async fn resolve(
        &self,
        option: &str,
        filter: &FilterSpec,
        state: &mut ResolutionState,
    ) -> bool {
        let option = option.trim().to_lowercase();
        let Some(key) = self.options.canonical_key(&option) else {
            debug!(option = %option, "unmapped option");
            return false;
        };
        let Some(raw) = self.current_value(key).await else {
            debug!(option = %option, key, "no value");
            return false;
        };
        if !self.accepts(&raw, filter).await {
            debug!(option = %option, value = %raw, ?filter, "filtered out");
            return false;
        }

        let titled = if TITLE_CASED.contains(&key) && is_all_lowercase(&raw) {
            title_case(&raw)
        } else {
            raw
        };
        let text = titled.trim();
        if text.is_empty() {
            return false;
        }
        debug!(option = %option, key, value = text, "resolved");
        state.record(key, text.to_string());
        true
    }

    /// The attribute's non-blank value, with zone keys gated on zone membership.
    async fn current_value(&self, key: &str) -> Option<String> {
        let value = value_text(self.attributes.get(key))?;
        if (key == ZONE || key == ZONE_NAME) && !self.zone.in_zone().await {
            return None;
        }
        Some(value)
    }

    async fn other_value(&self, option: &str) -> Option<String> {
        let key = self.options.canonical_key(option)?;
        self.current_value(key).await
    }

    async fn accepts(&self, value: &str, filter: &FilterSpec) -> bool {
        if !filter.include.is_empty() && !contains_folded(&filter.include, value) {
            return false;
        }
        if !filter.exclude.is_empty() && contains_folded(&filter.exclude, value) {
            return false;
        }
        for (other, allowed) in &filter.include_attr {
            match self.other_value(other).await {
                Some(v) if contains_exact(allowed, &v) => {}
                _ => return false,
            }
        }
        for (other, denied) in &filter.exclude_attr {
            if let Some(v) = self.other_value(other).await {
                if contains_exact(denied, &v) {
                    return false;
                }
            }
        }
        true
    }
}
