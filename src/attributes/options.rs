use std::collections::HashMap;
use std::sync::Arc;

use super::{PLACE_CATEGORY, PLACE_TYPE, STREET, STREET_NUMBER, STREET_REF, ZONE, ZONE_NAME};

/// Maps user-facing option tokens to canonical attribute keys.
pub trait OptionNameMap: Send + Sync {
    fn canonical_key(&self, token: &str) -> Option<&str>;
}

/// Case-insensitive option table, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    inner: Arc<HashMap<String, String>>,
}

const BUILTINS: &[(&str, &str)] = &[
    ("zone", ZONE),
    ("zone_name", ZONE_NAME),
    ("driving", "driving"),
    ("name", "place_name"),
    ("place_name", "place_name"),
    ("name_no_dupe", "place_name_no_dupe"),
    ("type", PLACE_TYPE),
    ("place_type", PLACE_TYPE),
    ("category", PLACE_CATEGORY),
    ("place_category", PLACE_CATEGORY),
    ("neighborhood", "neighbourhood"),
    ("neighbourhood", "neighbourhood"),
    ("place_neighbourhood", "neighbourhood"),
    ("place_neighborhood", "neighbourhood"),
    ("house_number", STREET_NUMBER),
    ("street_number", STREET_NUMBER),
    ("street", STREET),
    ("route_number", STREET_REF),
    ("street_ref", STREET_REF),
    ("city", "city"),
    ("city_clean", "city_clean"),
    ("postal_town", "postal_town"),
    ("county", "county"),
    ("state", "state_province"),
    ("region", "state_province"),
    ("state_province", "state_province"),
    ("state_abbr", "state_abbr"),
    ("country", "country"),
    ("country_code", "country_code"),
    ("postal_code", "postal_code"),
    ("formatted_address", "formatted_address"),
    ("formatted_place", "formatted_place"),
    ("latitude", "current_latitude"),
    ("longitude", "current_longitude"),
    ("direction_of_travel", "direction_of_travel"),
    ("distance_km", "distance_from_home_km"),
    ("distance_m", "distance_from_home_m"),
];

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let map = BUILTINS
            .iter()
            .map(|(token, key)| (token.to_string(), key.to_string()))
            .collect();
        Self { inner: Arc::new(map) }
    }

    pub fn register(&mut self, token: &str, key: impl Into<String>) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(token.trim().to_lowercase(), key.into());
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl OptionNameMap for OptionTable {
    fn canonical_key(&self, token: &str) -> Option<&str> {
        self.inner
            .get(&token.trim().to_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aliases_share_a_key() {
        let table = OptionTable::with_builtins();
        assert_eq!(table.canonical_key("house_number"), Some(STREET_NUMBER));
        assert_eq!(table.canonical_key("street_number"), Some(STREET_NUMBER));
        assert_eq!(table.canonical_key("route_number"), Some(STREET_REF));
        assert_eq!(table.canonical_key("missing_option"), None);
    }

    #[test]
    fn registered_tokens_are_normalized() {
        let mut table = OptionTable::new();
        table.register(" Suburb ", "suburb");
        assert_eq!(table.canonical_key("SUBURB"), Some("suburb"));
        assert_eq!(table.len(), 1);
    }
}
