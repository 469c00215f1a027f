use async_trait::async_trait;

use super::{AttributeStore, TRACKER_ID, ZONE};

/// Answers whether the tracked subject is currently inside a zone.
#[async_trait]
pub trait ZoneChecker: Send + Sync {
    async fn in_zone(&self) -> bool;
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedZone(pub bool);

#[async_trait]
impl ZoneChecker for FixedZone {
    async fn in_zone(&self) -> bool {
        self.0
    }
}

/// Zone states reported by trackers that do not mean "inside a zone".
const NOT_IN_ZONE: [&str; 4] = ["away", "not_home", "notset", "not_set"];
const STATIONARY_PREFIXES: [&str; 2] = ["statzon", "ic3_statzone_"];

/// Derives zone membership from the tracker's reported zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerZone {
    zone: Option<String>,
    tracker_id: String,
    passive: bool,
}

impl TrackerZone {
    pub fn new(zone: Option<String>, tracker_id: impl Into<String>) -> Self {
        Self {
            zone: zone.filter(|z| !z.is_empty()),
            tracker_id: tracker_id.into(),
            passive: false,
        }
    }

    /// Marks the reported zone as passive. Passive zones never count as inside.
    pub fn with_passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }

    pub fn from_store(store: &dyn AttributeStore) -> Self {
        let zone = (!store.is_blank(ZONE)).then(|| store.get_safe_string(ZONE));
        Self::new(zone, store.get_safe_string(TRACKER_ID))
    }

    fn is_inside(&self) -> bool {
        let Some(zone) = self.zone.as_deref() else {
            return false;
        };
        let zone = zone.to_lowercase();
        // A zone entity tracking itself is never "inside" another zone.
        let tracker_is_zone = self.tracker_id.split('.').next() == Some("zone");
        let stationary = zone.contains("stationary")
            || STATIONARY_PREFIXES.iter().any(|p| zone.starts_with(p));
        !(tracker_is_zone || stationary || self.passive || NOT_IN_ZONE.contains(&zone.as_str()))
    }
}

#[async_trait]
impl ZoneChecker for TrackerZone {
    async fn in_zone(&self) -> bool {
        self.is_inside()
    }
}
