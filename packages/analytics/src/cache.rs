//! Memoized view payloads.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use birth_map_analytics_models::{
    ChoroplethView, DemographicsView, NameTrendView, PopularNamesView, Season, SeasonView,
    StateOption, TopNamesView,
};
use birth_map_records_models::Sex;
use serde::Serialize;

use crate::{
    Dataset,
    views::{births, demographics, names, seasons},
};

/// Parameters identifying one view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewParams {
    /// Births per state for a year.
    Choropleth { year: i32 },
    /// Share of births falling in a season.
    Seasons { season: Season },
    /// Population totals.
    Demographics,
    /// Per-state top names for a year.
    TopNames { year: i32, limit: usize },
    /// Most common names overall.
    PopularNames { limit: usize },
    /// Yearly counts of a state's top names.
    NameTrend {
        state: String,
        sex: Sex,
        limit: usize,
    },
    /// State picker entries.
    States,
}

/// A built view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewPayload {
    Choropleth(ChoroplethView<u64>),
    Seasons(SeasonView),
    Demographics(DemographicsView),
    TopNames(TopNamesView),
    PopularNames(PopularNamesView),
    NameTrend(NameTrendView),
    States(Vec<StateOption>),
}

/// Builds the view described by `params` from scratch.
#[must_use]
pub fn build_view(dataset: &Dataset, params: &ViewParams) -> ViewPayload {
    match params {
        ViewParams::Choropleth { year } => {
            ViewPayload::Choropleth(births::choropleth_for_year(dataset, *year))
        }
        ViewParams::Seasons { season } => {
            ViewPayload::Seasons(seasons::season_view(dataset, *season))
        }
        ViewParams::Demographics => {
            ViewPayload::Demographics(demographics::demographics_view(dataset))
        }
        ViewParams::TopNames { year, limit } => {
            ViewPayload::TopNames(names::top_names_by_state(dataset, *year, *limit))
        }
        ViewParams::PopularNames { limit } => {
            ViewPayload::PopularNames(names::popular_names(dataset, *limit))
        }
        ViewParams::NameTrend { state, sex, limit } => {
            ViewPayload::NameTrend(names::name_trend(dataset, state, *sex, *limit))
        }
        ViewParams::States => ViewPayload::States(names::state_options(dataset)),
    }
}

impl ViewParams {
    /// Canonical form used as a cache key: state abbreviations are trimmed
    /// and upper-cased so `" ca"` and `"CA"` share one entry.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self {
            Self::NameTrend { state, sex, limit } => Self::NameTrend {
                state: state.trim().to_ascii_uppercase(),
                sex: *sex,
                limit: *limit,
            },
            other => other.clone(),
        }
    }
}

type CacheKey = (u64, ViewParams);

/// Maximum number of payloads kept by [`ViewCache::new`].
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<CacheKey, Arc<ViewPayload>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<CacheKey>,
}

/// View payloads keyed by dataset version and parameters.
///
/// Holds at most `capacity` payloads; inserting past that evicts the
/// oldest entry.
#[derive(Debug)]
pub struct ViewCache {
    entries: Mutex<Entries>,
    capacity: usize,
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ViewCache {
    /// Creates an empty cache holding up to [`DEFAULT_CAPACITY`] payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding up to `capacity` payloads (at least
    /// one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached payload, if present.
    #[must_use]
    pub fn get(&self, version: u64, params: &ViewParams) -> Option<Arc<ViewPayload>> {
        self.lock().map.get(&(version, params.clone())).cloned()
    }

    /// Stores a payload, returning the shared handle.
    pub fn insert(
        &self,
        version: u64,
        params: ViewParams,
        payload: ViewPayload,
    ) -> Arc<ViewPayload> {
        let payload = Arc::new(payload);
        let key = (version, params);
        let mut entries = self.lock();

        if entries.map.insert(key.clone(), Arc::clone(&payload)).is_none() {
            entries.order.push_back(key);
        }

        while entries.map.len() > self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.map.remove(&oldest);
            log::debug!("Evicted cached view {:?}", oldest.1);
        }

        payload
    }

    /// Drops every entry built from a version other than `version`.
    pub fn retain_version(&self, version: u64) {
        let mut entries = self.lock();
        let before = entries.map.len();
        entries.map.retain(|(v, _), _| *v == version);
        entries.order.retain(|(v, _)| *v == version);
        log::debug!("Evicted {} cached views", before - entries.map.len());
    }

    /// Number of cached payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{birth, dataset};

    #[test]
    fn builds_the_requested_view() {
        let mut ds = dataset();
        ds.births = vec![birth("06", 2006, 3, 100)];
        let payload = build_view(&ds, &ViewParams::Choropleth { year: 2006 });
        let ViewPayload::Choropleth(view) = payload else {
            panic!("expected a choropleth");
        };
        assert_eq!(view.states[0].value, Some(100));
    }

    #[test]
    fn entries_are_scoped_by_version() {
        let cache = ViewCache::new();
        let payload = build_view(&dataset(), &ViewParams::States);
        cache.insert(1, ViewParams::States, payload.clone());
        cache.insert(2, ViewParams::Demographics, payload);

        assert!(cache.get(1, &ViewParams::States).is_some());
        assert!(cache.get(2, &ViewParams::States).is_none());

        cache.retain_version(2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1, &ViewParams::States).is_none());
    }

    #[test]
    fn oldest_entries_are_evicted_past_capacity() {
        let ds = dataset();
        let cache = ViewCache::with_capacity(2);
        for limit in 1..=5 {
            let params = ViewParams::PopularNames { limit };
            cache.insert(1, params.clone(), build_view(&ds, &params));
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.get(1, &ViewParams::PopularNames { limit: 1 }).is_none());
        assert!(cache.get(1, &ViewParams::PopularNames { limit: 5 }).is_some());

        let params = ViewParams::PopularNames { limit: 5 };
        cache.insert(1, params.clone(), build_view(&ds, &params));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(1, &ViewParams::PopularNames { limit: 4 }).is_some());
    }

    #[test]
    fn name_trend_state_is_normalized() {
        let loose = ViewParams::NameTrend {
            state: " ca ".to_string(),
            sex: Sex::Female,
            limit: 5,
        };
        let canonical = ViewParams::NameTrend {
            state: "CA".to_string(),
            sex: Sex::Female,
            limit: 5,
        };
        assert_eq!(loose.normalized(), canonical);
        assert_eq!(ViewParams::States.normalized(), ViewParams::States);
    }

    #[test]
    fn payload_serializes_without_a_tag() {
        let payload = build_view(&dataset(), &ViewParams::PopularNames { limit: 10 });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["names"], serde_json::json!([]));
        assert!(json["domain"].is_null());
    }
}
