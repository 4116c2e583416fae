//! Color-scale domain helpers.

use std::hash::Hash;

use birth_map_analytics_models::ColorDomain;

use crate::{AnalyticsError, aggregate::Aggregate};

/// Domain over the values of an aggregate.
#[must_use]
pub fn aggregate_domain<K, V>(agg: &Aggregate<K, V>) -> Option<ColorDomain<V>>
where
    K: Eq + Hash + Clone,
    V: PartialOrd + Copy,
{
    ColorDomain::from_values(agg.values().copied())
}

/// Converts a missing domain into [`AnalyticsError::EmptyDomain`].
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDomain`] if `domain` is `None`.
pub fn require_domain<V>(domain: Option<ColorDomain<V>>) -> Result<ColorDomain<V>, AnalyticsError> {
    domain.ok_or(AnalyticsError::EmptyDomain)
}
