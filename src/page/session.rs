//! Per-session state that outlives a single run.

use super::params::ParameterSet;
use std::collections::BTreeMap;

/// Values of the last successful run of each page, plus the regression
/// page's user-added points.
///
/// A session is owned by the caller and passed into every run; pages never
/// reach for global state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    values: BTreeMap<String, ParameterSet>,
    points: Vec<(f64, f64)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the last successful run of `page_id`.
    pub fn last_values(&self, page_id: &str) -> Option<&ParameterSet> {
        self.values.get(page_id)
    }

    pub(crate) fn remember(&mut self, page_id: &str, params: ParameterSet) {
        self.values.insert(page_id.to_string(), params);
    }

    /// Append a point in insertion order.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }
}
