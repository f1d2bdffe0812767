//! Input providers: where parameter values come from.

use super::error::{PageError, PageResult};
use super::params::{ParamSpec, ParamValue, ParameterSet};
use std::fs;
use std::path::Path;

/// Supplies a raw value for a parameter, or `None` to fall back to the
/// spec's default.
pub trait InputProvider {
    fn value(&self, spec: &ParamSpec) -> Option<ParamValue>;
}

/// Every parameter at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl InputProvider for Defaults {
    fn value(&self, _spec: &ParamSpec) -> Option<ParamValue> {
        None
    }
}

impl InputProvider for ParameterSet {
    fn value(&self, spec: &ParamSpec) -> Option<ParamValue> {
        self.get(spec.name).cloned()
    }
}

/// Values read from a JSON object such as `{"alpha": 0.01, "tail": "left"}`.
///
/// A file may also hold one object per page id, e.g.
/// `{"binomial": {"n": 40}, "student-t": {"df": 3}}`; use
/// [`JsonInput::for_page`] to select one.
#[derive(Debug, Clone, Default)]
pub struct JsonInput {
    root: serde_json::Value,
}

impl JsonInput {
    pub fn from_json(text: &str) -> PageResult<Self> {
        let root: serde_json::Value =
            serde_json::from_str(text).map_err(|e| PageError::Config(e.to_string()))?;
        if !root.is_object() {
            return Err(PageError::Config("expected a JSON object".to_string()));
        }
        Ok(Self { root })
    }

    pub fn from_path(path: &Path) -> PageResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| PageError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Values for `page_id`: its nested object if present, otherwise the
    /// top-level scalars.
    pub fn for_page(&self, page_id: &str) -> PageResult<ParameterSet> {
        let scope = match self.root.get(page_id) {
            Some(nested) if nested.is_object() => nested.clone(),
            _ => {
                let scalars: serde_json::Map<String, serde_json::Value> = self
                    .root
                    .as_object()
                    .into_iter()
                    .flatten()
                    .filter(|(_, v)| !v.is_object())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                serde_json::Value::Object(scalars)
            }
        };
        let mut set = ParameterSet::new();
        for (name, value) in scope.as_object().into_iter().flatten() {
            set.insert(name.clone(), raw_value(value));
        }
        Ok(set)
    }
}

impl InputProvider for JsonInput {
    fn value(&self, spec: &ParamSpec) -> Option<ParamValue> {
        self.root
            .get(spec.name)
            .filter(|v| !v.is_object())
            .map(raw_value)
    }
}

/// Converts a JSON value without dropping it. Anything that is not a number
/// or a string is kept as its JSON text, so validation reports it instead of
/// the default being used.
fn raw_value(value: &serde_json::Value) -> ParamValue {
    serde_json::from_value(value.clone()).unwrap_or_else(|_| ParamValue::Choice(value.to_string()))
}
