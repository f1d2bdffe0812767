//! Declarative parameter specs and the validated parameter set.

use super::error::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value as supplied by an input provider.
///
/// JSON numbers without a fraction deserialize as [`ParamValue::Int`], so
/// `{"n": 30}` and `{"n": 30.0}` are both accepted for integer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Choice(String),
}

impl ParamValue {
    /// Numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Choice(_) => None,
        }
    }

    /// Integer value; floats are accepted only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Choice(s) => f.write_str(s),
        }
    }
}

/// Range or option constraints of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Float {
        min: f64,
        max: f64,
        default: f64,
        step: f64,
    },
    Int {
        min: i64,
        max: i64,
        default: i64,
    },
    Choice {
        options: Vec<&'static str>,
        default: &'static str,
    },
}

/// Adjusts a spec given the values collected before it.
pub type Refine = fn(&ParameterSet, ParamKind) -> ParamKind;

/// Declarative description of one input.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
    refine: Option<Refine>,
}

impl ParamSpec {
    pub fn float(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Float {
                min,
                max,
                default,
                step: (max - min) / 100.0,
            },
            refine: None,
        }
    }

    pub fn int(name: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Int { min, max, default },
            refine: None,
        }
    }

    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &[&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Choice {
                options: options.to_vec(),
                default,
            },
            refine: None,
        }
    }

    /// Override the slider step of a float parameter.
    pub fn step(mut self, step: f64) -> Self {
        if let ParamKind::Float { step: s, .. } = &mut self.kind {
            *s = step;
        }
        self
    }

    /// Derive bounds or default from earlier parameters at collection time.
    pub fn refine(mut self, refine: Refine) -> Self {
        self.refine = Some(refine);
        self
    }

    /// The spec as it applies once `earlier` has been collected.
    pub fn resolve(&self, earlier: &ParameterSet) -> ParamSpec {
        match self.refine {
            Some(refine) => ParamSpec {
                kind: refine(earlier, self.kind.clone()),
                refine: None,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    pub fn default_value(&self) -> ParamValue {
        match &self.kind {
            ParamKind::Float { default, .. } => ParamValue::Float(*default),
            ParamKind::Int { default, .. } => ParamValue::Int(*default),
            ParamKind::Choice { default, .. } => ParamValue::Choice(default.to_string()),
        }
    }

    /// Check `value` against the constraints and coerce it to the spec's type.
    pub fn validate(&self, value: &ParamValue) -> PageResult<ParamValue> {
        match &self.kind {
            ParamKind::Float { min, max, .. } => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| self.invalid(format!("expected a number, got '{}'", value)))?;
                if !v.is_finite() || v < *min || v > *max {
                    return Err(self.invalid(format!("{} is outside [{}, {}]", v, min, max)));
                }
                Ok(ParamValue::Float(v))
            }
            ParamKind::Int { min, max, .. } => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| self.invalid(format!("expected an integer, got '{}'", value)))?;
                if v < *min || v > *max {
                    return Err(self.invalid(format!("{} is outside [{}, {}]", v, min, max)));
                }
                Ok(ParamValue::Int(v))
            }
            ParamKind::Choice { options, .. } => {
                let v = value
                    .as_str()
                    .ok_or_else(|| self.invalid(format!("expected one of {:?}", options)))?;
                if !options.contains(&v) {
                    return Err(self.invalid(format!("'{}' is not one of {:?}", v, options)));
                }
                Ok(value.clone())
            }
        }
    }

    fn invalid(&self, message: String) -> PageError {
        PageError::Validation {
            name: self.name.to_string(),
            message,
        }
    }
}

/// Named, validated inputs for one page run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name: value` pairs.
    pub fn from_json(text: &str) -> PageResult<Self> {
        serde_json::from_str(text).map_err(|e| PageError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> PageResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PageError::Config(e.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn f64(&self, name: &str) -> PageResult<f64> {
        self.get(name)
            .and_then(ParamValue::as_f64)
            .ok_or_else(|| missing(name, "number"))
    }

    pub fn i64(&self, name: &str) -> PageResult<i64> {
        self.get(name)
            .and_then(ParamValue::as_i64)
            .ok_or_else(|| missing(name, "integer"))
    }

    /// Non-negative integer parameter.
    pub fn u64(&self, name: &str) -> PageResult<u64> {
        let v = self.i64(name)?;
        u64::try_from(v).map_err(|_| PageError::Validation {
            name: name.to_string(),
            message: format!("{} must be non-negative", v),
        })
    }

    pub fn choice(&self, name: &str) -> PageResult<&str> {
        self.get(name)
            .and_then(ParamValue::as_str)
            .ok_or_else(|| missing(name, "choice"))
    }
}

fn missing(name: &str, what: &str) -> PageError {
    PageError::Validation {
        name: name.to_string(),
        message: format!("missing {} parameter", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_numbers() {
        let set = ParameterSet::from_json(r#"{"n": 30, "alpha": 0.05, "tail": "left"}"#).unwrap();
        assert_eq!(set.get("n"), Some(&ParamValue::Int(30)));
        assert_eq!(set.f64("n").unwrap(), 30.0);
        assert_eq!(set.f64("alpha").unwrap(), 0.05);
        assert_eq!(set.choice("tail").unwrap(), "left");
        assert!(set.i64("alpha").is_err());
        assert!(set.f64("missing").is_err());

        assert!(ParameterSet::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_validate_ranges() {
        let spec = ParamSpec::float("alpha", "Significance level", 0.001, 0.2, 0.05);
        assert_eq!(
            spec.validate(&ParamValue::Int(0)).unwrap_err().to_string(),
            "Invalid value for 'alpha': 0 is outside [0.001, 0.2]"
        );
        assert_eq!(spec.validate(&ParamValue::Float(0.1)).unwrap(), ParamValue::Float(0.1));
        assert!(spec.validate(&ParamValue::Choice("x".into())).is_err());

        let n = ParamSpec::int("n", "Sample size", 1, 100, 30);
        assert_eq!(n.validate(&ParamValue::Float(12.0)).unwrap(), ParamValue::Int(12));
        assert!(n.validate(&ParamValue::Float(12.5)).is_err());
        assert!(n.validate(&ParamValue::Int(0)).is_err());

        let tail = ParamSpec::choice("tail", "Test", &["two-sided", "left", "right"], "two-sided");
        assert_eq!(tail.default_value(), ParamValue::Choice("two-sided".into()));
        assert!(tail.validate(&ParamValue::Choice("up".into())).is_err());
    }

    #[test]
    fn test_refine_uses_earlier_values() {
        let upper = ParamSpec::float("upper", "Upper", 0.0, 100.0, 10.0).refine(|set, kind| {
            match (kind, set.f64("lower")) {
                (ParamKind::Float { max, default, step, .. }, Ok(lower)) => ParamKind::Float {
                    min: lower,
                    max,
                    default: default.max(lower),
                    step,
                },
                (kind, _) => kind,
            }
        });
        let earlier = ParameterSet::new().with("lower", ParamValue::Float(20.0));
        let resolved = upper.resolve(&earlier);
        assert_eq!(resolved.default_value(), ParamValue::Float(20.0));
        assert!(resolved.validate(&ParamValue::Float(15.0)).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let set = ParameterSet::new()
            .with("df", ParamValue::Int(5))
            .with("method", ParamValue::Choice("percentile".into()));
        let text = set.to_json().unwrap();
        assert_eq!(ParameterSet::from_json(&text).unwrap(), set);
    }
}
