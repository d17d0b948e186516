//! Input event records and numeric timestamps.
//!
//! Events are the raw material for a flamegraph: a label, a start time,
//! a finish time and optional source location. Timestamps keep track of
//! whether they were given as integers or floats so that integer input
//! produces integer offsets in the generated document.

use crate::utils::error::ValidationError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

/// A numeric point in time, in whatever unit the caller uses
#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    Int(i64),
    Float(f64),
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp::Int(0);

    /// Float timestamp with `-0.0` folded into `0.0`
    pub fn float(v: f64) -> Self {
        Timestamp::Float(v + 0.0)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Timestamp::Int(v) => v as f64,
            Timestamp::Float(v) => v,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Timestamp::Int(_) => true,
            Timestamp::Float(v) => v.is_finite(),
        }
    }

    /// Read a timestamp out of a dynamic JSON value
    ///
    /// Absent values, `null`, strings and every other non-number are rejected
    /// with an error naming `field`.
    pub fn from_json(value: Option<&Value>, field: &'static str) -> Result<Self, ValidationError> {
        let number = match value {
            Some(Value::Number(n)) => n,
            _ => return Err(ValidationError::NotNumeric { field }),
        };

        if let Some(v) = number.as_i64() {
            Ok(Timestamp::Int(v))
        } else if let Some(v) = number.as_f64() {
            Ok(Timestamp::float(v))
        } else {
            Err(ValidationError::NotNumeric { field })
        }
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        match (self, rhs) {
            (Timestamp::Int(a), Timestamp::Int(b)) => match a.checked_sub(b) {
                Some(v) => Timestamp::Int(v),
                None => Timestamp::float(a as f64 - b as f64),
            },
            (a, b) => Timestamp::float(a.as_f64() - b.as_f64()),
        }
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Timestamp::Int(a), Timestamp::Int(b)) => a.cmp(b),
            (Timestamp::Int(a), Timestamp::Float(b)) => cmp_int_float(*a, *b),
            (Timestamp::Float(a), Timestamp::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Timestamp::Float(a), Timestamp::Float(b)) if a == b => Ordering::Equal,
            (Timestamp::Float(a), Timestamp::Float(b)) => a.total_cmp(b),
        }
    }
}

/// Exact comparison of an integer with a float
///
/// Going through `i as f64` loses precision above 2^53 and breaks
/// transitivity, so the float is split into integer and fractional parts.
/// NaN sorts the way `f64::total_cmp` places it.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63; every finite float in [-2^63, 2^63) truncates to a valid i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl From<i64> for Timestamp {
    fn from(v: i64) -> Self {
        Timestamp::Int(v)
    }
}

impl From<i32> for Timestamp {
    fn from(v: i32) -> Self {
        Timestamp::Int(v.into())
    }
}

impl From<u32> for Timestamp {
    fn from(v: u32) -> Self {
        Timestamp::Int(v.into())
    }
}

impl From<f64> for Timestamp {
    fn from(v: f64) -> Self {
        Timestamp::float(v)
    }
}

impl From<f32> for Timestamp {
    fn from(v: f32) -> Self {
        Timestamp::float(v.into())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Int(v) => write!(f, "{}", v),
            Timestamp::Float(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Int(v) => serializer.serialize_i64(*v),
            Timestamp::Float(v) => serializer.serialize_f64(*v + 0.0),
        }
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Ok(Timestamp::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => Timestamp::Int(v),
            Err(_) => Timestamp::float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
        Ok(Timestamp::float(v))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Optional source location attached to an event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub col: Option<u32>,
}

impl SourceLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_col(mut self, col: u32) -> Self {
        self.col = Some(col);
        self
    }

    /// Location with all three fields set
    pub fn at(file: impl Into<String>, line: u32, col: u32) -> Self {
        Self::new().with_file(file).with_line(line).with_col(col)
    }
}

/// A labeled time interval
///
/// `start <= finish` is expected but not enforced; an inverted interval
/// is carried through to the output unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub start: Timestamp,
    pub finish: Timestamp,
    pub location: SourceLocation,
}

impl Event {
    /// Build a validated event
    ///
    /// # Errors
    /// * `ValidationError::MissingName` - name is empty
    /// * `ValidationError::NonFinite` - start or finish is NaN or infinite
    pub fn new(
        name: impl Into<String>,
        start: impl Into<Timestamp>,
        finish: impl Into<Timestamp>,
        location: SourceLocation,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let start = normalize(start.into());
        if !start.is_finite() {
            return Err(ValidationError::NonFinite { field: "start" });
        }

        let finish = normalize(finish.into());
        if !finish.is_finite() {
            return Err(ValidationError::NonFinite { field: "finish" });
        }

        Ok(Self {
            name,
            start,
            finish,
            location,
        })
    }

    /// Build a validated event from a loosely typed JSON record
    ///
    /// Expected keys: `name`, `start`, `finish` and optionally `file`,
    /// `line`, `col`. Optional keys set to `null` count as absent.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let record = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let name = match record.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(ValidationError::MissingName),
        };
        let start = Timestamp::from_json(record.get("start"), "start")?;
        let finish = Timestamp::from_json(record.get("finish"), "finish")?;

        let file = match record.get("file") {
            None | Some(Value::Null) => None,
            Some(Value::String(file)) => Some(file.clone()),
            Some(_) => return Err(ValidationError::InvalidLocation { field: "file" }),
        };
        let location = SourceLocation {
            file,
            line: position_from_json(record.get("line"), "line")?,
            col: position_from_json(record.get("col"), "col")?,
        };

        Event::new(name, start, finish, location)
    }
}

fn normalize(ts: Timestamp) -> Timestamp {
    match ts {
        Timestamp::Float(v) => Timestamp::float(v),
        int => int,
    }
}

fn position_from_json(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<u32>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or(ValidationError::InvalidLocation { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_subtraction_stays_integer() {
        let at = Timestamp::Int(115) - Timestamp::Int(100);
        assert!(matches!(at, Timestamp::Int(15)));
    }

    #[test]
    fn test_mixed_subtraction_is_float() {
        let at = Timestamp::Float(115.5) - Timestamp::Int(100);
        assert!(matches!(at, Timestamp::Float(v) if v == 15.5));
    }

    #[test]
    fn test_overflowing_subtraction_falls_back_to_float() {
        let at = Timestamp::Int(i64::MAX) - Timestamp::Int(-1);
        assert!(matches!(at, Timestamp::Float(_)));
    }

    #[test]
    fn test_ordering_across_kinds() {
        assert_eq!(Timestamp::Int(1), Timestamp::Float(1.0));
        assert!(Timestamp::Int(1) < Timestamp::Float(1.5));
        assert!(Timestamp::Float(-0.5) < Timestamp::Int(0));
    }

    #[test]
    fn test_mixed_ordering_is_exact_above_f64_precision() {
        let two_53: i64 = 1 << 53;
        let a = Timestamp::Int(two_53);
        let b = Timestamp::Float(two_53 as f64);
        let c = Timestamp::Int(two_53 + 1);

        assert_eq!(a, b);
        assert!(b < c);
        assert!(a < c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_mixed_ordering_at_i64_limits() {
        assert!(Timestamp::Int(i64::MAX) < Timestamp::Float(9_223_372_036_854_775_808.0));
        assert_eq!(Timestamp::Int(i64::MIN), Timestamp::Float(i64::MIN as f64));
        assert!(Timestamp::Int(i64::MIN) > Timestamp::Float(-1e19));
        assert!(Timestamp::Int(-3) < Timestamp::Float(-2.5));
        assert!(Timestamp::Int(-2) > Timestamp::Float(-2.5));
        assert!(Timestamp::Int(2) < Timestamp::Float(2.25));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(Timestamp::Float(-0.0), Timestamp::Int(0));
        assert_eq!(Timestamp::Float(-0.0), Timestamp::Float(0.0));
        assert!(matches!(Timestamp::from(-0.0), Timestamp::Float(v) if v.is_sign_positive()));
        assert_eq!(
            serde_json::to_string(&Timestamp::Float(-0.0)).unwrap(),
            "0.0"
        );
    }

    #[test]
    fn test_serializes_as_bare_number() {
        assert_eq!(serde_json::to_value(Timestamp::Int(15)).unwrap(), json!(15));
        assert_eq!(
            serde_json::to_value(Timestamp::Float(1.5)).unwrap(),
            json!(1.5)
        );
    }

    #[test]
    fn test_deserializes_numbers() {
        let ts: Timestamp = serde_json::from_value(json!(42)).unwrap();
        assert!(matches!(ts, Timestamp::Int(42)));
        let ts: Timestamp = serde_json::from_value(json!(0.25)).unwrap();
        assert!(matches!(ts, Timestamp::Float(v) if v == 0.25));
        assert!(serde_json::from_value::<Timestamp>(json!("abc")).is_err());
    }

    #[test]
    fn test_from_json_rejects_non_numbers() {
        assert_eq!(
            Timestamp::from_json(Some(&json!("abc")), "start"),
            Err(ValidationError::NotNumeric { field: "start" })
        );
        assert_eq!(
            Timestamp::from_json(Some(&Value::Null), "finish"),
            Err(ValidationError::NotNumeric { field: "finish" })
        );
        assert_eq!(
            Timestamp::from_json(None, "finish"),
            Err(ValidationError::NotNumeric { field: "finish" })
        );
    }

    #[test]
    fn test_event_new_rejects_empty_name() {
        let result = Event::new("", 1, 2, SourceLocation::new());
        assert_eq!(result, Err(ValidationError::MissingName));
    }

    #[test]
    fn test_event_new_rejects_nan() {
        let result = Event::new("F0", f64::NAN, 2, SourceLocation::new());
        assert_eq!(result, Err(ValidationError::NonFinite { field: "start" }));
        let result = Event::new("F0", 1, f64::INFINITY, SourceLocation::new());
        assert_eq!(result, Err(ValidationError::NonFinite { field: "finish" }));
    }

    #[test]
    fn test_event_new_accepts_inverted_interval() {
        let event = Event::new("F0", 200, 100, SourceLocation::new()).unwrap();
        assert!(event.start > event.finish);
    }

    #[test]
    fn test_from_value_with_location() {
        let event = Event::from_value(&json!({
            "name": "F0", "start": 100, "finish": 200,
            "file": "x.rb", "line": 20, "col": 4
        }))
        .unwrap();

        assert_eq!(event.name, "F0");
        assert_eq!(event.location, SourceLocation::at("x.rb", 20, 4));
    }

    #[test]
    fn test_from_value_null_location_is_absent() {
        let event = Event::from_value(&json!({
            "name": "F0", "start": 1, "finish": 2, "file": null, "line": null
        }))
        .unwrap();
        assert_eq!(event.location, SourceLocation::new());
    }

    #[test]
    fn test_from_value_errors() {
        assert_eq!(
            Event::from_value(&json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
        assert_eq!(
            Event::from_value(&json!({"name": null, "start": 1, "finish": 2})),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            Event::from_value(&json!({"name": "F0", "start": "abc", "finish": 2})),
            Err(ValidationError::NotNumeric { field: "start" })
        );
        assert_eq!(
            Event::from_value(&json!({"name": "F0", "start": 1, "finish": null})),
            Err(ValidationError::NotNumeric { field: "finish" })
        );
        assert_eq!(
            Event::from_value(&json!({"name": "F0", "start": 1, "finish": 2, "line": -3})),
            Err(ValidationError::InvalidLocation { field: "line" })
        );
        assert_eq!(
            Event::from_value(&json!({"name": "F0", "start": 1, "finish": 2, "file": 7})),
            Err(ValidationError::InvalidLocation { field: "file" })
        );
    }
}
