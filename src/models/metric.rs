// Explicit "unavailable" marker for optional metrics

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Serialized form of [`Metric::Unavailable`].
pub const UNAVAILABLE: &str = "unavailable";

/// A reading that the host may not support. Zero is a value, never the marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<T> {
    Value(T),
    Unavailable,
}

impl<T> Metric<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Value(v) => Metric::Value(f(v)),
            Metric::Unavailable => Metric::Unavailable,
        }
    }
}

impl<T: fmt::Display> Metric<T> {
    /// Value formatted with `Display`, or "N/A".
    pub fn display_or_na(&self) -> String {
        match self {
            Metric::Value(v) => v.to_string(),
            Metric::Unavailable => "N/A".into(),
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Metric::Value(v),
            None => Metric::Unavailable,
        }
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => v.serialize(serializer),
            Metric::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Metric<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Value(T),
            Marker(String),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(v) => Ok(Metric::Value(v)),
            Repr::Marker(s) if s == UNAVAILABLE => Ok(Metric::Unavailable),
            Repr::Marker(s) => Err(serde::de::Error::custom(format!(
                "expected a value or \"{UNAVAILABLE}\", got \"{s}\""
            ))),
        }
    }
}
