//! Participant identity.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned identity of one connection.
///
/// Serialized as a JSON number. Clients that learned an id from a snapshot
/// sometimes echo it back as a string, so deserialization accepts both a
/// non-negative integer and a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Wrap a raw identity value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for PlayerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

struct PlayerIdVisitor;

impl Visitor<'_> for PlayerIdVisitor {
    type Value = PlayerId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer id or its decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PlayerId, E> {
        Ok(PlayerId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PlayerId, E> {
        u64::try_from(v)
            .map(PlayerId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<PlayerId, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
            Ok(PlayerId(v as u64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PlayerId, E> {
        v.trim()
            .parse::<u64>()
            .map(PlayerId)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlayerIdVisitor)
    }
}
