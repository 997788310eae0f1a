//! Shared value types carried by envelopes.

use crate::PlayerId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Display color used when a participant does not pick one.
pub const DEFAULT_COLOR: u32 = 0x00ff00;

/// Largest value accepted as a display color (24-bit RGB).
const MAX_COLOR: u32 = 0xff_ffff;

/// A point in the shared scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for Position {
    /// Spawn point: one unit above the origin.
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
}

/// Public view of a participant, as sent in `players` and `playerJoined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Participant identity.
    pub id: PlayerId,
    /// Display name.
    pub username: String,
    /// 24-bit RGB display color.
    pub color: u32,
    /// Last known position.
    pub position: Position,
}

/// Deserialize an optional color from any JSON number.
///
/// Browser clients frequently produce colors with `Math.random() * 0xffffff`,
/// so fractional values are truncated and the result is clamped to 24 bits.
pub(crate) fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !raw.is_finite() {
        return Err(de::Error::invalid_value(
            de::Unexpected::Float(raw),
            &"a finite color value",
        ));
    }
    Ok(Some(raw.clamp(0.0, f64::from(MAX_COLOR)) as u32))
}
