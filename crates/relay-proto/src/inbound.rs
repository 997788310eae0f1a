//! Envelopes sent by participants to the relay.

use crate::error::{ProtoError, Result};
use crate::text::{truncate_chars, MAX_CHAT_CHARS, MAX_USERNAME_CHARS};
use crate::types::{deserialize_color, Position};
use crate::PlayerId;
use serde::Deserialize;
use serde_json::Value;

/// The recognized inbound envelope kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `join`
    Join,
    /// `move`
    Move,
    /// `chat`
    Chat,
    /// `damage`
    Damage,
}

impl MessageKind {
    /// Look up a kind by its wire name.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "join" => Some(Self::Join),
            "move" => Some(Self::Move),
            "chat" => Some(Self::Chat),
            "damage" => Some(Self::Damage),
            _ => None,
        }
    }

    /// The wire name, also used as a metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Move => "move",
            Self::Chat => "chat",
            Self::Damage => "damage",
        }
    }
}

/// A decoded inbound envelope.
///
/// Values returned by [`decode`] have already had their text fields bounded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Announce (or re-announce) the sender with display attributes.
    Join {
        /// Display name; truncated to [`MAX_USERNAME_CHARS`].
        username: String,
        /// Display color; the relay substitutes a default when absent.
        #[serde(default, deserialize_with = "deserialize_color")]
        color: Option<u32>,
        /// Initial position; the relay substitutes the spawn point when absent.
        #[serde(default)]
        position: Option<Position>,
    },
    /// Report the sender's new position.
    Move {
        /// New position.
        position: Position,
    },
    /// Say something to everyone.
    Chat {
        /// Chat body; truncated to [`MAX_CHAT_CHARS`].
        message: String,
    },
    /// Deliver damage to one other participant.
    Damage {
        /// Identity of the receiving participant.
        #[serde(rename = "targetId")]
        target_id: PlayerId,
        /// Amount of damage.
        #[serde(alias = "amount")]
        damage: f64,
    },
}

impl ClientMessage {
    /// Kind of this envelope.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Join { .. } => MessageKind::Join,
            Self::Move { .. } => MessageKind::Move,
            Self::Chat { .. } => MessageKind::Chat,
            Self::Damage { .. } => MessageKind::Damage,
        }
    }

    /// Apply the length bounds to client-supplied text.
    pub fn normalized(mut self) -> Self {
        match &mut self {
            Self::Join { username, .. } => truncate_chars(username, MAX_USERNAME_CHARS),
            Self::Chat { message } => truncate_chars(message, MAX_CHAT_CHARS),
            Self::Move { .. } | Self::Damage { .. } => {}
        }
        self
    }
}

/// Decode one frame body into a bounded [`ClientMessage`].
///
/// Errors distinguish an unparseable body, a missing or unknown `type`, and a
/// known kind whose fields are missing or mistyped.
pub fn decode(text: &str) -> Result<ClientMessage> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ProtoError::Malformed(e.to_string()))?;

    let kind = {
        let name = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtoError::MissingKind)?;
        MessageKind::from_wire(name).ok_or_else(|| ProtoError::UnknownKind(name.to_string()))?
    };

    let msg: ClientMessage =
        serde_json::from_value(value).map_err(|e| ProtoError::InvalidPayload {
            kind: kind.as_str(),
            reason: e.to_string(),
        })?;

    Ok(msg.normalized())
}
