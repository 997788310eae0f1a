//! Envelopes sent by the relay to participants.

use crate::error::{ProtoError, Result};
use crate::types::{PlayerInfo, Position};
use crate::PlayerId;
use serde::Serialize;

/// An outbound envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Everyone currently present; sent once to each new connection.
    Players {
        /// Directory snapshot.
        players: Vec<PlayerInfo>,
    },
    /// A participant joined or changed its display attributes.
    PlayerJoined(PlayerInfo),
    /// A participant moved.
    PlayerMove {
        /// Who moved.
        id: PlayerId,
        /// Where to.
        position: Position,
    },
    /// A chat line, echoed to every connection including its author.
    Chat {
        /// Author identity.
        id: PlayerId,
        /// Author display name.
        username: String,
        /// Bounded chat body.
        message: String,
    },
    /// Damage dealt to the receiving participant.
    Damage {
        /// Amount of damage.
        damage: f64,
        /// Identity of the dealer.
        from: PlayerId,
    },
    /// A participant disconnected.
    PlayerLeft {
        /// Who left.
        id: PlayerId,
        /// Last known display name.
        username: String,
    },
}

impl ServerMessage {
    /// Wire name of this envelope, used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Players { .. } => "players",
            Self::PlayerJoined(_) => "playerJoined",
            Self::PlayerMove { .. } => "playerMove",
            Self::Chat { .. } => "chat",
            Self::Damage { .. } => "damage",
            Self::PlayerLeft { .. } => "playerLeft",
        }
    }

    /// Serialize to the JSON text carried in one frame.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ProtoError::Encode(e.to_string()))
    }
}
