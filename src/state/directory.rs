//! The session directory: who is present and where.
//!
//! The directory is a plain owned map. It does no locking of its own; the
//! [`Hub`](super::Hub) owns it inside its critical section and is the only
//! code that hands out `&mut Directory`.

use relay_proto::{DEFAULT_COLOR, PlayerId, PlayerInfo, Position};
use std::collections::BTreeMap;

/// Display name given to a participant that has not joined yet.
pub fn guest_name(id: PlayerId) -> String {
    format!("Guest{id}")
}

/// One participant record.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub color: u32,
    pub position: Position,
}

impl Player {
    fn guest(id: PlayerId) -> Self {
        Self {
            id,
            username: guest_name(id),
            color: DEFAULT_COLOR,
            position: Position::default(),
        }
    }

    /// Wire view of this record.
    pub fn info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            username: self.username.clone(),
            color: self.color,
            position: self.position,
        }
    }
}

/// Fields to change on a record; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerUpdate {
    pub username: Option<String>,
    pub color: Option<u32>,
    pub position: Option<Position>,
}

impl PlayerUpdate {
    /// An update that only moves the participant.
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

/// Identity to participant record, ordered by identity.
#[derive(Debug, Default)]
pub struct Directory {
    players: BTreeMap<PlayerId, Player>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update a record.
    ///
    /// A new record starts from guest defaults before `update` is applied.
    pub fn upsert(&mut self, id: PlayerId, update: PlayerUpdate) -> &Player {
        let player = self.players.entry(id).or_insert_with(|| Player::guest(id));
        if let Some(username) = update.username {
            player.username = username;
        }
        if let Some(color) = update.color {
            player.color = color;
        }
        if let Some(position) = update.position {
            player.position = position;
        }
        player
    }

    /// Delete a record. Removing an absent identity is not an error.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    /// Point-in-time copy of every record, ordered by identity.
    pub fn snapshot(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
