//! Envelope handlers.
//!
//! [`dispatch`] takes one decoded [`ClientMessage`] from a connection and
//! applies it to the hub. Each handler runs inside the hub's critical
//! section: the directory mutation and the resulting fan-out are observed
//! as one step by every other connection.

mod chat;
mod damage;
pub mod fanout;
mod join;
mod movement;

pub use fanout::{Audience, fan_out};

use crate::config::MovePolicy;
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use crate::state::{Hub, HubState};
use relay_proto::{ClientMessage, PlayerId};

/// What a handler sees: the originating connection and the locked state.
pub struct Context<'a> {
    /// Identity of the connection the envelope arrived on.
    pub id: PlayerId,
    pub state: &'a mut HubState,
    pub policy: MovePolicy,
}

/// Apply one decoded envelope from connection `id`.
///
/// Fails with [`HandlerError::UnknownConnection`] if `id` has already been
/// unregistered; the envelope is discarded in that case.
pub fn dispatch(hub: &Hub, id: PlayerId, msg: ClientMessage) -> HandlerResult {
    metrics::record_envelope(msg.kind().as_str());

    let mut state = hub.lock();
    if !state.is_connected(id) {
        return Err(HandlerError::UnknownConnection(id));
    }

    let mut ctx = Context {
        id,
        state: &mut *state,
        policy: hub.policy(),
    };

    match msg {
        ClientMessage::Join {
            username,
            color,
            position,
        } => join::handle(&mut ctx, username, color, position),
        ClientMessage::Move { position } => movement::handle(&mut ctx, position),
        ClientMessage::Chat { message } => chat::handle(&mut ctx, message),
        ClientMessage::Damage { target_id, damage } => damage::handle(&mut ctx, target_id, damage),
    }
}
