//! Fan-out of outbound envelopes to live connections.

use crate::error::HandlerResult;
use crate::metrics;
use crate::state::{Frame, HubState, Peer};
use relay_proto::{PlayerId, ServerMessage};
use std::sync::Arc;
use tracing::debug;

/// Which connections an outbound envelope is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every live connection.
    Everyone,
    /// Every live connection except one (usually the originator).
    AllExcept(PlayerId),
    /// A single connection.
    Only(PlayerId),
}

impl Audience {
    fn includes(self, id: PlayerId) -> bool {
        match self {
            Self::Everyone => true,
            Self::AllExcept(excluded) => id != excluded,
            Self::Only(target) => id == target,
        }
    }
}

/// Encode `msg` once and queue it for every connection in `audience`.
///
/// Connections whose queue has already been dropped are skipped. Returns
/// the number of connections the frame was queued for.
pub fn fan_out(state: &HubState, msg: &ServerMessage, audience: Audience) -> HandlerResult<usize> {
    let frame: Frame = Arc::from(msg.encode()?);

    let deliver = |id: PlayerId, peer: &Peer| {
        let queued = peer.send(&frame);
        if !queued {
            debug!(%id, kind = msg.kind(), "Send to closed connection dropped");
        }
        queued
    };

    let reached = match audience {
        Audience::Only(target) => state.peer(target).is_some_and(|peer| deliver(target, peer)) as usize,
        _ => state
            .peers()
            .filter(|(id, _)| audience.includes(*id))
            .filter(|(id, peer)| deliver(*id, *peer))
            .count(),
    };

    metrics::record_fanout(reached);
    debug!(kind = msg.kind(), ?audience, reached, "Fan-out");
    Ok(reached)
}
