//! The Hub - owned state shared by every connection task.
//!
//! The hub pairs the session [`Directory`] with the set of live connections
//! and guards both with one coarse lock. Every directory mutation and the
//! broadcast it triggers happen under that lock, so the two are atomic with
//! respect to events from other connections. The lock is never held across
//! an `.await`: outbound frames go to unbounded per-connection queues that
//! each connection task drains on its own.

use crate::config::MovePolicy;
use crate::error::HandlerResult;
use crate::handlers::fanout::{Audience, fan_out};
use crate::metrics;
use crate::state::{Directory, IdGenerator, Player};
use parking_lot::{Mutex, MutexGuard};
use relay_proto::{PlayerId, ServerMessage};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One encoded outbound envelope, shared by every recipient.
pub type Frame = Arc<str>;

/// Outbound half of a live connection.
#[derive(Debug)]
pub struct Peer {
    addr: SocketAddr,
    tx: mpsc::UnboundedSender<Frame>,
}

impl Peer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queue a frame for this connection.
    ///
    /// Returns `false` if the connection task has already stopped reading
    /// its queue; the frame is discarded.
    pub fn send(&self, frame: &Frame) -> bool {
        self.tx.send(Arc::clone(frame)).is_ok()
    }
}

/// Where a connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Open, but no directory record yet.
    Connected,
    /// Open with a directory record.
    Active,
}

/// Everything guarded by the hub lock.
#[derive(Debug, Default)]
pub struct HubState {
    directory: Directory,
    peers: HashMap<PlayerId, Peer>,
}

impl HubState {
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub(crate) fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn peer(&self, id: PlayerId) -> Option<&Peer> {
        self.peers.get(&id)
    }

    /// Live connections, in no particular order.
    pub fn peers(&self) -> impl Iterator<Item = (PlayerId, &Peer)> {
        self.peers.iter().map(|(id, peer)| (*id, peer))
    }

    pub fn is_connected(&self, id: PlayerId) -> bool {
        self.peers.contains_key(&id)
    }
}

/// Shared relay state: directory, live connections, identity allocation.
pub struct Hub {
    state: Mutex<HubState>,
    ids: IdGenerator,
    policy: MovePolicy,
}

impl Hub {
    pub fn new(policy: MovePolicy) -> Self {
        Self {
            state: Mutex::new(HubState::default()),
            ids: IdGenerator::new(),
            policy,
        }
    }

    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    /// Enter the critical section.
    pub(crate) fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock()
    }

    /// Register a freshly opened connection.
    ///
    /// Assigns its identity and queues the `players` snapshot as its first
    /// frame. Registration and snapshot happen under one lock, so the new
    /// connection sees exactly the participants whose later departures it
    /// will be told about.
    pub fn connect(&self, addr: SocketAddr) -> HandlerResult<(PlayerId, mpsc::UnboundedReceiver<Frame>)> {
        let id = self.ids.next();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut state = self.lock();
        let players = state.directory.snapshot().iter().map(Player::info).collect();
        state.peers.insert(id, Peer { addr, tx });

        if let Err(e) = fan_out(&state, &ServerMessage::Players { players }, Audience::Only(id)) {
            state.peers.remove(&id);
            return Err(e);
        }
        drop(state);

        metrics::record_connection_opened();
        info!(%id, %addr, "Connection registered");
        Ok((id, rx))
    }

    /// Tear down a connection. Safe to call more than once.
    ///
    /// If the connection had joined, its record is removed and `playerLeft`
    /// goes to every remaining connection. Returns the removed record.
    pub fn disconnect(&self, id: PlayerId) -> Option<Player> {
        let mut state = self.lock();
        let peer = state.peers.remove(&id);
        let player = state.directory.remove(id);

        if let Some(ref player) = player {
            let left = ServerMessage::PlayerLeft {
                id,
                username: player.username.clone(),
            };
            if let Err(e) = fan_out(&state, &left, Audience::Everyone) {
                warn!(%id, error = %e, "Failed to announce departure");
            }
        }
        metrics::set_active_players(state.directory.len());
        drop(state);

        match peer {
            Some(peer) => {
                metrics::record_connection_closed();
                info!(%id, addr = %peer.addr(), joined = player.is_some(), "Connection unregistered");
            }
            None => debug!(%id, "Disconnect for unregistered connection ignored"),
        }
        player
    }

    /// Point-in-time copy of the directory.
    pub fn snapshot(&self) -> Vec<Player> {
        self.lock().directory.snapshot()
    }

    /// Lifecycle phase of a connection, or `None` once it has terminated.
    pub fn phase(&self, id: PlayerId) -> Option<SessionPhase> {
        let state = self.lock();
        if !state.is_connected(id) {
            return None;
        }
        Some(if state.directory.contains(id) {
            SessionPhase::Active
        } else {
            SessionPhase::Connected
        })
    }

    pub fn peer_count(&self) -> usize {
        self.lock().peers.len()
    }

    pub fn player_count(&self) -> usize {
        self.lock().directory.len()
    }
}
