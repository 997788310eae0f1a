//! State management module.
//!
//! Contains the Hub (shared relay state), the session directory, and
//! identity generation.

mod directory;
mod hub;
mod uid;

pub use directory::{Directory, Player, PlayerUpdate, guest_name};
pub use hub::{Frame, Hub, HubState, Peer, SessionPhase};
pub use uid::IdGenerator;
