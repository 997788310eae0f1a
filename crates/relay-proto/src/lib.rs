//! # relay-proto
//!
//! Wire types for the presence relay: the JSON envelopes exchanged between
//! participants and the relay over a WebSocket, one envelope per frame.
//!
//! Every envelope is a JSON object with a `type` discriminator. Inbound
//! envelopes ([`ClientMessage`]) are produced by [`decode`], which also applies
//! the field bounds (usernames and chat bodies are truncated). Outbound
//! envelopes ([`ServerMessage`]) are serialized with [`ServerMessage::encode`].
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_proto::{decode, ClientMessage, MAX_USERNAME_CHARS};
//!
//! let msg = decode(r#"{"type":"join","username":"a-rather-long-player-name"}"#).unwrap();
//! match msg {
//!     ClientMessage::Join { username, .. } => {
//!         assert_eq!(username.chars().count(), MAX_USERNAME_CHARS);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod id;
pub mod inbound;
pub mod outbound;
pub mod text;
pub mod types;

pub use error::{ProtoError, Result};
pub use id::PlayerId;
pub use inbound::{decode, ClientMessage, MessageKind};
pub use outbound::ServerMessage;
pub use text::{truncate_chars, MAX_CHAT_CHARS, MAX_USERNAME_CHARS};
pub use types::{PlayerInfo, Position, DEFAULT_COLOR};
