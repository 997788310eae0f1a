//! `chat`: relay a short text message to everyone, sender included.

use super::{Audience, Context, fan_out};
use crate::error::HandlerResult;
use crate::state::guest_name;
use relay_proto::ServerMessage;

pub(super) fn handle(ctx: &mut Context<'_>, message: String) -> HandlerResult {
    let id = ctx.id;
    let username = ctx
        .state
        .directory()
        .get(id)
        .map(|player| player.username.clone())
        .unwrap_or_else(|| guest_name(id));

    fan_out(ctx.state, &ServerMessage::Chat { id, username, message }, Audience::Everyone)?;
    Ok(())
}
