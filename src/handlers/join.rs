//! `join`: create or replace the sender's directory record.

use super::{Audience, Context, fan_out};
use crate::error::HandlerResult;
use crate::metrics;
use crate::state::PlayerUpdate;
use relay_proto::{DEFAULT_COLOR, Position, ServerMessage};
use tracing::info;

pub(super) fn handle(
    ctx: &mut Context<'_>,
    username: String,
    color: Option<u32>,
    position: Option<Position>,
) -> HandlerResult {
    let update = PlayerUpdate {
        username: Some(username),
        color: Some(color.unwrap_or(DEFAULT_COLOR)),
        position: Some(position.unwrap_or_default()),
    };
    let info = ctx.state.directory_mut().upsert(ctx.id, update).info();
    metrics::set_active_players(ctx.state.directory().len());

    info!(id = %ctx.id, username = %info.username, color = info.color, "Player joined");
    fan_out(ctx.state, &ServerMessage::PlayerJoined(info), Audience::AllExcept(ctx.id))?;
    Ok(())
}
