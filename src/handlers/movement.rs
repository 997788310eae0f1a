//! `move`: update the sender's position.

use super::{Audience, Context, fan_out};
use crate::config::MovePolicy;
use crate::error::HandlerResult;
use crate::metrics;
use crate::state::PlayerUpdate;
use relay_proto::{Position, ServerMessage};
use tracing::{debug, info};

pub(super) fn handle(ctx: &mut Context<'_>, position: Position) -> HandlerResult {
    let id = ctx.id;
    let known = ctx.state.directory().contains(id);

    match (known, ctx.policy) {
        (true, _) => {
            ctx.state.directory_mut().upsert(id, PlayerUpdate::position(position));
            fan_out(ctx.state, &ServerMessage::PlayerMove { id, position }, Audience::AllExcept(id))?;
        }
        (false, MovePolicy::Upsert) => {
            let info = ctx.state.directory_mut().upsert(id, PlayerUpdate::position(position)).info();
            metrics::set_active_players(ctx.state.directory().len());
            info!(%id, username = %info.username, "Guest created by move");
            fan_out(ctx.state, &ServerMessage::PlayerJoined(info), Audience::AllExcept(id))?;
        }
        (false, MovePolicy::RequireJoin) => {
            debug!(%id, "Move before join ignored");
        }
    }
    Ok(())
}
