//! `damage`: point-to-point notice to a single target connection.

use super::{Audience, Context, fan_out};
use crate::error::HandlerResult;
use relay_proto::{PlayerId, ServerMessage};
use tracing::debug;

pub(super) fn handle(ctx: &mut Context<'_>, target: PlayerId, damage: f64) -> HandlerResult {
    let msg = ServerMessage::Damage { damage, from: ctx.id };
    if fan_out(ctx.state, &msg, Audience::Only(target))? == 0 {
        debug!(from = %ctx.id, %target, "Damage target not connected");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::MovePolicy;
    use crate::handlers::dispatch;
    use crate::state::Hub;
    use crate::test_support::{addr, drain};
    use relay_proto::decode;

    #[test]
    fn damage_to_missing_target_sends_nothing() {
        let hub = Hub::new(MovePolicy::RequireJoin);
        let (a, mut ra) = hub.connect(addr()).unwrap();
        let (b, mut rb) = hub.connect(addr()).unwrap();
        drain(&mut ra);
        drain(&mut rb);
        hub.disconnect(b);

        let raw = format!(r#"{{"type":"damage","targetId":{b},"damage":10}}"#);
        dispatch(&hub, a, decode(&raw).unwrap()).unwrap();

        assert!(drain(&mut ra).is_empty());
        assert!(drain(&mut rb).is_empty());
    }

    #[test]
    fn string_target_and_amount_alias_are_accepted() {
        let hub = Hub::new(MovePolicy::RequireJoin);
        let (a, mut ra) = hub.connect(addr()).unwrap();
        let (b, mut rb) = hub.connect(addr()).unwrap();
        drain(&mut ra);
        drain(&mut rb);

        let raw = format!(r#"{{"type":"damage","targetId":"{b}","amount":12.5}}"#);
        dispatch(&hub, a, decode(&raw).unwrap()).unwrap();

        let frames = drain(&mut rb);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["damage"], 12.5);
        assert_eq!(frames[0]["from"], a.get());
        assert!(drain(&mut ra).is_empty());
    }
}
