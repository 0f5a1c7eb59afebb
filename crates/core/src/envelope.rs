use crate::types::{ActionId, PlayerId, Tick};

/// An action together with the bookkeeping a host needs to schedule it.
///
/// Hosts order the envelopes of one tick by `(player_id, action_id)` before
/// handing them to [`crate::Game::step`], so replaying the same envelopes
/// yields the same run.
#[derive(Clone, Debug)]
pub struct ActionEnvelope<A> {
    pub player_id: PlayerId,
    pub action_id: ActionId,
    pub intended_tick: Tick,
    pub payload: A,
}

impl<A> ActionEnvelope<A> {
    pub fn new(player_id: PlayerId, action_id: ActionId, intended_tick: Tick, payload: A) -> Self {
        Self {
            player_id,
            action_id,
            intended_tick,
            payload,
        }
    }
}
