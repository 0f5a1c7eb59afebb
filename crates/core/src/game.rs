use crate::envelope::ActionEnvelope;
use crate::types::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Win,
    Lose,
}

/// A simulation advanced one fixed step at a time.
///
/// `step` must be deterministic: the same config, seed and action sequence
/// always produce the same events and observations. Nothing in a step may
/// block or depend on wall-clock time.
pub trait Game: Sized {
    type Config: Clone;
    type Action: Clone;
    type Observation: Clone;
    type Event: Clone;

    fn new(config: Self::Config, seed: u64) -> Self;

    /// Apply `actions` (already sorted by the host) and advance one tick.
    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    );

    /// Read-only snapshot for renderers and agents.
    fn observe(&self, tick: Tick) -> Self::Observation;

    fn is_terminal(&self) -> Option<TerminalOutcome>;
}
