/// Simulation step counter. Tick 0 is the state before the first step.
pub type Tick = u64;

/// Identifies the submitter of an action.
pub type PlayerId = u8;

/// Per-player sequence number, used to order actions within a tick.
pub type ActionId = u64;
