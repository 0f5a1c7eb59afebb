use crate::actions::TdAction;
use crate::config::TdConfig;
use crate::events::TdEvent;
use crate::world::TdState;
use glam::Vec2;
use sim_core::{ActionEnvelope, Game, TerminalOutcome, Tick};

pub struct TdGame {
    state: TdState,
    seed: u64,
}

impl TdGame {
    pub fn state(&self) -> &TdState {
        &self.state
    }

    /// The simulation has no randomness; the seed is kept for replay logs.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Start the session over from the initial config.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn apply(&mut self, action: &TdAction, events: &mut Vec<TdEvent>) {
        // Rejections are already reported through `events`.
        let _ = match *action {
            TdAction::PlaceTower { x, y, kind } => self
                .state
                .request_place_tower(Vec2::new(x, y), kind, events)
                .map(|_| ()),
            TdAction::UpgradeTower { tower_id } => {
                self.state.request_upgrade(tower_id, events).map(|_| ())
            }
            TdAction::StartWave => self.state.start_wave(events).map(|_| ()),
        };
    }
}

impl Game for TdGame {
    type Config = TdConfig;
    type Action = TdAction;
    type Observation = td_types::TdObservation;
    type Event = TdEvent;

    fn new(config: Self::Config, seed: u64) -> Self {
        Self {
            state: TdState::new(config),
            seed,
        }
    }

    fn step(
        &mut self,
        _tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        // 1. Commands, in host order, before anything moves
        for action in actions {
            self.apply(&action.payload, out_events);
        }

        // 2. Spawning, towers, enemies, projectiles
        self.state.tick(out_events);
    }

    fn observe(&self, tick: Tick) -> Self::Observation {
        crate::observe::build_observation(&self.state, tick)
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.state.is_over().then_some(TerminalOutcome::Lose)
    }
}
