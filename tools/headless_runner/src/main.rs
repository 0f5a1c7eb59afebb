//! Plays a tower-defense session without a window.
//!
//! A scripted player places towers next to the path as money allows,
//! upgrades them once the field is full, and starts waves back to back.

use clap::Parser;
use glam::Vec2;
use sim_core::{ActionEnvelope, Micros};
use sim_host::MatchHost;
use sim_td::geometry::distance_to_segment;
use sim_td::{TdAction, TdConfig, TdEvent, TdGame, TdState, TowerKind};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "headless-runner")]
#[command(about = "Run a scripted tower-defense session without rendering")]
struct Args {
    /// Pace ticks at the configured tick rate instead of running flat out
    #[arg(short, long)]
    realtime: bool,

    /// Stop after this many ticks
    #[arg(long, default_value = "36000")]
    max_ticks: u64,

    /// Stop once this many waves have been cleared
    #[arg(long, default_value = "10")]
    waves: u32,

    /// Towers to build before switching to upgrades
    #[arg(long, default_value = "10")]
    max_towers: usize,

    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Print the final observation as JSON
    #[arg(long)]
    dump_observation: bool,

    /// Print the observation JSON schema and exit
    #[arg(long)]
    print_schema: bool,
}

const BUILD_ORDER: [TowerKind; 5] = [
    TowerKind::Basic,
    TowerKind::Rapid,
    TowerKind::Slow,
    TowerKind::Sniper,
    TowerKind::Splash,
];

/// Decides which commands to submit each tick.
struct Autoplayer {
    candidates: Vec<Vec2>,
    max_towers: usize,
    waves: u32,
    next_action_id: u64,
}

impl Autoplayer {
    fn new(config: &TdConfig, max_towers: usize, waves: u32) -> Self {
        let state = TdState::new(config.clone());
        let cols = (config.width / config.grid_size) as u32;
        let rows = (config.height / config.grid_size) as u32;

        // Every open cell, closest to the path first.
        let mut candidates: Vec<(f32, Vec2)> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (col, row)))
            .filter_map(|(col, row)| {
                let raw = Vec2::new(col as f32, row as f32) * config.grid_size;
                state.can_place_tower(raw)
            })
            .map(|cell| {
                let dist = config
                    .path
                    .windows(2)
                    .map(|seg| distance_to_segment(cell, seg[0], seg[1]))
                    .fold(f32::INFINITY, f32::min);
                (dist, cell)
            })
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        Self {
            candidates: candidates.into_iter().map(|(_, cell)| cell).collect(),
            max_towers,
            waves,
            next_action_id: 0,
        }
    }

    fn done(&self, state: &TdState) -> bool {
        state.wave > self.waves && !state.waves.in_progress
    }

    fn decide(&mut self, state: &TdState) -> Option<TdAction> {
        if state.is_over() {
            return None;
        }

        if !state.waves.in_progress && state.wave <= self.waves {
            return Some(TdAction::StartWave);
        }

        let placed = state.world.towers.len();
        if placed < self.max_towers {
            let kind = BUILD_ORDER[placed % BUILD_ORDER.len()];
            if state.money < state.config.tower_spec(kind).cost {
                return None;
            }
            let cell = self
                .candidates
                .iter()
                .copied()
                .find(|&cell| state.can_place_tower(cell).is_some())?;
            return Some(TdAction::PlaceTower {
                x: cell.x,
                y: cell.y,
                kind,
            });
        }

        state
            .world
            .towers
            .iter()
            .filter(|(_, t)| !t.is_max_level())
            .min_by_key(|(_, t)| t.upgrade_cost())
            .filter(|(_, t)| t.upgrade_cost() <= state.money)
            .map(|(tower_id, _)| TdAction::UpgradeTower { tower_id })
    }

    fn submit(&mut self, host: &mut MatchHost<TdGame>, player: u8) {
        let tick = host.current_tick() + 1;
        if let Some(action) = self.decide(host.game().state()) {
            host.submit(ActionEnvelope::new(player, self.next_action_id, tick, action));
            self.next_action_id += 1;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.print_schema {
        let schema = schemars::schema_for!(td_types::TdObservation);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let config = TdConfig::default();
    let tick_hz = config.tick_hz;
    let mut player = Autoplayer::new(&config, args.max_towers, args.waves);
    let mut host = MatchHost::<TdGame>::new(config, args.seed, tick_hz);
    let player_id = host.join_player();

    tracing::info!(
        seed = host.game().seed(),
        candidates = player.candidates.len(),
        waves = args.waves,
        realtime = args.realtime,
        "starting session"
    );

    let events = run(&mut host, &mut player, player_id, &args);

    println!("\n=== Tower Defense Session Complete ===");
    println!("Outcome: {:?}", host.is_terminal());
    println!("Final tick: {}", host.current_tick());
    print_status(&host);
    print_event_summary(&events);

    if args.dump_observation {
        println!("{}", serde_json::to_string_pretty(&host.observe())?);
    }

    Ok(())
}

fn run(
    host: &mut MatchHost<TdGame>,
    player: &mut Autoplayer,
    player_id: u8,
    args: &Args,
) -> Vec<TdEvent> {
    let tick_duration = Micros::per_tick(host.tick_hz()).as_std();
    let mut last_status = Instant::now();
    let mut all_events = Vec::new();

    while host.current_tick() < args.max_ticks && !player.done(host.game().state()) {
        let tick_start = Instant::now();

        player.submit(host, player_id);
        let Some(events) = host.step_one_tick() else {
            break;
        };

        for event in &events {
            print_event(host.current_tick(), event);
        }
        all_events.extend(events);

        if args.realtime {
            if last_status.elapsed() >= Duration::from_secs(1) {
                print_status(host);
                last_status = Instant::now();
            }

            let elapsed = tick_start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            }
        }
    }

    all_events
}

fn print_event(tick: u64, event: &TdEvent) {
    match event {
        TdEvent::TowerPlaced { x, y, kind, .. } => {
            println!("[{:>6}] {} tower placed at ({}, {})", tick, kind.name(), x, y)
        }
        TdEvent::TowerUpgraded { level, .. } => {
            println!("[{:>6}] Tower upgraded to level {}", tick, level)
        }
        TdEvent::WaveStarted { wave, size } => {
            println!("[{:>6}] === Wave {} started ({} enemies) ===", tick, wave, size)
        }
        TdEvent::WaveCompleted { wave, bonus } => {
            println!("[{:>6}] === Wave {} cleared, bonus {} ===", tick, wave, bonus)
        }
        TdEvent::EnemyLeaked { damage, .. } => {
            println!("[{:>6}] Enemy leaked! -{} lives", tick, damage)
        }
        TdEvent::GameOver { wave } => println!("[{:>6}] GAME OVER on wave {}", tick, wave),
        TdEvent::Rejected { reason } => println!("[{:>6}] Rejected: {}", tick, reason),
        TdEvent::EnemySpawned { .. }
        | TdEvent::EnemyKilled { .. }
        | TdEvent::ProjectileFired { .. } => {}
    }
}

fn print_status(host: &MatchHost<TdGame>) {
    let state = host.game().state();
    let time_secs = host.current_tick() as f64 / host.tick_hz() as f64;
    println!(
        "  [{:>6.1}s] Wave {}, Enemies: {}, Towers: {}, Projectiles: {}, Money: {}, Lives: {}",
        time_secs,
        state.wave,
        state.world.enemies.len(),
        state.world.towers.len(),
        state.world.projectiles.len(),
        state.money,
        state.lives,
    );
}

fn print_event_summary(events: &[TdEvent]) {
    let mut towers_placed = 0;
    let mut upgrades = 0;
    let mut waves_started = 0;
    let mut waves_cleared = 0;
    let mut spawned = 0;
    let mut killed = 0;
    let mut leaked = 0;
    let mut shots = 0;
    let mut rejected = 0;

    for event in events {
        match event {
            TdEvent::TowerPlaced { .. } => towers_placed += 1,
            TdEvent::TowerUpgraded { .. } => upgrades += 1,
            TdEvent::WaveStarted { .. } => waves_started += 1,
            TdEvent::WaveCompleted { .. } => waves_cleared += 1,
            TdEvent::EnemySpawned { .. } => spawned += 1,
            TdEvent::EnemyKilled { .. } => killed += 1,
            TdEvent::EnemyLeaked { .. } => leaked += 1,
            TdEvent::ProjectileFired { .. } => shots += 1,
            TdEvent::Rejected { .. } => rejected += 1,
            TdEvent::GameOver { .. } => {}
        }
    }

    println!("\n=== Event Summary ===");
    println!("Towers placed: {}", towers_placed);
    println!("Upgrades: {}", upgrades);
    println!("Waves started: {}", waves_started);
    println!("Waves cleared: {}", waves_cleared);
    println!("Enemies spawned: {}", spawned);
    println!("Enemies killed: {}", killed);
    println!("Enemies leaked: {}", leaked);
    println!("Shots fired: {}", shots);
    println!("Rejected commands: {}", rejected);
}
