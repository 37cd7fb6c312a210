//! Gridfall entry point
//!
//! Headless demo driver for the simulation engine: plays a seeded run with a
//! small autoplayer, renders each tick as text, and prints a JSON run summary
//! on exit. This is the external driver role from the engine's contract; the
//! graphical front end is not part of this crate.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::IVec2;
use serde::Serialize;

use gridfall::consts::GRID_SIZE;
use gridfall::persistence;
use gridfall::sim::{Direction, Entity, GameState, Outcome, ShotKind, advance, fire, rotate};

/// Input actions available to the autoplayer between ticks
#[derive(Debug, Clone, Copy)]
enum Action {
    Rotate(Direction),
    Fire(ShotKind),
    Idle,
}

/// Actions the autoplayer may take between two ticks
const ACTIONS_PER_TICK: u32 = 3;

/// Default number of ticks in a demo run
const DEFAULT_MAX_TICKS: u32 = 60;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u32,
    collected: u32,
    destroyed: u32,
    total_shots: u32,
    outcome: Outcome,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(clock_seed);
    let max_ticks: u32 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    log::info!("Gridfall demo starting (seed {seed}, up to {max_ticks} ticks)");

    let mut state = GameState::new(GRID_SIZE, seed);
    let mut ticks = 0;

    for tick in 1..=max_ticks {
        for _ in 0..ACTIONS_PER_TICK {
            match choose_action(&state) {
                Action::Rotate(direction) => rotate(&mut state, direction),
                Action::Fire(shot) => fire(&mut state, shot),
                Action::Idle => break,
            }
        }

        advance(&mut state);
        ticks = tick;

        println!("tick {tick}");
        print!("{}", render(&state));
        println!(
            "collected {} | destroyed {} | shots {}",
            state.collected(),
            state.destroyed(),
            state.total_shots()
        );

        match state.outcome() {
            Outcome::Undecided => {}
            Outcome::Won => {
                log::info!("collection target reached on tick {tick}");
                break;
            }
            Outcome::Lost => {
                log::info!("a destroyable reached the player on tick {tick}");
                break;
            }
        }
    }

    // Exercise the save codec on the final state
    let save_text = persistence::encode(&state);
    match persistence::decode(&save_text) {
        Ok(save) => log::info!("save codec round trip ok ({} entities)", save.entities.len()),
        Err(error) => log::error!("save codec round trip failed: {error}"),
    }

    let summary = RunSummary {
        seed,
        ticks,
        collected: state.collected(),
        destroyed: state.destroyed(),
        total_shots: state.total_shots(),
        outcome: state.outcome(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Pick the next action: fire at whatever the player's column offers first,
/// otherwise steer the most pressing entity into the column.
fn choose_action(state: &GameState) -> Action {
    let player = state.player_position();

    // Nearest-first scan of the player's column, mirroring shot resolution
    for row in 1..state.size() {
        match state.grid().get(IVec2::new(player.x, row)) {
            Some(Entity::Collectable) => return Action::Fire(ShotKind::Collect),
            Some(Entity::Destroyable) | Some(Entity::Bomb) => {
                return Action::Fire(ShotKind::Destroy);
            }
            // A blocker occludes the whole column; rotate something new in
            Some(Entity::Blocker) => return Action::Rotate(Direction::Right),
            Some(Entity::Player) | None => {}
        }
    }

    // Urgent: a destroyable about to breach gets pulled into the column
    let threat = nearest(state, Entity::Destroyable);
    if let Some(position) = threat {
        if position.y <= 2 {
            return Action::Rotate(steer_toward(position, player, state.size()));
        }
    }

    if let Some(position) = nearest(state, Entity::Collectable) {
        return Action::Rotate(steer_toward(position, player, state.size()));
    }
    if let Some(position) = threat {
        return Action::Rotate(steer_toward(position, player, state.size()));
    }

    Action::Idle
}

/// Lowest (then leftmost) entity of the given kind
fn nearest(state: &GameState, kind: Entity) -> Option<IVec2> {
    state
        .grid()
        .entities()
        .iter()
        .filter(|&(_, &entity)| entity == kind)
        .map(|(&position, _)| position)
        .min_by_key(|position| (position.y, position.x))
}

/// Rotation direction that moves `target` toward the player's column in the
/// fewest wrapping steps
fn steer_toward(target: IVec2, player: IVec2, size: i32) -> Direction {
    let right_steps = (player.x - target.x).rem_euclid(size);
    let left_steps = (target.x - player.x).rem_euclid(size);
    if right_steps <= left_steps {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Text rendering of the serialized grid, player's row on top
fn render(state: &GameState) -> String {
    let cells = state.grid().serialize();
    let size = state.size();
    let mut out = String::with_capacity((size * (size + 1)) as usize);
    for y in 0..size {
        for x in 0..size {
            out.push(cells.get(&(x, y)).copied().unwrap_or('.'));
        }
        out.push('\n');
    }
    out
}
