//! Fixed-interval simulation tick
//!
//! Advances the creature exactly one cell. This is the only code that moves
//! the creature or ends a run.

use super::direction::Direction;
use super::grid::is_in_bounds;
use super::resources::{ConsumptionReport, apply_consumption};
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Turn request, filtered through the no-reverse rule before moving
    pub direction: Option<Direction>,
    /// Start a new run if the current one is over
    pub restart: bool,
}

/// What happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain move (possibly paying off growth debt)
    Moved,
    /// Head landed on the food
    Consumed(ConsumptionReport),
    /// Head would have left the grid; run is over
    HitWall,
    /// Head would have entered the body with no phase left; run is over
    HitSelf,
    /// Run already over, nothing moved
    Halted,
}

impl TickOutcome {
    pub fn ends_run(&self) -> bool {
        matches!(self, TickOutcome::HitWall | TickOutcome::HitSelf)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.restart && state.game_over {
        state.reset();
    }
    if let Some(direction) = input.direction {
        state.request_direction(direction);
    }

    if state.game_over {
        return TickOutcome::Halted;
    }
    let Some(head) = state.head() else {
        return TickOutcome::Halted;
    };

    state.direction = state.queued_direction;
    let new_head = head + state.direction.delta();

    if !is_in_bounds(new_head) {
        end_run(state, "wall");
        return TickOutcome::HitWall;
    }

    let hits_body = state.creature.iter().skip(1).any(|&c| c == new_head);
    if hits_body && !state.is_phasing() {
        end_run(state, "self");
        return TickOutcome::HitSelf;
    }

    state.creature.push_front(new_head);
    state.time_ticks += 1;

    // A consuming tick always keeps its tail; growth debt and phase wait
    // for the next plain move.
    if new_head == state.food.position {
        let kind = state.food.kind;
        return TickOutcome::Consumed(apply_consumption(state, kind));
    }

    if state.growth_debt > 0 {
        state.growth_debt -= 1;
    } else {
        state.creature.pop_back();
    }

    if state.phase_turns > 0 {
        state.phase_turns -= 1;
    }

    TickOutcome::Moved
}

/// Pure form of [`tick`]: returns the successor state, leaving `state` untouched
pub fn step(state: &GameState, input: &TickInput) -> GameState {
    let mut next = state.clone();
    tick(&mut next, input);
    next
}

/// A fatal move still spends a phase turn; only the creature stays put.
fn end_run(state: &mut GameState, cause: &str) {
    state.game_over = true;
    state.phase_turns = state.phase_turns.saturating_sub(1);
    log::info!(
        "Game over ({}): score {}, length {}, after {} ticks",
        cause,
        state.score,
        state.creature.len(),
        state.time_ticks
    );
}
