//! Game state and the render snapshot
//!
//! Everything a tick reads or writes lives in [`GameState`]. Hosts only ever
//! see it through [`Snapshot`].

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::direction::Direction;
use super::food::{Food, FoodType, spawn_food};
use super::grid::{Cell, initial_creature};
use super::resources::speed_ms;
use crate::consts::START_HARMONY;

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of food positions and types
    pub rng: Pcg32,
    /// Segments, head first
    pub creature: VecDeque<Cell>,
    pub food: Food,
    pub score: u64,
    /// 0..=HARMONY_MAX
    pub harmony: u8,
    /// Extra segments still owed to the creature
    pub growth_debt: u32,
    /// Remaining ticks of self-intersection immunity, 0..=MAX_PHASE_TURNS
    pub phase_turns: u8,
    pub last_consumed: Option<FoodType>,
    /// Direction applied on the most recent tick
    pub direction: Direction,
    /// Latest accepted intent, applied on the next tick
    pub queued_direction: Direction,
    pub game_over: bool,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let creature = initial_creature();
        let food = spawn_food(&creature, &mut rng);

        Self {
            seed,
            rng,
            creature,
            food,
            score: 0,
            harmony: START_HARMONY,
            growth_debt: 0,
            phase_turns: 0,
            last_consumed: None,
            direction: Direction::Right,
            queued_direction: Direction::Right,
            game_over: false,
            time_ticks: 0,
        }
    }

    /// Start over after a game over. The RNG keeps advancing, so the new
    /// run gets fresh food; everything else returns to its starting value.
    pub fn reset(&mut self) {
        self.creature = initial_creature();
        self.food = spawn_food(&self.creature, &mut self.rng);
        self.score = 0;
        self.harmony = START_HARMONY;
        self.growth_debt = 0;
        self.phase_turns = 0;
        self.last_consumed = None;
        self.direction = Direction::Right;
        self.queued_direction = Direction::Right;
        self.game_over = false;
        self.time_ticks = 0;
        log::info!("Run reset (seed {})", self.seed);
    }

    /// Queue a direction for the next tick.
    ///
    /// Compared against the queued direction rather than the one last applied,
    /// so two quick turns between ticks can never add up to a reversal.
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.queued_direction.is_opposite(direction) {
            return false;
        }
        self.queued_direction = direction;
        true
    }

    pub fn head(&self) -> Option<Cell> {
        self.creature.front().copied()
    }

    pub fn is_phasing(&self) -> bool {
        self.phase_turns > 0
    }

    /// Current tick interval, derived from harmony
    pub fn speed_ms(&self) -> u64 {
        speed_ms(self.harmony)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms())
    }

    /// Read-only view for a presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            creature: self.creature.iter().copied().collect(),
            food: self.food,
            score: self.score,
            harmony: self.harmony,
            phase_turns: self.phase_turns,
            last_consumed: self.last_consumed,
            speed_ms: self.speed_ms(),
            game_over: self.game_over,
        }
    }
}

/// What a renderer needs to draw the grid and HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub creature: Vec<Cell>,
    pub food: Food,
    pub score: u64,
    pub harmony: u8,
    pub phase_turns: u8,
    pub last_consumed: Option<FoodType>,
    pub speed_ms: u64,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.creature.len(), 3);
        assert_eq!(state.head(), Some(IVec2::new(10, 9)));
        assert_eq!(state.harmony, 3);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.creature.contains(&state.food.position));
    }

    #[test]
    fn test_request_direction_rejects_reversal_of_queued() {
        let mut state = GameState::new(1);
        assert!(!state.request_direction(Direction::Left));
        assert_eq!(state.queued_direction, Direction::Right);

        assert!(state.request_direction(Direction::Up));
        // Effective direction is still RIGHT, but LEFT is no longer a reversal
        // of the queued intent, and DOWN is.
        assert!(!state.request_direction(Direction::Down));
        assert_eq!(state.queued_direction, Direction::Up);
        assert!(state.request_direction(Direction::Left));
        assert_eq!(state.queued_direction, Direction::Left);
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new(9);
        state.score = 120;
        state.harmony = 6;
        state.phase_turns = 4;
        state.growth_debt = 2;
        state.last_consumed = Some(FoodType::Ember);
        state.direction = Direction::Up;
        state.queued_direction = Direction::Left;
        state.game_over = true;
        state.creature.push_front(IVec2::new(11, 9));

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.harmony, 3);
        assert_eq!(state.phase_turns, 0);
        assert_eq!(state.growth_debt, 0);
        assert_eq!(state.last_consumed, None);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.queued_direction, Direction::Right);
        assert!(!state.game_over);
        assert_eq!(state.creature, initial_creature());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["harmony"], 3);
        assert_eq!(json["speed_ms"], 155);
        assert_eq!(json["creature"].as_array().unwrap().len(), 3);
        assert!(json["last_consumed"].is_null());
    }
}
