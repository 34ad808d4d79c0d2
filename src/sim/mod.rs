//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell of movement per tick, no wall-clock time
//! - Seeded RNG only
//! - Row-major iteration wherever order can leak into randomness
//! - No rendering or platform dependencies

pub mod direction;
pub mod food;
pub mod grid;
pub mod resources;
pub mod state;
pub mod tick;

pub use direction::Direction;
pub use food::{FOOD_TYPES, Food, FoodConfig, FoodType, pick_food_type, spawn_food};
pub use grid::{Cell, free_cells, initial_creature, is_in_bounds};
pub use resources::{ConsumptionReport, apply_consumption, next_harmony, speed_ms};
pub use state::{GameState, Snapshot};
pub use tick::{TickInput, TickOutcome, step, tick};
