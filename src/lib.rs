//! Chromatic Current - A single-screen elemental snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, consumption, harmony)
//! - `input`: Gesture/key translation into directions
//! - `clock`: Reschedulable tick timer and the session that drives it
//! - `settings`: Player preferences loaded from JSON

pub mod clock;
pub mod input;
pub mod settings;
pub mod sim;

pub use clock::{Clock, IntervalTimer, Session, TimerHandle};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Width and height of the square play field, in cells
    pub const GRID_SIZE: i32 = 18;

    /// Harmony bounds and starting value
    pub const HARMONY_MIN: u8 = 0;
    pub const HARMONY_MAX: u8 = 6;
    pub const START_HARMONY: u8 = 3;

    /// Cap on ticks of self-intersection immunity
    pub const MAX_PHASE_TURNS: u8 = 12;

    /// Segments in a freshly spawned creature
    pub const START_LENGTH: usize = 3;

    /// Tick interval curve: `max(MIN_TICK_MS, BASE_TICK_MS - harmony * HARMONY_TICK_STEP_MS)`
    pub const BASE_TICK_MS: u64 = 230;
    pub const HARMONY_TICK_STEP_MS: u64 = 25;
    pub const MIN_TICK_MS: u64 = 80;
}
