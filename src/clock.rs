//! Tick scheduling
//!
//! The simulation never looks at wall-clock time. A [`Session`] owns the game
//! state and keeps exactly one periodic timer armed on a host-provided
//! [`Clock`], re-arming it whenever harmony changes the tick interval.

use std::fmt;
use std::time::{Duration, Instant};

use crate::sim::{Direction, GameState, Snapshot, TickInput, TickOutcome, tick};

/// Reschedulable periodic callback source
pub trait Clock {
    type Handle: Copy + Eq + fmt::Debug;

    /// Start a repeating timer firing every `interval`
    fn schedule(&mut self, interval: Duration) -> Self::Handle;

    /// Stop a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Handle for timers issued by [`IntervalTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    next_fire: Instant,
}

/// Monotonic-clock timers for native hosts that poll for due ticks
#[derive(Debug, Default)]
pub struct IntervalTimer {
    next_id: u64,
    timers: Vec<Interval>,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Earliest pending fire time, for sizing a poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.next_fire).min()
    }

    /// Timers due at `now`. Each fires at most once per call; missed
    /// periods are dropped rather than replayed in a burst.
    pub fn due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if timer.next_fire <= now {
                fired.push(timer.handle);
                timer.next_fire = now + timer.period;
            }
        }
        fired
    }
}

impl Clock for IntervalTimer {
    type Handle = TimerHandle;

    fn schedule(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Interval {
            handle,
            period: interval,
            next_fire: Instant::now() + interval,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

#[derive(Debug, Clone, Copy)]
struct ArmedTimer<H> {
    handle: H,
    interval: Duration,
}

/// A running game bound to a clock
#[derive(Debug)]
pub struct Session<C: Clock> {
    state: GameState,
    clock: C,
    timer: Option<ArmedTimer<C::Handle>>,
}

impl<C: Clock> Session<C> {
    /// Start a new run and arm its tick timer
    pub fn new(clock: C, seed: u64) -> Self {
        log::info!("New run with seed: {}", seed);
        Self::with_state(clock, GameState::new(seed))
    }

    /// Drive an existing state (arms the timer unless it is already over)
    pub fn with_state(clock: C, state: GameState) -> Self {
        let mut session = Self {
            state,
            clock,
            timer: None,
        };
        session.sync_timer();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Interval of the armed timer, `None` while stopped
    pub fn interval(&self) -> Option<Duration> {
        self.timer.map(|t| t.interval)
    }

    /// Forward a turn request. Never advances the simulation.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.state.request_direction(direction)
    }

    /// Timer callback. Runs one tick if `handle` is the armed timer;
    /// stale handles from cancelled timers are ignored.
    pub fn fire(&mut self, handle: C::Handle) -> Option<TickOutcome> {
        match self.timer {
            Some(armed) if armed.handle == handle => {}
            _ => {
                log::debug!("Ignoring stale timer {:?}", handle);
                return None;
            }
        }

        let outcome = tick(&mut self.state, &TickInput::default());
        self.sync_timer();
        Some(outcome)
    }

    /// Start a new run after a game over (or abandon the current one)
    pub fn reset(&mut self) {
        self.state.reset();
        self.sync_timer();
    }

    /// Keep the timer consistent with the state: stopped on game over,
    /// otherwise armed at the harmony-derived interval.
    fn sync_timer(&mut self) {
        if self.state.game_over {
            self.stop_timer();
            return;
        }

        let interval = self.state.tick_interval();
        if let Some(armed) = self.timer {
            if armed.interval == interval {
                return;
            }
            self.clock.cancel(armed.handle);
        }
        let handle = self.clock.schedule(interval);
        log::debug!("Tick interval now {}ms", interval.as_millis());
        self.timer = Some(ArmedTimer { handle, interval });
    }

    fn stop_timer(&mut self) {
        if let Some(armed) = self.timer.take() {
            self.clock.cancel(armed.handle);
        }
    }
}

impl<C: Clock> Drop for Session<C> {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
