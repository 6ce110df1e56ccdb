//! Engine contract and host binding
//!
//! The presentation layer talks to every game through the same four
//! operations: construct, enqueue input, advance one step, reset. A
//! [`Session`] wires one engine instance to an input queue and the cosmetic
//! display name used by end-of-round overlays.
//!
//! Exactly one session is live at a time (only one game view is open); the
//! host drives it from a repeating timer for the grid games or an animation
//! callback for the continuous ones, and simply stops calling `tick` when
//! the view closes. Every delayed transition inside an engine is a
//! tick-advanced countdown, so an unticked session is also a paused one.

use serde::Serialize;

use crate::input::InputQueue;

/// Placeholder shown when the host supplies an empty display name
pub const DEFAULT_PLAYER_NAME: &str = "Listener";

/// A self-contained, tick-driven game simulation
///
/// Implementations are deterministic: equal seeds, configs, and
/// command/step sequences produce equal snapshots. Invalid commands are
/// silent no-ops, and terminal phases are ordinary states cleared by
/// `reset`.
pub trait Engine {
    /// Static configuration consumed once at construction
    type Config;
    /// Input command (directional, fire, placement, strike)
    type Command;
    /// Immutable state handed to the host for rendering
    type Snapshot: Clone + Serialize;

    fn init(config: Self::Config, seed: u64) -> Self;

    /// Apply one buffered command; guarded, never fails
    fn apply(&mut self, cmd: Self::Command);

    /// Advance exactly one step. `dt` is the elapsed time in seconds;
    /// fixed-period engines ignore it and advance by their own period.
    fn step(&mut self, dt: f32);

    /// Discard all state and return to the initial configuration
    fn reset(&mut self);

    fn snapshot(&self) -> Self::Snapshot;

    /// Cosmetic overlay line for the current phase, if one should show
    fn overlay_message(&self, player: &str) -> Option<String>;
}

/// One live game view: engine plus buffered input plus display name
pub struct Session<E: Engine> {
    engine: E,
    queue: InputQueue<E::Command>,
    player: String,
}

impl<E: Engine> Session<E> {
    pub fn new(config: E::Config, seed: u64, player: &str) -> Self {
        let player = match player.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            name => name.to_string(),
        };
        Self {
            engine: E::init(config, seed),
            queue: InputQueue::new(),
            player,
        }
    }

    /// Enqueue a command from asynchronous input capture; non-blocking
    pub fn apply_input(&mut self, cmd: E::Command) {
        self.queue.push(cmd);
    }

    /// Drain buffered input, advance one step, return the new snapshot
    pub fn tick(&mut self, dt: f32) -> E::Snapshot {
        for cmd in self.queue.drain() {
            self.engine.apply(cmd);
        }
        self.engine.step(dt);
        self.engine.snapshot()
    }

    /// Discard all state, including any buffered input
    pub fn reset(&mut self) -> E::Snapshot {
        self.queue.clear();
        self.engine.reset();
        self.engine.snapshot()
    }

    pub fn snapshot(&self) -> E::Snapshot {
        self.engine.snapshot()
    }

    /// Current snapshot rendered as JSON for the web host
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_default()
    }

    /// Overlay line for the current phase, personalized with the
    /// session's display name
    pub fn overlay(&self) -> Option<String> {
        self.engine.overlay_message(&self.player)
    }

    pub fn player_name(&self) -> &str {
        &self.player
    }
}
