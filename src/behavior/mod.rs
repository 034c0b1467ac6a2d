//! Behavior state machine: Scanning / Wandering / Hunting
//!
//! Each animal runs exactly one state at a time. A step may return a
//! replacement state; the caller applies it immediately, so transitions are
//! explicit data instead of hidden callbacks. Sighting food pre-empts
//! whatever the animal was doing and switches it to Hunting on the same
//! step.

pub mod ports;

pub use ports::{MovementPort, PerceptionPort};

use crate::core::types::{FoodId, Pose};
use rand::Rng;

/// Per-step inputs shared by every state
///
/// `dexterity` and `sensing` come from the animal's frozen stat block;
/// the pacing values come from [`SimulationConfig`](crate::core::config::SimulationConfig).
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Seconds of simulated time this step advances
    pub dt: f32,
    /// Movement speed in units per second
    pub dexterity: i32,
    /// Sense radius in units
    pub sensing: i32,
    /// Seconds a full 360 degree scan takes
    pub sec_per_full_turn: f32,
    /// Seconds spent walking before scanning again
    pub wander_duration: f32,
}

/// The active behavior of one animal
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorState {
    Scanning(Scanning),
    Wandering(Wandering),
    Hunting(Hunting),
}

impl BehaviorState {
    /// Initial state for a fresh animal: scan toward a random direction
    pub fn initial(pose: &Pose, ctx: &StepContext, rng: &mut impl Rng) -> Self {
        Self::Scanning(Scanning::with_random_delta(pose.heading, ctx.sec_per_full_turn, rng))
    }

    /// Human-readable state tag for the inspection surface
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scanning(_) => "Scanning",
            Self::Wandering(_) => "Wandering",
            Self::Hunting(_) => "Hunting",
        }
    }

    /// Advance the active state by one step
    ///
    /// Returns the replacement state when a transition fires; `None` means
    /// the current state stays.
    pub fn step(
        &mut self,
        ctx: &StepContext,
        pose: &mut Pose,
        perception: &dyn PerceptionPort,
        movement: &dyn MovementPort,
        rng: &mut impl Rng,
    ) -> Option<BehaviorState> {
        match self {
            Self::Scanning(state) => state.step(ctx, pose, perception),
            Self::Wandering(state) => state.step(ctx, pose, perception, movement, rng),
            Self::Hunting(state) => state.step(ctx, pose, perception, movement, rng),
        }
    }
}

/// Uniform delta in [-360, 360) degrees relative to the current heading
fn random_turn_delta(rng: &mut impl Rng) -> f32 {
    rng.gen_range(-360.0..360.0)
}

/// Rotating in place toward a randomly chosen heading, watching for food
#[derive(Debug, Clone, PartialEq)]
pub struct Scanning {
    origin_heading: f32,
    target_delta: f32,
    duration: f32,
    elapsed: f32,
}

impl Scanning {
    /// Scan from `heading` through `delta` degrees at 360 degrees per
    /// `sec_per_full_turn` seconds
    pub fn new(heading: f32, delta: f32, sec_per_full_turn: f32) -> Self {
        Self {
            origin_heading: heading,
            target_delta: delta,
            duration: delta.abs() / 360.0 * sec_per_full_turn,
            elapsed: 0.0,
        }
    }

    pub fn with_random_delta(heading: f32, sec_per_full_turn: f32, rng: &mut impl Rng) -> Self {
        Self::new(heading, random_turn_delta(rng), sec_per_full_turn)
    }

    fn step(
        &mut self,
        ctx: &StepContext,
        pose: &mut Pose,
        perception: &dyn PerceptionPort,
    ) -> Option<BehaviorState> {
        if let Some(target) =
            perception.find_nearest_food(pose.position, pose.forward(), ctx.sensing as f32)
        {
            return Some(BehaviorState::Hunting(Hunting::new(target)));
        }

        // A zero-length turn has no duration to wait out; move on instead
        // of dividing by it.
        if self.duration <= f32::EPSILON || self.elapsed >= self.duration {
            return Some(BehaviorState::Wandering(Wandering::new()));
        }

        self.elapsed += ctx.dt;
        let t = (self.elapsed / self.duration).min(1.0);
        pose.heading = self.origin_heading + self.target_delta * t;

        None
    }
}

/// Walking straight ahead for a fixed stretch, watching for food
#[derive(Debug, Clone, PartialEq)]
pub struct Wandering {
    elapsed: f32,
}

impl Wandering {
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    fn step(
        &mut self,
        ctx: &StepContext,
        pose: &mut Pose,
        perception: &dyn PerceptionPort,
        movement: &dyn MovementPort,
        rng: &mut impl Rng,
    ) -> Option<BehaviorState> {
        if let Some(target) =
            perception.find_nearest_food(pose.position, pose.forward(), ctx.sensing as f32)
        {
            return Some(BehaviorState::Hunting(Hunting::new(target)));
        }

        if self.elapsed >= ctx.wander_duration {
            return Some(BehaviorState::Scanning(Scanning::with_random_delta(
                pose.heading,
                ctx.sec_per_full_turn,
                rng,
            )));
        }

        self.elapsed += ctx.dt;
        movement.advance_forward(pose, ctx.dexterity as f32 * ctx.dt);

        None
    }
}

impl Default for Wandering {
    fn default() -> Self {
        Self::new()
    }
}

/// Chasing a sighted food item until it is eaten, lost, or out of range
#[derive(Debug, Clone, PartialEq)]
pub struct Hunting {
    target: FoodId,
}

impl Hunting {
    pub fn new(target: FoodId) -> Self {
        Self { target }
    }

    pub fn target(&self) -> FoodId {
        self.target
    }

    fn step(
        &mut self,
        ctx: &StepContext,
        pose: &mut Pose,
        perception: &dyn PerceptionPort,
        movement: &dyn MovementPort,
        rng: &mut impl Rng,
    ) -> Option<BehaviorState> {
        // Consumed or expired between steps counts as lost, not as a fault.
        let target_pos = perception.food_position(self.target);
        let in_range = target_pos
            .map(|pos| pose.position.distance(&pos) <= ctx.sensing as f32 * 2.0)
            .unwrap_or(false);

        match target_pos {
            Some(pos) if in_range => {
                movement.look_at(pose, pos);
                movement.advance_forward(pose, ctx.dexterity as f32 * ctx.dt);
                None
            }
            _ => Some(BehaviorState::Scanning(Scanning::with_random_delta(
                pose.heading,
                ctx.sec_per_full_turn,
                rng,
            ))),
        }
    }
}
