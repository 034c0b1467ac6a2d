//! Boundary contracts the state machine consumes
//!
//! The behavior controller never owns the world: it senses through a
//! [`PerceptionPort`] and moves through a [`MovementPort`]. Both are
//! implemented by collaborators (see `world/`), and test doubles stand in
//! for them in unit tests.

use crate::core::types::{FoodId, Pose, Vec2};

/// Food sensing supplied by the environment
pub trait PerceptionPort {
    /// Nearest valid food target inside a sense volume cast forward from
    /// `origin`, or `None` when nothing is in range
    ///
    /// "Nearest" is Euclidean distance from `origin`; exact ties break in
    /// a collaborator-defined but deterministic order.
    fn find_nearest_food(&self, origin: Vec2, forward: Vec2, radius: f32) -> Option<FoodId>;

    /// Current position of a food item
    ///
    /// Returns `None` once the item has been eaten or expired. Hunters
    /// treat that as "target lost", never as a fault.
    fn food_position(&self, id: FoodId) -> Option<Vec2>;
}

/// Locomotion supplied by the environment
///
/// The implementation must clamp the resulting horizontal position to
/// `[-habitat_size, habitat_size]` on both axes; the state machine relies
/// on that contract to keep animals on the map.
pub trait MovementPort {
    /// Advance along the pose's heading and report the clamped position
    fn advance_forward(&self, pose: &mut Pose, distance: f32) -> Vec2;

    /// Turn in place to face a horizontal target point
    fn look_at(&self, pose: &mut Pose, target: Vec2) {
        pose.face(target);
    }
}
