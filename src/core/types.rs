//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for animals
///
/// Allocated sequentially by the population manager so runs with the same
/// seed produce the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimalId(pub u64);

/// Unique identifier for food items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(pub u64);

/// Simulation tick counter
pub type Tick = u64;

/// 2D position on the habitat plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::default()
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Position plus facing direction on the habitat plane
///
/// Heading is in degrees and may run past 360 so an interpolated turn
/// never has to wrap mid-rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Unit vector pointing along the current heading
    pub fn forward(&self) -> Vec2 {
        let rad = self.heading.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// Turn in place to face a target point (horizontal look-at)
    pub fn face(&mut self, target: Vec2) {
        let delta = target - self.position;
        if delta.length() > 0.0001 {
            self.heading = delta.y.atan2(delta.x).to_degrees();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_id_equality() {
        let a = AnimalId(1);
        let b = AnimalId(1);
        let c = AnimalId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_follows_heading() {
        let east = Pose::new(Vec2::default(), 0.0).forward();
        assert!((east.x - 1.0).abs() < 1e-6);
        assert!(east.y.abs() < 1e-6);

        let north = Pose::new(Vec2::default(), 90.0).forward();
        assert!(north.x.abs() < 1e-5);
        assert!((north.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_face_points_at_target() {
        let mut pose = Pose::new(Vec2::new(1.0, 1.0), 0.0);
        pose.face(Vec2::new(1.0, 5.0));
        assert!((pose.heading - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_face_ignores_zero_offset() {
        let mut pose = Pose::new(Vec2::new(1.0, 1.0), 42.0);
        pose.face(Vec2::new(1.0, 1.0));
        assert_eq!(pose.heading, 42.0);
    }
}
