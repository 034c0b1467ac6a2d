//! Food field - the perceivable, consumable food items in the habitat
//!
//! Implements the perception boundary contract for the behavior state
//! machine and the at-most-once claim used by contact feeding.

use crate::behavior::PerceptionPort;
use crate::core::types::{FoodId, Vec2};
use ahash::AHashMap;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
struct FoodItem {
    position: Vec2,
    /// Simulated-clock time at which the item despawns
    expires_at: f32,
}

/// All live food items, indexed by id
#[derive(Debug, Default)]
pub struct FoodField {
    items: AHashMap<FoodId, FoodItem>,
    next_id: u64,
}

impl FoodField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one food item
    pub fn spawn(&mut self, position: Vec2, expires_at: f32) -> FoodId {
        let id = FoodId(self.next_id);
        self.next_id += 1;
        self.items.insert(
            id,
            FoodItem {
                position,
                expires_at,
            },
        );
        id
    }

    /// Scatter `count` items uniformly inside `[-extent, extent]` on both axes
    pub fn scatter(
        &mut self,
        count: u32,
        extent: f32,
        now: f32,
        lifetime: f32,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let position = Vec2::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            self.spawn(position, now + lifetime);
        }
    }

    /// Drop every item whose lifetime has run out
    pub fn expire(&mut self, now: f32) {
        self.items.retain(|_, item| item.expires_at > now);
    }

    /// Remove and return all items within `radius` of `position`
    ///
    /// Each item can be claimed exactly once; the returned ids are sorted
    /// so claim order does not depend on map iteration order.
    pub fn claim_within(&mut self, position: Vec2, radius: f32) -> Vec<FoodId> {
        let mut claimed: Vec<FoodId> = self
            .items
            .iter()
            .filter(|(_, item)| item.position.distance(&position) <= radius)
            .map(|(&id, _)| id)
            .collect();
        claimed.sort_by_key(|id| id.0);

        for id in &claimed {
            self.items.remove(id);
        }
        claimed
    }

    pub fn position(&self, id: FoodId) -> Option<Vec2> {
        self.items.get(&id).map(|item| item.position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PerceptionPort for FoodField {
    /// Nearest food inside a sense sphere cast half a radius ahead
    ///
    /// The volume is centered at `origin + forward * radius / 2`, so
    /// animals see further ahead than behind. Distance ranking is from
    /// `origin` itself, with ids breaking exact ties deterministically.
    fn find_nearest_food(&self, origin: Vec2, forward: Vec2, radius: f32) -> Option<FoodId> {
        let center = origin + forward * (radius / 2.0);

        self.items
            .iter()
            .filter(|(_, item)| item.position.distance(&center) <= radius)
            .min_by(|(id_a, a), (id_b, b)| {
                a.position
                    .distance(&origin)
                    .total_cmp(&b.position.distance(&origin))
                    .then(id_a.0.cmp(&id_b.0))
            })
            .map(|(&id, _)| id)
    }

    fn food_position(&self, id: FoodId) -> Option<Vec2> {
        self.position(id)
    }
}
