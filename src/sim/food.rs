//! Food kinds, their static effect table, and the spawner

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, free_cells};
use crate::consts::HARMONY_MAX;

/// Elemental food flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Ember,
    Tidal,
    Gale,
    Prism,
}

/// Static consumption effects plus presentation metadata for one food type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodConfig {
    pub label: &'static str,
    pub description: &'static str,
    /// 0xRRGGBB
    pub color: u32,
    pub base_score: u32,
    /// Extra segments queued for later ticks
    pub bonus_growth: u32,
    pub mix_boost: u8,
    pub repeat_penalty: u8,
    pub phase_bonus: u8,
    pub spawn_weight: u32,
}

/// All food types in table order
pub const FOOD_TYPES: [FoodType; 4] = [
    FoodType::Ember,
    FoodType::Tidal,
    FoodType::Gale,
    FoodType::Prism,
];

const FOOD_CONFIG: [FoodConfig; 4] = [
    FoodConfig {
        label: "Ember Bloom",
        description: "Supercharges growth but punishes repeats.",
        color: 0xff6b6b,
        base_score: 14,
        bonus_growth: 1,
        mix_boost: 2,
        repeat_penalty: 2,
        phase_bonus: 0,
        spawn_weight: 3,
    },
    FoodConfig {
        label: "Tidal Pearl",
        description: "Adds phase turns to slip through yourself.",
        color: 0x4d96ff,
        base_score: 16,
        bonus_growth: 0,
        mix_boost: 1,
        repeat_penalty: 1,
        phase_bonus: 2,
        spawn_weight: 3,
    },
    FoodConfig {
        label: "Gale Petal",
        description: "Keeps harmony steady and awards steady points.",
        color: 0x3ad29f,
        base_score: 12,
        bonus_growth: 0,
        mix_boost: 1,
        repeat_penalty: 0,
        phase_bonus: 0,
        spawn_weight: 4,
    },
    FoodConfig {
        label: "Prism Core",
        description: "Refills harmony and grants long phasing.",
        color: 0xb388ff,
        base_score: 32,
        bonus_growth: 0,
        mix_boost: HARMONY_MAX,
        repeat_penalty: 0,
        phase_bonus: 6,
        spawn_weight: 1,
    },
];

impl FoodType {
    /// Effect table row for this type
    pub fn config(self) -> &'static FoodConfig {
        let index = match self {
            FoodType::Ember => 0,
            FoodType::Tidal => 1,
            FoodType::Gale => 2,
            FoodType::Prism => 3,
        };
        &FOOD_CONFIG[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Ember => "ember",
            FoodType::Tidal => "tidal",
            FoodType::Gale => "gale",
            FoodType::Prism => "prism",
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Cell,
    pub kind: FoodType,
}

/// Sample from a discrete distribution given as `(item, weight)` pairs.
///
/// Scans the cumulative weight until it passes a uniform draw from
/// `[0, total)`. Returns `None` when the total weight is zero.
pub fn pick_weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, table: &[(T, u32)]) -> Option<T> {
    let total: u32 = table.iter().map(|&(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let target = rng.random_range(0..total);
    let mut cumulative = 0;
    for &(item, weight) in table {
        cumulative += weight;
        if target < cumulative {
            return Some(item);
        }
    }
    None
}

/// Draw a food type according to the table's spawn weights
pub fn pick_food_type<R: Rng + ?Sized>(rng: &mut R) -> FoodType {
    let table = FOOD_TYPES.map(|t| (t, t.config().spawn_weight));
    pick_weighted(rng, &table).unwrap_or(FoodType::Gale)
}

/// Place a new food on a uniformly random cell not covered by the creature.
///
/// With no free cell left, a prism lands on the creature's head.
pub fn spawn_food<R: Rng + ?Sized>(creature: &VecDeque<Cell>, rng: &mut R) -> Food {
    let occupied: HashSet<Cell> = creature.iter().copied().collect();
    let free = free_cells(&occupied);

    if free.is_empty() {
        let head = creature.front().copied().unwrap_or_default();
        return Food {
            position: head,
            kind: FoodType::Prism,
        };
    }

    let position = free[rng.random_range(0..free.len())];
    Food {
        position,
        kind: pick_food_type(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_table_lookup_matches_type() {
        assert_eq!(FoodType::Ember.config().base_score, 14);
        assert_eq!(FoodType::Tidal.config().phase_bonus, 2);
        assert_eq!(FoodType::Gale.config().base_score, 12);
        assert_eq!(FoodType::Prism.config().mix_boost, HARMONY_MAX);
        assert_eq!(FoodType::Prism.config().phase_bonus, 6);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weights() {
        let mut rng = Pcg32::seed_from_u64(7);
        let table = [("never", 0), ("always", 5), ("also_never", 0)];
        for _ in 0..100 {
            assert_eq!(pick_weighted(&mut rng, &table), Some("always"));
        }
    }

    #[test]
    fn test_pick_weighted_empty() {
        let mut rng = Pcg32::seed_from_u64(7);
        let table: [(u8, u32); 2] = [(1, 0), (2, 0)];
        assert_eq!(pick_weighted(&mut rng, &table), None);
    }

    #[test]
    fn test_food_type_frequencies_follow_weights() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut counts = [0u32; 4];
        let draws = 22_000;
        for _ in 0..draws {
            let kind = pick_food_type(&mut rng);
            let idx = FOOD_TYPES.iter().position(|&t| t == kind).unwrap();
            counts[idx] += 1;
        }
        // Weights 3:3:4:1 out of 11, expected 6000/6000/8000/2000
        let expected = [6000.0, 6000.0, 8000.0, 2000.0];
        for (count, exp) in counts.iter().zip(expected) {
            let ratio = *count as f64 / exp;
            assert!((0.9..1.1).contains(&ratio), "counts {:?}", counts);
        }
    }

    #[test]
    fn test_spawn_avoids_creature() {
        let mut rng = Pcg32::seed_from_u64(42);
        let creature: VecDeque<Cell> = (0..GRID_SIZE).map(|x| IVec2::new(x, 0)).collect();
        for _ in 0..200 {
            let food = spawn_food(&creature, &mut rng);
            assert!(!creature.contains(&food.position));
            assert!(food.position.y > 0);
        }
    }

    #[test]
    fn test_spawn_on_full_grid_falls_back_to_head() {
        let mut rng = Pcg32::seed_from_u64(42);
        let creature: VecDeque<Cell> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
            .rev()
            .collect();
        let food = spawn_food(&creature, &mut rng);
        assert_eq!(food.position, IVec2::new(GRID_SIZE - 1, GRID_SIZE - 1));
        assert_eq!(food.kind, FoodType::Prism);
    }
}
