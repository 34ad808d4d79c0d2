//! Consumption effects: score, harmony, phase and growth bookkeeping
//!
//! Every effect is read from the food table; nothing here branches on a
//! food's name except the prism refill rule.

use super::food::{FoodType, spawn_food};
use super::state::GameState;
use crate::consts::{
    BASE_TICK_MS, HARMONY_MAX, HARMONY_MIN, HARMONY_TICK_STEP_MS, MAX_PHASE_TURNS, MIN_TICK_MS,
};

/// What a single consumption changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumptionReport {
    pub kind: FoodType,
    pub score_gained: u64,
    pub harmony_before: u8,
    pub harmony_after: u8,
}

/// Harmony after eating `kind`, first matching rule wins:
/// prism refills; a first meal adds one; a repeat drains by the repeat
/// penalty; switching types adds the mix boost.
pub fn next_harmony(harmony: u8, last: Option<FoodType>, kind: FoodType) -> u8 {
    let config = kind.config();
    if kind == FoodType::Prism {
        return HARMONY_MAX;
    }
    match last {
        None => harmony.saturating_add(1).min(HARMONY_MAX),
        Some(prev) if prev == kind => harmony
            .saturating_sub(config.repeat_penalty)
            .max(HARMONY_MIN),
        Some(_) => harmony.saturating_add(config.mix_boost).min(HARMONY_MAX),
    }
}

/// Tick interval in milliseconds for a harmony level
pub fn speed_ms(harmony: u8) -> u64 {
    BASE_TICK_MS
        .saturating_sub(u64::from(harmony) * HARMONY_TICK_STEP_MS)
        .max(MIN_TICK_MS)
}

/// Apply the effects of eating `kind` and respawn the food.
///
/// Must run after the new head has been pushed and before any tail trim, so
/// the respawn sees the grown creature.
pub fn apply_consumption(state: &mut GameState, kind: FoodType) -> ConsumptionReport {
    let config = kind.config();
    let harmony_before = state.harmony;

    // Bonus uses harmony from before this meal
    let score_gained = u64::from(config.base_score) + u64::from(harmony_before) * 2;
    state.score += score_gained;

    state.harmony = next_harmony(harmony_before, state.last_consumed, kind);

    if config.phase_bonus > 0 {
        state.phase_turns = state
            .phase_turns
            .saturating_add(config.phase_bonus)
            .min(MAX_PHASE_TURNS);
    }

    state.growth_debt += config.bonus_growth;
    state.last_consumed = Some(kind);
    state.food = spawn_food(&state.creature, &mut state.rng);

    log::debug!(
        "Ate {} (+{}): harmony {} -> {}, phase {}, growth debt {}",
        kind.as_str(),
        score_gained,
        harmony_before,
        state.harmony,
        state.phase_turns,
        state.growth_debt
    );

    ConsumptionReport {
        kind,
        score_gained,
        harmony_before,
        harmony_after: state.harmony,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::food::FOOD_TYPES;

    #[test]
    fn test_prism_always_refills() {
        for harmony in 0..=HARMONY_MAX {
            assert_eq!(next_harmony(harmony, None, FoodType::Prism), 6);
            for last in FOOD_TYPES {
                assert_eq!(next_harmony(harmony, Some(last), FoodType::Prism), 6);
            }
        }
    }

    #[test]
    fn test_first_meal_adds_one() {
        assert_eq!(next_harmony(3, None, FoodType::Ember), 4);
        assert_eq!(next_harmony(6, None, FoodType::Gale), 6);
        assert_eq!(next_harmony(0, None, FoodType::Tidal), 1);
    }

    #[test]
    fn test_repeat_drains() {
        assert_eq!(next_harmony(3, Some(FoodType::Ember), FoodType::Ember), 1);
        assert_eq!(next_harmony(1, Some(FoodType::Ember), FoodType::Ember), 0);
        assert_eq!(next_harmony(3, Some(FoodType::Tidal), FoodType::Tidal), 2);
        // Gale carries no repeat penalty
        assert_eq!(next_harmony(3, Some(FoodType::Gale), FoodType::Gale), 3);
    }

    #[test]
    fn test_mix_boosts() {
        assert_eq!(next_harmony(3, Some(FoodType::Gale), FoodType::Ember), 5);
        assert_eq!(next_harmony(5, Some(FoodType::Tidal), FoodType::Ember), 6);
        assert_eq!(next_harmony(3, Some(FoodType::Ember), FoodType::Gale), 4);
    }

    #[test]
    fn test_speed_curve() {
        assert_eq!(speed_ms(0), 230);
        assert_eq!(speed_ms(3), 155);
        assert_eq!(speed_ms(6), 80);
        assert_eq!(speed_ms(u8::MAX), 80);
    }

    #[test]
    fn test_apply_consumption_effects() {
        let mut state = GameState::new(5);
        state.harmony = 4;
        state.last_consumed = Some(FoodType::Gale);

        let report = apply_consumption(&mut state, FoodType::Tidal);
        assert_eq!(report.score_gained, 16 + 8);
        assert_eq!(state.score, 24);
        assert_eq!(state.harmony, 5);
        assert_eq!(state.phase_turns, 2);
        assert_eq!(state.growth_debt, 0);
        assert_eq!(state.last_consumed, Some(FoodType::Tidal));

        let report = apply_consumption(&mut state, FoodType::Ember);
        assert_eq!(report.harmony_before, 5);
        assert_eq!(state.score, 24 + 14 + 10);
        assert_eq!(state.harmony, 6);
        assert_eq!(state.growth_debt, 1);
    }

    #[test]
    fn test_phase_caps_at_max() {
        let mut state = GameState::new(5);
        state.phase_turns = 10;
        apply_consumption(&mut state, FoodType::Prism);
        assert_eq!(state.phase_turns, MAX_PHASE_TURNS);
    }

    #[test]
    fn test_respawned_food_avoids_creature() {
        let mut state = GameState::new(77);
        for _ in 0..50 {
            apply_consumption(&mut state, FoodType::Gale);
            assert!(!state.creature.contains(&state.food.position));
        }
    }
}
