//! Scoring module - match, cascade and power-activation points
//!
//! All functions are pure. Cascade multipliers are kept in quarters so step
//! scores are computed with integer math:
//! `round(base * multiplier) == (base * quarters + 2) / 4` (round half up).

use crate::matcher::MatchEvent;
use crate::types::{
    PowerType, BOMB_BONUS, CASCADE_QUARTERS, LINE_CLEAR_BONUS, LONG_MATCH_STEP, MATCH_SCORES,
    MIN_MATCH_LENGTH,
};

/// Breakdown of one cascade step's points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepScore {
    /// Sum of `points_for_match` over the step's matches.
    pub base: u32,
    /// `base` after the cascade multiplier, rounded.
    pub multiplied: u32,
    /// Power activation bonuses (never multiplied).
    pub power_bonus: u32,
    pub total: u32,
}

/// Base points for a single run
/// 3 -> 100, 4 -> 200, 5 -> 400, then +150 per extra tile
pub fn points_for_match(length: usize) -> u32 {
    match length {
        len if len < MIN_MATCH_LENGTH => 0,
        3..=5 => MATCH_SCORES[length],
        _ => MATCH_SCORES[5].saturating_add(LONG_MATCH_STEP.saturating_mul((length - 5) as u32)),
    }
}

/// Multiplier in quarters for a 1-based cascade step (capped at step 5)
fn cascade_quarters(step: u32) -> u32 {
    let idx = (step.max(1) - 1) as usize;
    CASCADE_QUARTERS[idx.min(CASCADE_QUARTERS.len() - 1)]
}

/// 1.0, 1.25, 1.5, 1.75, then 2.0 for every later step
pub fn cascade_multiplier(step: u32) -> f64 {
    cascade_quarters(step) as f64 / 4.0
}

/// Apply the cascade multiplier to base points, rounding half up
pub fn apply_cascade_multiplier(points: u32, step: u32) -> u32 {
    let scaled = (points as u64) * (cascade_quarters(step) as u64) + 2;
    (scaled / 4).min(u32::MAX as u64) as u32
}

/// Bonus for triggering a power tile
pub fn power_activation_bonus(power: PowerType) -> u32 {
    match power {
        PowerType::RowClear | PowerType::ColumnClear => LINE_CLEAR_BONUS,
        PowerType::Bomb => BOMB_BONUS,
    }
}

/// Points for a cascade step from its matches and any powers it triggered
pub fn calculate_step_score(matches: &[MatchEvent], step: u32, activated: &[PowerType]) -> StepScore {
    let base = matches
        .iter()
        .fold(0u32, |acc, m| acc.saturating_add(points_for_match(m.length)));
    let multiplied = apply_cascade_multiplier(base, step);
    let power_bonus = activated
        .iter()
        .fold(0u32, |acc, p| acc.saturating_add(power_activation_bonus(*p)));

    StepScore {
        base,
        multiplied,
        power_bonus,
        total: multiplied.saturating_add(power_bonus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Axis;
    use crate::types::{Coord, TokenType};

    fn run(length: usize) -> MatchEvent {
        MatchEvent {
            token: TokenType::Ruby,
            length,
            axis: Axis::Horizontal,
            cells: (0..length).map(|c| Coord::new(0, c)).collect(),
            power_spawn_cell: None,
            power_type: None,
        }
    }

    #[test]
    fn test_points_for_match() {
        assert_eq!(points_for_match(2), 0);
        assert_eq!(points_for_match(3), 100);
        assert_eq!(points_for_match(4), 200);
        assert_eq!(points_for_match(5), 400);
        assert_eq!(points_for_match(6), 550);
        assert_eq!(points_for_match(9), 1000);
    }

    #[test]
    fn test_cascade_multiplier_is_capped() {
        let expected = [1.0, 1.25, 1.5, 1.75, 2.0, 2.0, 2.0];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(cascade_multiplier(i as u32 + 1), *want);
        }
        assert_eq!(cascade_multiplier(100), 2.0);
        // Step 0 is treated as the first step
        assert_eq!(cascade_multiplier(0), 1.0);
    }

    #[test]
    fn test_multiplier_rounds_half_up() {
        assert_eq!(apply_cascade_multiplier(100, 2), 125);
        // 550 * 1.25 = 687.5
        assert_eq!(apply_cascade_multiplier(550, 2), 688);
        // 250 * 1.5 = 375, 150 * 1.75 = 262.5
        assert_eq!(apply_cascade_multiplier(250, 3), 375);
        assert_eq!(apply_cascade_multiplier(150, 4), 263);
        assert_eq!(apply_cascade_multiplier(300, 9), 600);
    }

    #[test]
    fn test_power_bonus() {
        assert_eq!(power_activation_bonus(PowerType::RowClear), 150);
        assert_eq!(power_activation_bonus(PowerType::ColumnClear), 150);
        assert_eq!(power_activation_bonus(PowerType::Bomb), 250);
    }

    #[test]
    fn test_step_score_adds_unmultiplied_bonus() {
        let score = calculate_step_score(&[run(3), run(4)], 3, &[PowerType::Bomb]);
        assert_eq!(score.base, 300);
        assert_eq!(score.multiplied, 450);
        assert_eq!(score.power_bonus, 250);
        assert_eq!(score.total, 700);

        let empty = calculate_step_score(&[], 1, &[]);
        assert_eq!(empty, StepScore::default());
    }
}
