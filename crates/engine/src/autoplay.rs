//! Headless autoplay for simulations and benchmarks
//!
//! Two policies are available:
//!
//! - [`Strategy::FirstHint`]: always play the oracle's hint
//! - [`Strategy::Greedy`]: try every legal swap and keep the highest-scoring one
//!
//! Both are deterministic. Greedy evaluation resolves each candidate on a
//! cloned state, so the session RNG only advances for the move actually played.

use crate::core::{all_valid_moves, GameState, HintMove, SwapOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    FirstHint,
    Greedy,
}

impl Strategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hint" | "first-hint" | "firsthint" => Some(Strategy::FirstHint),
            "greedy" => Some(Strategy::Greedy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::FirstHint => "first-hint",
            Strategy::Greedy => "greedy",
        }
    }

    /// Pick the next swap, or `None` when the board offers none
    pub fn choose(self, state: &GameState) -> Option<HintMove> {
        match self {
            Strategy::FirstHint => state.find_hint_move(),
            Strategy::Greedy => all_valid_moves(state.board())
                .into_iter()
                .map(|m| (state.apply_swap(m.from, m.to).points(), m))
                // max_by_key keeps the last maximum; reverse so ties go to oracle order
                .rev()
                .max_by_key(|(points, _)| *points)
                .map(|(_, m)| m),
        }
    }
}

/// Summary of an autoplay run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoplayReport {
    pub moves_played: u32,
    pub final_score: u32,
    pub reshuffles: u32,
    pub cascade_steps: u32,
    pub deepest_cascade: u32,
}

/// Play up to `max_moves` swaps, calling `on_move` after each one
pub fn autoplay_with(
    state: &GameState,
    strategy: Strategy,
    max_moves: u32,
    mut on_move: impl FnMut(&SwapOutcome),
) -> (GameState, AutoplayReport) {
    let mut state = state.clone();
    let mut report = AutoplayReport::default();

    while report.moves_played < max_moves && !state.is_over() {
        let Some(choice) = strategy.choose(&state) else {
            break;
        };
        let outcome = state.apply_swap(choice.from, choice.to);
        if !outcome.did_consume_move {
            break;
        }
        on_move(&outcome);

        report.moves_played += 1;
        report.cascade_steps += outcome.steps.len() as u32;
        report.deepest_cascade = report.deepest_cascade.max(outcome.steps.len() as u32);
        if outcome.did_reshuffle {
            report.reshuffles += 1;
        }
        state = outcome.next_state;
    }

    report.final_score = state.score();
    (state, report)
}

pub fn autoplay(state: &GameState, strategy: Strategy, max_moves: u32) -> (GameState, AutoplayReport) {
    autoplay_with(state, strategy, max_moves, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_spends_every_move() {
        let state = GameState::new(2024);
        let (end, report) = autoplay(&state, Strategy::FirstHint, u32::MAX);
        assert!(end.is_over());
        assert_eq!(report.moves_played, state.moves());
        assert_eq!(report.final_score, end.score());
        assert!(report.cascade_steps >= report.moves_played);
    }

    #[test]
    fn autoplay_is_deterministic() {
        let state = GameState::new(77);
        let a = autoplay(&state, Strategy::Greedy, 5);
        let b = autoplay(&state, Strategy::Greedy, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn greedy_first_move_scores_at_least_the_hint() {
        let state = GameState::new(9);
        let hint = state.find_hint_move().unwrap();
        let greedy = Strategy::Greedy.choose(&state).unwrap();
        let hint_points = state.apply_swap(hint.from, hint.to).points();
        let greedy_points = state.apply_swap(greedy.from, greedy.to).points();
        assert!(greedy_points >= hint_points);
    }

    #[test]
    fn strategy_parse() {
        assert_eq!(Strategy::from_str("greedy"), Some(Strategy::Greedy));
        assert_eq!(Strategy::from_str("HINT"), Some(Strategy::FirstHint));
        assert_eq!(Strategy::from_str("random"), None);
    }
}
