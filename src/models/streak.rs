//! Cross-day streak state machine.
//!
//! The streak counts consecutive calendar days on which the goal was met.
//! `advance` is the only transition, invoked when an intake event crosses the
//! 100% threshold. It is pure; the caller persists the returned state.

use serde::{Deserialize, Serialize};

use crate::time_utils::DayKey;

/// Streak counters embedded in the user document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive goal-met days; 0 means no live streak
    #[serde(default)]
    pub current_streak: u32,
    /// Day the counter last advanced
    #[serde(default)]
    pub last_streak_update: Option<DayKey>,
}

impl StreakState {
    /// Apply the day-transition rule for a goal met on `today`.
    ///
    /// Returns the state to persist, or `None` when the streak was already
    /// credited today (the idempotence guard): the counter advances at most
    /// once per calendar day no matter how many qualifying intakes land.
    pub fn advance(&self, today: DayKey) -> Option<StreakState> {
        match self.last_streak_update {
            // Already credited today
            Some(last) if last == today => None,
            // Yesterday qualified: extend
            Some(last) if today.days_since(last) == 1 => Some(StreakState {
                current_streak: self.current_streak + 1,
                last_streak_update: Some(today),
            }),
            // Gap of >= 2 days, clock anomaly, or no prior streak: restart
            _ => Some(StreakState {
                current_streak: 1,
                last_streak_update: Some(today),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_ever_goal_starts_at_one() {
        let state = StreakState::default();
        let next = state.advance(day("2024-03-09")).unwrap();
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.last_streak_update, Some(day("2024-03-09")));
    }

    #[test]
    fn test_consecutive_day_increments() {
        let state = StreakState {
            current_streak: 4,
            last_streak_update: Some(day("2024-03-08")),
        };
        let next = state.advance(day("2024-03-09")).unwrap();
        assert_eq!(next.current_streak, 5);
        assert_eq!(next.last_streak_update, Some(day("2024-03-09")));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let state = StreakState {
            current_streak: 4,
            last_streak_update: Some(day("2024-03-09")),
        };
        assert_eq!(state.advance(day("2024-03-09")), None);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let state = StreakState {
            current_streak: 12,
            last_streak_update: Some(day("2024-03-06")),
        };
        let next = state.advance(day("2024-03-09")).unwrap();
        assert_eq!(next.current_streak, 1);
    }

    #[test]
    fn test_increment_across_month_boundary() {
        let state = StreakState {
            current_streak: 2,
            last_streak_update: Some(day("2024-02-29")),
        };
        let next = state.advance(day("2024-03-01")).unwrap();
        assert_eq!(next.current_streak, 3);
    }

    #[test]
    fn test_last_update_in_future_resets() {
        // Device clock skew can leave last_streak_update ahead of today;
        // treat it like a gap rather than crediting another day.
        let state = StreakState {
            current_streak: 7,
            last_streak_update: Some(day("2024-03-12")),
        };
        let next = state.advance(day("2024-03-09")).unwrap();
        assert_eq!(next.current_streak, 1);
    }
}
