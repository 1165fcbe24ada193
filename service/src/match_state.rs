//! Match state snapshots and per-poll delta tracking.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribution for a goal or card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Shirt number as reported by the feed (kept as text; feeds emit
    /// things like "10" but also "—").
    pub shirt: String,
    pub player: String,
    #[serde(default)]
    pub team: Option<String>,
}

/// State of one match as reported by the score source for one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Status code, e.g. "L", "HT", "FT", "Fixture".
    pub status: String,
    #[serde(default)]
    pub match_time: String,
    #[serde(default)]
    pub last_goal_scorer: Option<Attribution>,
    #[serde(default)]
    pub last_yellow_card: Option<Attribution>,
    #[serde(default)]
    pub last_red_card: Option<Attribution>,
}

/// Immutable copy of one match evaluation with derived event flags.
///
/// Workers only ever see this copy; later polls never mutate it, so the
/// render pipeline is race-free by construction.
#[derive(Debug, Clone)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub goal: bool,
    pub yellow_card: bool,
    pub red_card: bool,
    pub status_changed: bool,
}

impl MatchSnapshot {
    /// A snapshot with no events raised, used for first sightings.
    pub fn quiet(state: MatchState) -> Self {
        Self {
            state,
            goal: false,
            yellow_card: false,
            red_card: false,
            status_changed: false,
        }
    }

    pub fn has_event(&self) -> bool {
        self.goal || self.yellow_card || self.red_card || self.status_changed
    }
}

impl fmt::Display for MatchSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.state.home_team, self.state.home_score, self.state.away_score,
            self.state.away_team
        )
    }
}

/// Derives per-poll event flags by remembering the previous state of
/// every match.
#[derive(Debug, Default)]
pub struct MatchTracker {
    previous: HashMap<String, MatchState>,
}

impl MatchTracker {
    /// Record the latest state of a match and derive what happened
    /// since the previous poll. A match seen for the first time raises
    /// nothing (the service may have started mid-game).
    pub fn observe(&mut self, state: MatchState) -> MatchSnapshot {
        let prev = self.previous.insert(state.match_id.clone(), state.clone());
        let Some(prev) = prev else {
            return MatchSnapshot::quiet(state);
        };

        let goal = state.home_score > prev.home_score || state.away_score > prev.away_score;
        let yellow_card =
            state.last_yellow_card.is_some() && state.last_yellow_card != prev.last_yellow_card;
        let red_card = state.last_red_card.is_some() && state.last_red_card != prev.last_red_card;
        let status_changed = state.status != prev.status;

        MatchSnapshot {
            state,
            goal,
            yellow_card,
            red_card,
            status_changed,
        }
    }

    /// Forget matches no longer present in the watched set.
    pub fn retain_matches(&mut self, keep: impl Fn(&str) -> bool) {
        self.previous.retain(|id, _| keep(id));
    }
}
