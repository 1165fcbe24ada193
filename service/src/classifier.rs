//! Turns a match snapshot's event flags into notification intents.
//!
//! Pure: the classifier never touches the network and never mutates
//! the snapshot. Every flag produces its own intent; simultaneous
//! flags (a goal at the final whistle, say) are not coalesced.

use crate::config::{DetailMode, NotificationLevel};
use crate::match_state::{Attribution, MatchSnapshot};

/// The kind of event behind a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    StatusChange,
}

/// One notification the classifier wants raised.
#[derive(Debug, Clone)]
pub struct Intent {
    pub kind: EventKind,
    pub title: String,
    /// Generic payload: the render stage should use the scoreboard
    /// layout instead of a player layout.
    pub simple: bool,
    /// Icon filename for standard notifications, resolved against the
    /// configured media directory.
    pub icon: Option<&'static str>,
}

/// Display pairs for recognized status codes.
const STATUS_TABLE: &[(&str, &str, &str)] = &[
    ("FT", "Full Time", "ft.png"),
    ("HT", "Half Time", "ht.png"),
    ("L", "Latest", "latest.png"),
];

const STATUS_FIXTURE: (&str, &str) = ("Fixture", "fixture.png");

/// Map a status code to its (label, icon) pair; unrecognized codes get
/// the fixture pairing.
pub fn status_display(status: &str) -> (&'static str, &'static str) {
    STATUS_TABLE
        .iter()
        .find(|(code, _, _)| *code == status)
        .map(|(_, label, icon)| (*label, *icon))
        .unwrap_or(STATUS_FIXTURE)
}

/// Classify a snapshot into zero or more intents, in fixed priority
/// order: yellow booking, red booking, goal, status change.
pub fn classify(
    snapshot: &MatchSnapshot,
    level: NotificationLevel,
    detail: DetailMode,
) -> Vec<Intent> {
    let mut intents = Vec::new();
    let state = &snapshot.state;

    if snapshot.yellow_card && level.contains(NotificationLevel::YELLOW) {
        intents.push(Intent {
            kind: EventKind::YellowCard,
            title: booking_title("Yellow card!", state.last_yellow_card.as_ref(), detail),
            simple: false,
            icon: Some("yellow-card.png"),
        });
    }

    if snapshot.red_card && level.contains(NotificationLevel::RED) {
        intents.push(Intent {
            kind: EventKind::RedCard,
            title: booking_title("Red card!", state.last_red_card.as_ref(), detail),
            simple: false,
            icon: Some("red-card.png"),
        });
    }

    if snapshot.goal {
        // Goals are always shown; the level flag only gates scorer detail.
        let scorer = state
            .last_goal_scorer
            .as_ref()
            .filter(|_| level.contains(NotificationLevel::GOALSCORER) && detail.is_detailed())
            .and_then(|a| non_blank(&a.player));

        let (title, simple) = match scorer {
            Some(name) => (format!("GOAL! {name}"), false),
            None => ("GOAL!".to_string(), true),
        };
        intents.push(Intent {
            kind: EventKind::Goal,
            title,
            simple,
            icon: Some("goal.png"),
        });
    }

    if snapshot.status_changed {
        let (label, icon) = status_display(&state.status);
        intents.push(Intent {
            kind: EventKind::StatusChange,
            title: label.to_string(),
            simple: true,
            icon: Some(icon),
        });
    }

    intents
}

/// Booking title: generic unless detail is on and a usable attribution
/// exists. Malformed attributions fall back to the generic title, never
/// an error.
fn booking_title(generic: &str, attribution: Option<&Attribution>, detail: DetailMode) -> String {
    if !detail.is_detailed() {
        return generic.to_string();
    }
    let Some(att) = attribution else {
        return generic.to_string();
    };
    let Some(player) = non_blank(&att.player) else {
        return generic.to_string();
    };
    match att.team.as_deref().and_then(non_blank) {
        Some(team) => format!("{generic} {player} ({team})"),
        None => format!("{generic} {player}"),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_state::{MatchSnapshot, MatchState};

    fn snapshot() -> MatchSnapshot {
        MatchSnapshot::quiet(MatchState {
            match_id: "m1".into(),
            home_team: "Arsenal".into(),
            away_team: "Spurs".into(),
            home_score: 1,
            away_score: 0,
            status: "L".into(),
            match_time: "73'".into(),
            last_goal_scorer: None,
            last_yellow_card: None,
            last_red_card: None,
        })
    }

    fn all_levels() -> NotificationLevel {
        NotificationLevel::from_flags(true, true, true)
    }

    fn scorer(name: &str) -> crate::match_state::Attribution {
        crate::match_state::Attribution {
            shirt: "10".into(),
            player: name.into(),
            team: None,
        }
    }

    #[test]
    fn goal_produces_exactly_one_intent_regardless_of_other_flags() {
        let mut snap = snapshot();
        snap.goal = true;
        snap.status_changed = true;
        snap.yellow_card = true;
        snap.state.last_yellow_card = Some(scorer("B. Jones"));

        let intents = classify(&snap, all_levels(), DetailMode::Simple);
        let goals: Vec<_> = intents
            .iter()
            .filter(|i| i.kind == EventKind::Goal)
            .collect();
        assert_eq!(goals.len(), 1);
        // booking and status change still produce their own intents
        assert_eq!(intents.len(), 3);
    }

    #[test]
    fn priority_order_is_yellow_red_goal_status() {
        let mut snap = snapshot();
        snap.goal = true;
        snap.status_changed = true;
        snap.yellow_card = true;
        snap.red_card = true;

        let kinds: Vec<_> = classify(&snap, all_levels(), DetailMode::Off)
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::YellowCard,
                EventKind::RedCard,
                EventKind::Goal,
                EventKind::StatusChange
            ]
        );
    }

    #[test]
    fn goal_without_goalscorer_level_is_generic_and_simple() {
        let mut snap = snapshot();
        snap.goal = true;
        snap.state.last_goal_scorer = Some(scorer("A. Smith"));

        let level = NotificationLevel::from_flags(false, true, true);
        let intents = classify(&snap, level, DetailMode::Simple);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].title, "GOAL!");
        assert!(intents[0].simple);
        assert!(!intents[0].title.contains("Smith"));
    }

    #[test]
    fn goal_with_level_but_missing_scorer_falls_back() {
        let mut snap = snapshot();
        snap.goal = true;
        snap.state.last_goal_scorer = None;

        let intents = classify(&snap, all_levels(), DetailMode::Simple);
        assert_eq!(intents[0].title, "GOAL!");
        assert!(intents[0].simple);

        // blank attribution is treated the same as a missing one
        snap.state.last_goal_scorer = Some(scorer("   "));
        let intents = classify(&snap, all_levels(), DetailMode::Simple);
        assert_eq!(intents[0].title, "GOAL!");
        assert!(intents[0].simple);
    }

    #[test]
    fn goal_with_detail_includes_scorer() {
        let mut snap = snapshot();
        snap.goal = true;
        snap.state.last_goal_scorer = Some(scorer("A. Smith"));

        let intents = classify(&snap, all_levels(), DetailMode::Simple);
        assert_eq!(intents[0].title, "GOAL! A. Smith");
        assert!(!intents[0].simple);
    }

    #[test]
    fn bookings_are_gated_by_level() {
        let mut snap = snapshot();
        snap.yellow_card = true;

        let no_yellow = NotificationLevel::from_flags(true, false, true);
        assert!(classify(&snap, no_yellow, DetailMode::Off).is_empty());

        let intents = classify(&snap, all_levels(), DetailMode::Off);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].title, "Yellow card!");
    }

    #[test]
    fn booking_title_detail_includes_player_and_team() {
        let mut snap = snapshot();
        snap.red_card = true;
        snap.state.last_red_card = Some(crate::match_state::Attribution {
            shirt: "4".into(),
            player: "C. Brown".into(),
            team: Some("Arsenal".into()),
        });

        let intents = classify(&snap, all_levels(), DetailMode::Simple);
        assert_eq!(intents[0].title, "Red card! C. Brown (Arsenal)");

        // detail off keeps the generic title even with data present
        let intents = classify(&snap, all_levels(), DetailMode::Off);
        assert_eq!(intents[0].title, "Red card!");
    }

    #[test]
    fn status_lookup_defaults_to_fixture() {
        assert_eq!(status_display("FT"), ("Full Time", "ft.png"));
        assert_eq!(status_display("HT"), ("Half Time", "ht.png"));
        assert_eq!(status_display("???"), ("Fixture", "fixture.png"));

        let mut snap = snapshot();
        snap.status_changed = true;
        snap.state.status = "FT".into();
        let intents = classify(&snap, all_levels(), DetailMode::Off);
        assert_eq!(intents[0].title, "Full Time");
        assert!(intents[0].simple);
    }
}
