//! Narrowing a player search to a single candidate.
//!
//! Score feeds attribute events as "A. Smith", while the imagery API
//! returns every person with a matching surname. An ordered list of
//! filter predicates is applied until exactly one candidate remains;
//! if no filter can single one out, the player is treated as unknown
//! and the caller falls back to the placeholder portrait.

/// One hit from the imagery API's player search.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub name: String,
    pub sport: String,
    pub team: Option<String>,
    pub nationality: Option<String>,
}

struct SearchContext {
    surname: String,
    initial: Option<char>,
    /// First three letters of each team name, lowercased.
    team_prefixes: [String; 2],
}

impl SearchContext {
    fn new(term: &str, teams: [&str; 2]) -> Self {
        // attribution form is "A. Smith"; lone surnames also occur
        let surname = term
            .split_once('.')
            .map(|(_, rest)| rest)
            .unwrap_or(term)
            .trim()
            .to_lowercase();
        let initial = term.chars().next().map(|c| c.to_ascii_lowercase());
        let prefix = |t: &str| t.to_lowercase().chars().take(3).collect::<String>();
        Self {
            surname,
            initial,
            team_prefixes: [prefix(teams[0]), prefix(teams[1])],
        }
    }
}

type Predicate = fn(&Candidate, &SearchContext) -> bool;

const FILTERS: &[Predicate] = &[
    has_surname,
    plays_soccer,
    initial_matches,
    plays_for_team,
    nationality_prefix,
];

/// Apply the filters in order until exactly one candidate remains.
///
/// A filter that would eliminate everyone is skipped (it clearly asked
/// for the wrong thing); a filter leaving several candidates narrows
/// the pool for the next one. `None` means no single player could be
/// identified with confidence.
pub fn identify<'a>(
    candidates: &'a [Candidate],
    term: &str,
    teams: [&str; 2],
) -> Option<&'a Candidate> {
    if candidates.is_empty() {
        return None;
    }
    // A lone result is *probably* the right one; the filters below
    // could not add anything.
    if candidates.len() == 1 {
        return Some(&candidates[0]);
    }

    let ctx = SearchContext::new(term, teams);
    let mut pool: Vec<&Candidate> = candidates.iter().collect();

    for filter in FILTERS {
        let narrowed: Vec<&Candidate> = pool
            .iter()
            .copied()
            .filter(|c| filter(c, &ctx))
            .collect();
        match narrowed.len() {
            1 => return Some(narrowed[0]),
            0 => continue,
            _ => pool = narrowed,
        }
    }

    None
}

fn has_surname(c: &Candidate, ctx: &SearchContext) -> bool {
    c.name
        .to_lowercase()
        .split_whitespace()
        .any(|part| part == ctx.surname)
}

fn plays_soccer(c: &Candidate, _ctx: &SearchContext) -> bool {
    c.sport.eq_ignore_ascii_case("soccer")
}

fn initial_matches(c: &Candidate, ctx: &SearchContext) -> bool {
    match (c.name.chars().next(), ctx.initial) {
        (Some(first), Some(initial)) => first.to_ascii_lowercase() == initial,
        _ => false,
    }
}

fn plays_for_team(c: &Candidate, ctx: &SearchContext) -> bool {
    let Some(team) = c.team.as_deref() else {
        return false;
    };
    let prefix: String = team.to_lowercase().chars().take(3).collect();
    ctx.team_prefixes.contains(&prefix)
}

fn nationality_prefix(c: &Candidate, ctx: &SearchContext) -> bool {
    let Some(nat) = c.nationality.as_deref() else {
        return false;
    };
    let prefix: String = nat.to_lowercase().chars().take(3).collect();
    ctx.team_prefixes.contains(&prefix)
}
