//! Memory-match mini-game — scoring, badges, and persisted results.
//!
//! DESIGN
//! ======
//! The engine owns the rules (flip legality, move counting, match and
//! completion scoring) and nothing visual; rendering, animation delays and
//! the elapsed-time clock live in the adapter, which passes elapsed seconds
//! in when the game completes.

use serde::{Deserialize, Serialize};

use crate::store::SessionStore;

/// Icon pool the adapter samples pairs from.
pub const TRAVEL_ICONS: [&str; 12] = [
    "Airplane", "Beach", "Compass", "World", "Mountain", "Umbrella", "Map", "Camera", "Luggage",
    "Sunset", "Cruise", "Train",
];

/// Pairs per round.
pub const PAIR_COUNT: usize = 6;

const MATCH_BASE_POINTS: u32 = 10;
const MATCH_BONUS_CEILING: u32 = 20;
const COMPLETION_BONUS: f64 = 50.0;
const TIME_BONUS_CEILING_SECS: u32 = 300;

// =============================================================================
// ENGINE
// =============================================================================

#[derive(Debug, Clone)]
pub struct Card {
    pub icon: String,
    pub matched: bool,
}

/// Result of a flip attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Illegal flip (already matched, already face-up, out of range).
    Ignored,
    /// First card of the pair is now face-up.
    Flipped,
    /// Second card mismatched; both flip back, the move is counted.
    Mismatched,
    /// Second card matched.
    Matched {
        /// Points awarded for this match.
        points: u32,
        /// True when this match finished the board.
        complete: bool,
    },
}

pub struct MemoryGame {
    cards: Vec<Card>,
    face_up: Option<usize>,
    moves: u32,
    matches: u32,
}

impl MemoryGame {
    /// Build a board with one pair per icon, laid out in the given order.
    /// The adapter shuffles; the engine treats the layout as fixed.
    #[must_use]
    pub fn new<I, S>(icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards = icons
            .into_iter()
            .flat_map(|icon| {
                let icon: String = icon.into();
                [Card { icon: icon.clone(), matched: false }, Card { icon, matched: false }]
            })
            .collect();
        Self { cards, face_up: None, moves: 0, matches: 0 }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    /// Attempt to flip the card at `index`.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        let Some(card) = self.cards.get(index) else {
            return FlipOutcome::Ignored;
        };
        if card.matched || self.face_up == Some(index) {
            return FlipOutcome::Ignored;
        }

        let Some(first) = self.face_up.take() else {
            self.face_up = Some(index);
            return FlipOutcome::Flipped;
        };

        // Second card: the move completes now; match bonus shrinks with the
        // number of moves already spent.
        let points = match_points(self.moves);
        self.moves += 1;

        if self.cards[first].icon == self.cards[index].icon {
            self.cards[first].matched = true;
            self.cards[index].matched = true;
            self.matches += 1;
            FlipOutcome::Matched { points, complete: self.is_complete() }
        } else {
            FlipOutcome::Mismatched
        }
    }
}

/// Points for a match: 10 base plus a bonus that shrinks as moves pile up.
#[must_use]
pub fn match_points(moves_before: u32) -> u32 {
    MATCH_BASE_POINTS + MATCH_BONUS_CEILING.saturating_sub(moves_before)
}

/// End-of-game bonus: half the remaining time budget, a move-efficiency
/// bonus, and a flat completion reward.
#[must_use]
pub fn completion_bonus(moves: u32, elapsed_secs: u32) -> u32 {
    let time_bonus = f64::from(TIME_BONUS_CEILING_SECS.saturating_sub(elapsed_secs)) / 2.0;
    let moves_bonus = f64::from(100u32.saturating_sub(moves.saturating_mul(5)));
    (time_bonus + moves_bonus + COMPLETION_BONUS).round() as u32
}

// =============================================================================
// POINTS & BADGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub name: &'static str,
    pub threshold: u32,
}

/// Unlock thresholds, in unlock order.
pub const BADGES: [Badge; 5] = [
    Badge { name: "First Steps", threshold: 50 },
    Badge { name: "Beach Lover", threshold: 75 },
    Badge { name: "Adventure Seeker", threshold: 100 },
    Badge { name: "Globe Trotter", threshold: 200 },
    Badge { name: "Game Master", threshold: 250 },
];

/// Running points total with badge unlocking.
#[derive(Debug, Default, Clone)]
pub struct PointsLedger {
    points: u32,
    unlocked: Vec<&'static str>,
}

impl PointsLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted total; badges at or below it count as
    /// already unlocked.
    #[must_use]
    pub fn with_points(points: u32) -> Self {
        let unlocked = BADGES
            .iter()
            .filter(|b| points >= b.threshold)
            .map(|b| b.name)
            .collect();
        Self { points, unlocked }
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn badges(&self) -> &[&'static str] {
        &self.unlocked
    }

    /// Add points and return any badges newly unlocked by the new total.
    pub fn add_points(&mut self, points: u32) -> Vec<&'static str> {
        self.points = self.points.saturating_add(points);
        let new: Vec<&'static str> = BADGES
            .iter()
            .filter(|b| self.points >= b.threshold && !self.unlocked.contains(&b.name))
            .map(|b| b.name)
            .collect();
        self.unlocked.extend(&new);
        new
    }
}

// =============================================================================
// PERSISTED RESULTS
// =============================================================================

/// All players' saved results.
pub const GAME_DATA_KEY: &str = "smartTravelGameData";
/// The most recent player's result, kept separately for quick resume.
pub const CURRENT_PLAYER_KEY: &str = "currentPlayer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub player_name: String,
    pub score: u32,
    pub current_destination: u32,
    pub timestamp: String,
}

/// Upsert one player's result into the saved list and remember them as the
/// current player.
pub fn save_game_data(store: &dyn SessionStore, data: &GameData) {
    let mut all = load_all_game_data(store);
    match all.iter_mut().find(|d| d.player_name == data.player_name) {
        Some(existing) => *existing = data.clone(),
        None => all.push(data.clone()),
    }

    match serde_json::to_string(&all) {
        Ok(json) => store.set(GAME_DATA_KEY, &json),
        Err(e) => tracing::warn!(error = %e, "failed to serialize game data"),
    }
    if let Ok(json) = serde_json::to_string(data) {
        store.set(CURRENT_PLAYER_KEY, &json);
    }
}

/// The current player's saved result, if any.
#[must_use]
pub fn load_game_data(store: &dyn SessionStore) -> Option<GameData> {
    let raw = store.get(CURRENT_PLAYER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::warn!(error = %e, "corrupt current-player slot");
            None
        }
    }
}

/// Every player's saved result. A corrupt slot reads as empty.
#[must_use]
pub fn load_all_game_data(store: &dyn SessionStore) -> Vec<GameData> {
    let Some(raw) = store.get(GAME_DATA_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(all) => all,
        Err(e) => {
            tracing::warn!(error = %e, "corrupt game-data slot");
            Vec::new()
        }
    }
}

pub fn clear_game_data(store: &dyn SessionStore) {
    store.remove(GAME_DATA_KEY);
    store.remove(CURRENT_PLAYER_KEY);
}

/// Saved results ordered for the leaderboard, highest score first.
#[must_use]
pub fn leaderboard(mut entries: Vec<GameData>) -> Vec<GameData> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

#[cfg(test)]
#[path = "game_test.rs"]
mod tests;
