use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::services::word_loader::{DrawnWord, WordCatalog};
use crate::utils::{mask_word, normalize_letter, remaining_letters};

/// Wrong guesses allowed before the game is lost.
pub const MAX_ERRORS: usize = 6;
pub const HINT_COST: u32 = 10;
pub const WIN_BONUS: u32 = 100;
pub const STREAK_BONUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("no word available for the requested category")]
    NoWordAvailable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("game is already over")]
    GameOver,
    #[error("guess must be a single letter")]
    InvalidLetter,
    #[error("letter has already been used")]
    AlreadyUsed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HintError {
    #[error("game is already over")]
    GameOver,
    #[error("not enough points for a hint")]
    InsufficientScore,
    #[error("every letter has already been revealed")]
    NoMissingLetters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub word_length: usize,
    pub max_errors: usize,
    pub category: String,
}

/// Snapshot of a session as shown to the player. `word` stays hidden while the game is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub word: Option<String>,
    pub word_progress: String,
    pub correct_letters: Vec<char>,
    pub wrong_letters: Vec<char>,
    pub errors: usize,
    pub max_errors: usize,
    pub status: GameStatus,
    pub is_game_over: bool,
    pub is_winner: bool,
    pub game_active: bool,
    pub remaining_letters: Vec<char>,
    pub stage: usize,
    pub category: String,
    pub score: u32,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    pub correct: bool,
    pub letter: char,
    pub game_state: GameState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub score: u32,
    pub streak: u32,
    pub categories: Vec<String>,
    pub game_active: bool,
}

/// One player's game. Score and streak carry over when a new round is started
/// on the same session.
#[derive(Debug, Clone)]
pub struct GameSession {
    secret_word: String,
    category: String,
    correct_letters: BTreeSet<char>,
    wrong_letters: BTreeSet<char>,
    status: GameStatus,
    score: u32,
    streak: u32,
}

impl GameSession {
    /// Create a session and start its first round.
    pub fn start(catalog: &WordCatalog, category: Option<&str>) -> Result<Self, StartError> {
        let drawn = catalog.draw(category).ok_or(StartError::NoWordAvailable)?;
        Ok(Self::with_word(drawn))
    }

    pub fn with_word(drawn: DrawnWord) -> Self {
        Self {
            secret_word: drawn.word,
            category: drawn.category,
            correct_letters: BTreeSet::new(),
            wrong_letters: BTreeSet::new(),
            status: GameStatus::Active,
            score: 0,
            streak: 0,
        }
    }

    /// Start a fresh round. On failure the current round is left untouched.
    pub fn new_game(
        &mut self,
        catalog: &WordCatalog,
        category: Option<&str>,
    ) -> Result<GameInfo, StartError> {
        let drawn = catalog.draw(category).ok_or(StartError::NoWordAvailable)?;
        self.secret_word = drawn.word;
        self.category = drawn.category;
        self.correct_letters.clear();
        self.wrong_letters.clear();
        self.status = GameStatus::Active;
        Ok(self.info())
    }

    pub fn info(&self) -> GameInfo {
        GameInfo {
            word_length: self.secret_word.chars().count(),
            max_errors: MAX_ERRORS,
            category: self.category.clone(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn error_count(&self) -> usize {
        self.wrong_letters.len()
    }

    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        if !self.is_active() {
            return Err(GuessError::GameOver);
        }
        let letter = normalize_letter(input).ok_or(GuessError::InvalidLetter)?;
        if self.correct_letters.contains(&letter) || self.wrong_letters.contains(&letter) {
            return Err(GuessError::AlreadyUsed);
        }
        Ok(self.apply_guess(letter))
    }

    /// Spend points to reveal the leftmost letter not yet guessed.
    pub fn hint(&mut self) -> Result<GuessOutcome, HintError> {
        if !self.is_active() {
            return Err(HintError::GameOver);
        }
        if self.score < HINT_COST {
            return Err(HintError::InsufficientScore);
        }
        let letter = self
            .secret_word
            .chars()
            .find(|ch| !self.correct_letters.contains(ch))
            .ok_or(HintError::NoMissingLetters)?;

        self.score -= HINT_COST;
        Ok(self.apply_guess(letter))
    }

    pub fn stats(&self, catalog: &WordCatalog) -> Stats {
        Stats {
            score: self.score,
            streak: self.streak,
            categories: catalog.categories(),
            game_active: self.is_active(),
        }
    }

    pub fn state(&self) -> GameState {
        let active = self.is_active();
        let remaining = if active {
            let used: BTreeSet<char> = self
                .correct_letters
                .union(&self.wrong_letters)
                .copied()
                .collect();
            remaining_letters(&used)
        } else {
            Vec::new()
        };

        GameState {
            word: (!active).then(|| self.secret_word.clone()),
            word_progress: mask_word(&self.secret_word, &self.correct_letters),
            correct_letters: self.correct_letters.iter().copied().collect(),
            wrong_letters: self.wrong_letters.iter().copied().collect(),
            errors: self.error_count(),
            max_errors: MAX_ERRORS,
            status: self.status,
            is_game_over: !active,
            is_winner: self.status == GameStatus::Won,
            game_active: active,
            remaining_letters: remaining,
            stage: self.error_count().min(MAX_ERRORS),
            category: self.category.clone(),
            score: self.score,
            streak: self.streak,
        }
    }

    // `letter` must be normalized and not yet used.
    fn apply_guess(&mut self, letter: char) -> GuessOutcome {
        let correct = self.secret_word.contains(letter);
        if correct {
            self.correct_letters.insert(letter);
            if self.is_solved() {
                self.status = GameStatus::Won;
                self.score += WIN_BONUS + self.streak * STREAK_BONUS;
                self.streak += 1;
            }
        } else {
            self.wrong_letters.insert(letter);
            if self.error_count() >= MAX_ERRORS {
                self.status = GameStatus::Lost;
                self.streak = 0;
            }
        }

        GuessOutcome {
            correct,
            letter,
            game_state: self.state(),
        }
    }

    fn is_solved(&self) -> bool {
        self.secret_word
            .chars()
            .all(|ch| self.correct_letters.contains(&ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session(word: &str) -> GameSession {
        GameSession::with_word(DrawnWord {
            word: word.to_string(),
            category: "Animals".to_string(),
        })
    }

    fn win(session: &mut GameSession) {
        let letters: BTreeSet<char> = session.secret_word.chars().collect();
        for letter in letters {
            session.guess(&letter.to_string()).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn test_guesses_until_won() {
        let mut game = session("CAT");

        let outcome = game.guess("A").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.letter, 'A');
        assert_eq!(outcome.game_state.correct_letters, vec!['A']);
        assert_eq!(outcome.game_state.word_progress, "_ A _");
        assert!(!outcome.game_state.is_winner);
        assert_eq!(outcome.game_state.word, None);

        let outcome = game.guess("c").unwrap();
        assert!(outcome.correct);
        assert!(!outcome.game_state.is_winner);

        let outcome = game.guess("T").unwrap();
        assert!(outcome.correct);
        assert!(outcome.game_state.is_winner);
        assert!(outcome.game_state.is_game_over);
        assert_eq!(outcome.game_state.word.as_deref(), Some("CAT"));
        assert!(outcome.game_state.remaining_letters.is_empty());
        assert_eq!(game.score(), 100);
        assert_eq!(game.streak(), 1);
    }

    #[test]
    fn test_six_wrong_guesses_lose() {
        let mut game = session("CAT");
        for (i, letter) in ["X", "Y", "Z", "Q", "R"].iter().enumerate() {
            let outcome = game.guess(letter).unwrap();
            assert!(!outcome.correct);
            assert_eq!(outcome.game_state.errors, i + 1);
            assert!(outcome.game_state.game_active);
        }

        let outcome = game.guess("S").unwrap();
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(outcome.game_state.errors, MAX_ERRORS);
        assert_eq!(outcome.game_state.stage, MAX_ERRORS);
        assert!(!outcome.game_state.is_winner);
        assert!(outcome.game_state.remaining_letters.is_empty());
        assert_eq!(outcome.game_state.word.as_deref(), Some("CAT"));
        assert_eq!(game.streak(), 0);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_guess_after_game_over() {
        let mut game = session("A");
        game.guess("A").unwrap();
        assert_eq!(game.guess("B"), Err(GuessError::GameOver));
        // game over is checked before the letter itself
        assert_eq!(game.guess("!!"), Err(GuessError::GameOver));
    }

    #[test]
    fn test_invalid_letters() {
        let mut game = session("CAT");
        assert_eq!(game.guess(""), Err(GuessError::InvalidLetter));
        assert_eq!(game.guess("ab"), Err(GuessError::InvalidLetter));
        assert_eq!(game.guess("7"), Err(GuessError::InvalidLetter));
        assert_eq!(game.error_count(), 0);
    }

    #[test]
    fn test_repeated_letter_is_rejected_without_change() {
        let mut game = session("CAT");
        game.guess("A").unwrap();
        game.guess("X").unwrap();
        let before = game.state();

        assert_eq!(game.guess("a"), Err(GuessError::AlreadyUsed));
        assert_eq!(game.guess("x"), Err(GuessError::AlreadyUsed));
        assert_eq!(game.state(), before);
    }

    #[test]
    fn test_remaining_letters_shrink() {
        let mut game = session("CAT");
        game.guess("A").unwrap();
        let outcome = game.guess("B").unwrap();
        let remaining = outcome.game_state.remaining_letters;
        assert_eq!(remaining.len(), 24);
        assert!(!remaining.contains(&'A'));
        assert!(!remaining.contains(&'B'));
    }

    #[test]
    fn test_hint_requires_score() {
        let mut game = session("CAT");
        game.score = 5;
        let before = game.state();
        assert_eq!(game.hint(), Err(HintError::InsufficientScore));
        assert_eq!(game.state(), before);
    }

    #[test]
    fn test_hint_reveals_leftmost_missing_letter() {
        let mut game = session("BANANA");
        game.score = 30;
        game.guess("A").unwrap();

        let outcome = game.hint().unwrap();
        assert_eq!(outcome.letter, 'B');
        assert!(outcome.correct);
        assert_eq!(game.score(), 20);

        let outcome = game.hint().unwrap();
        assert_eq!(outcome.letter, 'N');
        // winning hint: deduct 10, then win bonus
        assert!(outcome.game_state.is_winner);
        assert_eq!(game.score(), 10 + WIN_BONUS);
        assert_eq!(game.streak(), 1);
    }

    #[test]
    fn test_hint_after_game_over() {
        let mut game = session("A");
        game.score = 50;
        game.guess("A").unwrap();
        assert_eq!(game.hint(), Err(HintError::GameOver));
    }

    #[test]
    fn test_hint_with_nothing_missing() {
        let mut game = session("CAT");
        game.score = 50;
        game.correct_letters.extend(['C', 'A', 'T']);
        assert_eq!(game.hint(), Err(HintError::NoMissingLetters));
        assert_eq!(game.score(), 50);
    }

    #[test]
    fn test_streak_bonus_across_rounds() {
        let catalog = WordCatalog::parse("[Animals]\ndog\n").unwrap();
        let mut game = GameSession::start(&catalog, Some("Animals")).unwrap();

        win(&mut game);
        assert_eq!(game.score(), 100);

        let info = game.new_game(&catalog, Some("Animals")).unwrap();
        assert_eq!(info.word_length, 3);
        assert_eq!(info.category, "Animals");
        assert!(game.is_active());
        assert_eq!(game.error_count(), 0);

        win(&mut game);
        assert_eq!(game.score(), 100 + 110);
        assert_eq!(game.streak(), 2);

        game.new_game(&catalog, None).unwrap();
        for letter in ["A", "B", "C", "E", "F", "H"] {
            game.guess(letter).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.score(), 210);
    }

    #[test]
    fn test_new_game_failure_keeps_round() {
        let catalog = WordCatalog::parse("[Empty]\n[Animals]\ncat\n").unwrap();
        let mut game = GameSession::start(&catalog, Some("Animals")).unwrap();
        game.guess("C").unwrap();

        assert_eq!(
            game.new_game(&catalog, Some("Empty")),
            Err(StartError::NoWordAvailable)
        );
        assert_eq!(game.state().correct_letters, vec!['C']);
    }

    #[test]
    fn test_start_without_words() {
        let catalog = WordCatalog::parse("[Empty]\n").unwrap();
        assert!(matches!(
            GameSession::start(&catalog, None),
            Err(StartError::NoWordAvailable)
        ));
    }

    #[test]
    fn test_stats() {
        let catalog = WordCatalog::parse("[Animals]\ncat\n[Fruits]\nfig\n").unwrap();
        let game = GameSession::start(&catalog, Some("Fruits")).unwrap();
        let stats = game.stats(&catalog);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.categories, vec!["Animals", "Fruits"]);
        assert!(stats.game_active);
        assert_eq!(game.info().category, "Fruits");
    }

    proptest! {
        #[test]
        fn prop_letter_sets_stay_disjoint(
            word in "[A-E]{1,8}",
            guesses in proptest::collection::vec("[a-hA-H0-9]{0,2}", 0..30),
        ) {
            let mut game = session(&word);
            for guess in &guesses {
                let before = game.state();
                match game.guess(guess) {
                    Ok(outcome) => {
                        prop_assert!(before.game_active);
                        prop_assert_eq!(outcome.correct, word.contains(outcome.letter));
                    }
                    Err(_) => prop_assert_eq!(game.state(), before),
                }

                let state = game.state();
                prop_assert!(state
                    .correct_letters
                    .iter()
                    .all(|ch| !state.wrong_letters.contains(ch)));
                prop_assert!(state.errors <= MAX_ERRORS);
                prop_assert!(!(state.is_winner && state.status == GameStatus::Lost));
                prop_assert_eq!(state.is_winner, word.chars().all(|ch| state.correct_letters.contains(&ch)));
                prop_assert_eq!(
                    state.status == GameStatus::Lost,
                    state.errors >= MAX_ERRORS && !state.is_winner
                );
            }
        }
    }
}
