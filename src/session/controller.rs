use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::config::Config;
use crate::deck::{self, LoadError};
use crate::engine::answer;
use crate::session::mode::{
    Card, Deck, DictionaryDeck, Direction, TrainingMode, VerbDeck,
};
use crate::session::schedule::SessionId;

#[derive(Debug, Error)]
pub enum StartError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("no usable entries in {}", .0.display())]
    EmptyDataset(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StartError {
    /// Empty decks are reported as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, StartError::EmptyDataset(_))
    }
}

impl From<LoadError> for StartError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(path) => StartError::FileNotFound(path),
            LoadError::Io { path, source } => StartError::Read { path, source },
        }
    }
}

/// Mastery thresholds and auto-advance delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub word_threshold: u32,
    pub verb_threshold: u32,
    pub correct_delay: Duration,
    pub incorrect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            word_threshold: 2,
            verb_threshold: 1,
            correct_delay: Duration::from_millis(800),
            incorrect_delay: Duration::from_millis(1500),
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(config: &Config) -> Self {
        Self {
            word_threshold: config.word_threshold,
            verb_threshold: config.verb_threshold,
            correct_delay: Duration::from_millis(config.correct_delay_ms),
            incorrect_delay: Duration::from_millis(config.incorrect_delay_ms),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    /// Answer judged; waiting for the auto-advance.
    Feedback,
    RoundComplete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub mode: TrainingMode,
    pub direction: Option<Direction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Prompt(Prompt),
    RoundComplete(RoundStats),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect { expected: String },
    Skipped { expected: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub verdict: Verdict,
    /// How long the feedback stays up before the next item.
    pub delay: Duration,
}

impl Feedback {
    pub fn is_positive(&self) -> bool {
        !matches!(self.verdict, Verdict::Incorrect { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub round: u32,
    pub correct: u32,
    pub missed: u32,
    pub skipped: u32,
}

pub struct Session {
    id: SessionId,
    deck: Deck,
    config: SessionConfig,
    current: Option<Card>,
    last_missed: Option<Card>,
    phase: Phase,
    stats: RoundStats,
    rng: SmallRng,
}

/// Load the deck for `mode` from `path` and open a session on it.
///
/// A missing file and a file without a single usable line both fail; no
/// session exists afterwards.
pub fn start(
    mode: TrainingMode,
    path: &Path,
    direction: Direction,
    config: SessionConfig,
    rng: SmallRng,
) -> Result<Session, StartError> {
    let deck = match mode {
        TrainingMode::Dictionary => {
            Deck::Dictionary(DictionaryDeck::new(deck::dictionary::load(path)?, direction))
        }
        TrainingMode::Irregular => Deck::Irregular(VerbDeck::new(deck::verbs::load(path)?)),
    };
    if deck.is_empty() {
        tracing::warn!(mode = mode.as_str(), path = %path.display(), "deck has no usable entries");
        return Err(StartError::EmptyDataset(path.to_path_buf()));
    }
    tracing::info!(mode = mode.as_str(), items = deck.len(), "starting session");
    Ok(Session::new(deck, config, rng))
}

impl Session {
    pub fn new(deck: Deck, config: SessionConfig, rng: SmallRng) -> Self {
        Self {
            id: SessionId::next(),
            deck,
            config,
            current: None,
            last_missed: None,
            phase: Phase::AwaitingAnswer,
            stats: RoundStats {
                round: 1,
                ..RoundStats::default()
            },
            rng,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> TrainingMode {
        self.deck.mode()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&Card> {
        self.current.as_ref()
    }

    pub fn last_missed(&self) -> Option<&Card> {
        self.last_missed.as_ref()
    }

    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.deck {
            Deck::Dictionary(d) => Some(d.direction),
            Deck::Irregular(_) => None,
        }
    }

    /// Switch the practice direction. Applies from the next item on.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        match &mut self.deck {
            Deck::Dictionary(d) if d.direction != direction => {
                d.direction = direction;
                tracing::debug!(%direction, "direction changed");
                true
            }
            _ => false,
        }
    }

    pub fn threshold(&self) -> u32 {
        match self.deck.mode() {
            TrainingMode::Dictionary => self.config.word_threshold,
            TrainingMode::Irregular => self.config.verb_threshold,
        }
    }

    pub fn count(&self, card: &Card) -> u32 {
        match (&self.deck, card) {
            (Deck::Dictionary(d), Card::Word { pair, direction }) => {
                d.progress.count(&(pair.clone(), *direction))
            }
            (Deck::Irregular(v), Card::Verb(verb)) => v.progress.count(verb),
            _ => 0,
        }
    }

    /// Cards still below the mastery threshold, in deck order.
    pub fn available(&self) -> Vec<Card> {
        let threshold = self.threshold();
        match &self.deck {
            Deck::Dictionary(d) => {
                let direction = d.direction;
                d.progress
                    .available(&d.pairs, threshold, |pair| (pair.clone(), direction))
                    .into_iter()
                    .map(|pair| Card::Word {
                        pair: pair.clone(),
                        direction,
                    })
                    .collect()
            }
            Deck::Irregular(v) => v
                .progress
                .available(&v.verbs, threshold, |verb| verb.clone())
                .into_iter()
                .cloned()
                .map(Card::Verb)
                .collect(),
        }
    }

    /// (mastered, total) for the active mode and direction.
    pub fn mastery(&self) -> (usize, usize) {
        let total = self.deck.len();
        (total - self.available().len(), total)
    }

    /// Pick the next card, or report the round as complete.
    ///
    /// The card missed or skipped last is not picked again straight away
    /// unless it is the only one left.
    pub fn next_item(&mut self) -> Step {
        let available = self.available();
        if available.is_empty() {
            self.current = None;
            self.last_missed = None;
            self.phase = Phase::RoundComplete;
            tracing::info!(
                round = self.stats.round,
                correct = self.stats.correct,
                missed = self.stats.missed,
                skipped = self.stats.skipped,
                "round complete"
            );
            return Step::RoundComplete(self.stats);
        }

        // Repeated deck lines give equal cards; the filter can leave nothing.
        let mut candidates: Vec<&Card> = match &self.last_missed {
            Some(missed) => available.iter().filter(|card| *card != missed).collect(),
            None => Vec::new(),
        };
        if candidates.is_empty() {
            candidates = available.iter().collect();
        }
        let card = candidates[self.rng.gen_range(0..candidates.len())].clone();

        self.last_missed = None;
        let prompt = Prompt {
            text: card.prompt().to_string(),
            mode: self.deck.mode(),
            direction: card.direction(),
        };
        self.current = Some(card);
        self.phase = Phase::AwaitingAnswer;
        Step::Prompt(prompt)
    }

    /// Judge the submitted fields against the current card.
    ///
    /// Dictionary cards read the first field. Verb cards need the past form
    /// in the first field and the participle in the second. Returns `None`
    /// when no answer is expected right now.
    pub fn check_answer(&mut self, fields: &[&str]) -> Option<Feedback> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let card = self.current.clone()?;
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let correct = match &card {
            Card::Word { .. } => answer::matches(field(0), &card.expected()),
            Card::Verb(verb) => {
                answer::matches(field(0), &verb.past)
                    && answer::matches(field(1), &verb.participle)
            }
        };

        self.phase = Phase::Feedback;
        if correct {
            let count = self.record_success(&card);
            self.stats.correct += 1;
            tracing::debug!(prompt = card.prompt(), count, "correct answer");
            Some(Feedback {
                verdict: Verdict::Correct,
                delay: self.config.correct_delay,
            })
        } else {
            tracing::debug!(prompt = card.prompt(), "wrong answer");
            self.stats.missed += 1;
            let expected = card.expected();
            self.last_missed = Some(card);
            Some(Feedback {
                verdict: Verdict::Incorrect { expected },
                delay: self.config.incorrect_delay,
            })
        }
    }

    /// Skip the current card. Progress is credited exactly as for a correct
    /// answer; like a miss, the card is held back from the next pick.
    pub fn skip_current(&mut self) -> Option<Feedback> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let card = self.current.clone()?;
        self.phase = Phase::Feedback;
        let count = self.record_success(&card);
        self.stats.skipped += 1;
        tracing::debug!(prompt = card.prompt(), count, "skipped");
        let expected = card.expected();
        self.last_missed = Some(card);
        Some(Feedback {
            verdict: Verdict::Skipped { expected },
            delay: self.config.correct_delay,
        })
    }

    /// Leave the feedback phase. Called once per judged answer, either by the
    /// scheduled auto-advance or by the learner hurrying on.
    pub fn advance(&mut self) -> Option<Step> {
        if self.phase != Phase::Feedback {
            return None;
        }
        Some(self.next_item())
    }

    /// Answer to the completion prompt: start over with all progress cleared.
    pub fn restart_round(&mut self) -> Option<Step> {
        if self.phase != Phase::RoundComplete {
            return None;
        }
        self.deck.reset();
        self.last_missed = None;
        self.stats = RoundStats {
            round: self.stats.round + 1,
            ..RoundStats::default()
        };
        tracing::info!(round = self.stats.round, "restarting");
        Some(self.next_item())
    }

    /// End the session and hand back the final round's statistics.
    pub fn stop(self) -> RoundStats {
        tracing::info!(mode = self.deck.mode().as_str(), "session stopped");
        self.stats
    }

    fn record_success(&mut self, card: &Card) -> u32 {
        match (&mut self.deck, card) {
            (Deck::Dictionary(d), Card::Word { pair, direction }) => {
                d.progress.increment(&(pair.clone(), *direction))
            }
            (Deck::Irregular(v), Card::Verb(verb)) => v.progress.increment(verb),
            _ => 0,
        }
    }
}
