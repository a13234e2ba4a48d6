use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::deck::dictionary::WordPair;
use crate::deck::verbs::VerbEntry;
use crate::engine::progress::ProgressTracker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    EnglishToRussian,
    RussianToEnglish,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::EnglishToRussian => Direction::RussianToEnglish,
            Direction::RussianToEnglish => Direction::EnglishToRussian,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::EnglishToRussian => "english-to-russian",
            Direction::RussianToEnglish => "russian-to-english",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english-to-russian" | "en-ru" => Ok(Direction::EnglishToRussian),
            "russian-to-english" | "ru-en" => Ok(Direction::RussianToEnglish),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingMode {
    Dictionary,
    Irregular,
}

impl TrainingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingMode::Dictionary => "dictionary",
            TrainingMode::Irregular => "irregular",
        }
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dictionary" | "words" => Ok(TrainingMode::Dictionary),
            "irregular" | "verbs" => Ok(TrainingMode::Irregular),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Progress key for dictionary mode; each direction is practiced separately.
pub type WordKey = (WordPair, Direction);

pub struct DictionaryDeck {
    pub pairs: Vec<WordPair>,
    pub progress: ProgressTracker<WordKey>,
    pub direction: Direction,
}

impl DictionaryDeck {
    pub fn new(pairs: Vec<WordPair>, direction: Direction) -> Self {
        let mut deck = Self {
            pairs,
            progress: ProgressTracker::new(),
            direction,
        };
        deck.reset();
        deck
    }

    pub fn reset(&mut self) {
        let keys = self.pairs.iter().flat_map(|pair| {
            [
                (pair.clone(), Direction::EnglishToRussian),
                (pair.clone(), Direction::RussianToEnglish),
            ]
        });
        self.progress.reset(keys);
    }
}

pub struct VerbDeck {
    pub verbs: Vec<VerbEntry>,
    pub progress: ProgressTracker<VerbEntry>,
}

impl VerbDeck {
    pub fn new(verbs: Vec<VerbEntry>) -> Self {
        let mut deck = Self {
            verbs,
            progress: ProgressTracker::new(),
        };
        deck.reset();
        deck
    }

    pub fn reset(&mut self) {
        self.progress.reset(self.verbs.iter().cloned());
    }
}

/// The loaded items of the active mode together with their progress.
pub enum Deck {
    Dictionary(DictionaryDeck),
    Irregular(VerbDeck),
}

impl Deck {
    pub fn mode(&self) -> TrainingMode {
        match self {
            Deck::Dictionary(_) => TrainingMode::Dictionary,
            Deck::Irregular(_) => TrainingMode::Irregular,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Deck::Dictionary(d) => d.pairs.len(),
            Deck::Irregular(v) => v.verbs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reset(&mut self) {
        match self {
            Deck::Dictionary(d) => d.reset(),
            Deck::Irregular(v) => v.reset(),
        }
    }
}

/// One item as presented to the learner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Card {
    Word { pair: WordPair, direction: Direction },
    Verb(VerbEntry),
}

impl Card {
    /// The term shown to the learner.
    pub fn prompt(&self) -> &str {
        match self {
            Card::Word {
                pair,
                direction: Direction::EnglishToRussian,
            } => &pair.english,
            Card::Word {
                pair,
                direction: Direction::RussianToEnglish,
            } => &pair.russian,
            Card::Verb(verb) => &verb.base,
        }
    }

    /// The answer in display form.
    pub fn expected(&self) -> String {
        match self {
            Card::Word {
                pair,
                direction: Direction::EnglishToRussian,
            } => pair.russian.clone(),
            Card::Word {
                pair,
                direction: Direction::RussianToEnglish,
            } => pair.english.clone(),
            Card::Verb(verb) => format!("{}, {}", verb.past, verb.participle),
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Card::Word { direction, .. } => Some(*direction),
            Card::Verb(_) => None,
        }
    }
}
