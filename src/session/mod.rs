pub mod controller;
pub mod mode;
pub mod schedule;

pub use controller::{
    Feedback, Phase, Prompt, RoundStats, Session, SessionConfig, StartError, Step, Verdict, start,
};
pub use mode::{Card, Direction, TrainingMode};
