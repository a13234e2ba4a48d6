pub mod answer;
pub mod progress;
