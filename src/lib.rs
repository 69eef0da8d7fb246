pub mod classifier;
pub mod cli;
pub mod context;
pub mod labels;
pub mod model;
pub mod preprocess;
pub mod repl;

#[cfg(test)]
mod test_fixtures;

pub use classifier::{EmotionClassifier, EmotionPredictor, Error, Prediction, Result};
pub use labels::Emotion;
