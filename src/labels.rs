use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Emotion classes in the order of the classifier's output logits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Emotion {
    #[serde(rename = "분노")]
    Anger,
    #[serde(rename = "행복")]
    Happiness,
    #[serde(rename = "불안")]
    Anxiety,
    #[serde(rename = "놀람")]
    Surprise,
    #[serde(rename = "슬픔")]
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Happiness,
        Emotion::Anxiety,
        Emotion::Surprise,
        Emotion::Sadness,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Anger => "분노",
            Self::Happiness => "행복",
            Self::Anxiety => "불안",
            Self::Surprise => "놀람",
            Self::Sadness => "슬픔",
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
