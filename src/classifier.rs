pub use candle_core::Device;
use candle_core::{Tensor, D};
use candle_transformers::models::bert::BertModel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::labels::Emotion;
use crate::model::EmotionModel;
use crate::model::SequenceEncoder;
use crate::preprocess::{KoBertTokenizer, SentencePreprocessor, SentenceTokenizer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model weights file does not exist: {}", path.display())]
    WeightsNotFound { path: PathBuf },
    #[error("tokenizer error: {0}")]
    TokenizerError(#[from] tokenizers::Error),
    #[error("candle error: {0}")]
    CandleError(#[from] candle_core::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("classifier produces {actual} classes but {expected} labels are defined")]
    LabelCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Something that turns one sentence into an emotion distribution.
pub trait EmotionPredictor {
    fn predict(&self, text: &str) -> Result<Prediction>;
}

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct Prediction {
    pub emotion: Emotion,
    /// Every label with its probability, in label index order.
    pub probabilities: Vec<(Emotion, f32)>,
}

impl Prediction {
    /// Pairs probabilities with labels by index; the first maximum wins ties.
    pub fn from_probabilities(probabilities: &[f32]) -> Result<Self> {
        if probabilities.len() != Emotion::ALL.len() {
            return Err(Error::LabelCount {
                expected: Emotion::ALL.len(),
                actual: probabilities.len(),
            });
        }
        let probabilities: Vec<(Emotion, f32)> = Emotion::ALL
            .iter()
            .copied()
            .zip(probabilities.iter().copied())
            .collect();
        let mut best = probabilities[0];
        for candidate in &probabilities[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        Ok(Self {
            emotion: best.0,
            probabilities,
        })
    }

    pub fn probability(&self, emotion: Emotion) -> f32 {
        self.probabilities
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

pub struct EmotionClassifier<E = BertModel, T = KoBertTokenizer> {
    model: EmotionModel<E>,
    preprocessor: SentencePreprocessor<T>,
    device: Device,
}

impl<E: SequenceEncoder, T: SentenceTokenizer> EmotionClassifier<E, T> {
    pub fn new(model: EmotionModel<E>, preprocessor: SentencePreprocessor<T>, device: Device) -> Self {
        Self {
            model,
            preprocessor,
            device,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Class logits for one sentence, shape `(1, num_classes)`.
    pub fn logits(&self, text: &str) -> Result<Tensor> {
        let input = self.preprocessor.preprocess(text)?;
        tracing::debug!(valid_length = input.valid_length, "preprocessed input");

        let input_ids = Tensor::new(input.token_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(input.attention_mask().as_slice(), &self.device)?.unsqueeze(0)?;
        let segment_ids = Tensor::new(input.segment_ids.as_slice(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &segment_ids)?;
        Ok(logits.detach())
    }
}

impl<E: SequenceEncoder, T: SentenceTokenizer> EmotionPredictor for EmotionClassifier<E, T> {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let logits = self.logits(text)?;
        let probabilities = candle_nn::ops::softmax(&logits, D::Minus1)?;
        let probabilities: Vec<f32> = probabilities.squeeze(0)?.to_vec1()?;
        let prediction = Prediction::from_probabilities(&probabilities)?;
        tracing::debug!(emotion = %prediction.emotion, "predicted");
        Ok(prediction)
    }
}
