#![allow(dead_code)]

use std::cell::Cell;

use candle_core::{DType, Device, Tensor};
use candle_nn::Linear;
use kobert_emotion::model::{EmotionModel, SequenceEncoder};
use kobert_emotion::preprocess::{SentencePreprocessor, SentenceTokenizer};
use kobert_emotion::{EmotionClassifier, EmotionPredictor, Prediction, Result};

pub const HIDDEN_SIZE: usize = 16;

/// Encoder that ignores its input and emits all zeros.
pub struct ZeroEncoder;

impl SequenceEncoder for ZeroEncoder {
    fn encode(
        &self,
        input_ids: &Tensor,
        _attention_mask: &Tensor,
        _segment_ids: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let (batch, seq_len) = input_ids.dims2()?;
        Tensor::zeros((batch, seq_len, HIDDEN_SIZE), DType::F32, input_ids.device())
    }
}

/// One id per character between `[CLS]` (2) and `[SEP]` (3); pads with 1.
pub struct CharTokenizer;

impl SentenceTokenizer for CharTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = vec![2];
        ids.extend(text.chars().map(|c| 5 + c as u32 % 8000));
        ids.push(3);
        Ok(ids)
    }

    fn pad_id(&self) -> u32 {
        1
    }
}

/// Classifier whose logits are always `bias`.
pub fn fixed_logits_classifier(bias: [f32; 5]) -> EmotionClassifier<ZeroEncoder, CharTokenizer> {
    let device = Device::Cpu;
    let weight = Tensor::zeros((5, HIDDEN_SIZE), DType::F32, &device)
        .unwrap_or_else(|e| panic!("weight tensor: {e}"));
    let bias = Tensor::new(&bias, &device).unwrap_or_else(|e| panic!("bias tensor: {e}"));
    let model = EmotionModel::new(ZeroEncoder, Linear::new(weight, Some(bias)), 0.6).eval();
    let preprocessor = SentencePreprocessor::new(CharTokenizer, 64)
        .unwrap_or_else(|e| panic!("preprocessor: {e}"));
    EmotionClassifier::new(model, preprocessor, device)
}

/// Predictor that counts its calls.
#[derive(Default)]
pub struct CountingPredictor {
    pub calls: Cell<usize>,
}

impl EmotionPredictor for CountingPredictor {
    fn predict(&self, _text: &str) -> Result<Prediction> {
        self.calls.set(self.calls.get() + 1);
        Prediction::from_probabilities(&[0.2; 5])
    }
}
