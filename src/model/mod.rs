pub mod config;
pub mod loader;

use candle_core::{IndexOp, Tensor};
use candle_nn::{Dropout, Linear, Module, ModuleT};
use candle_transformers::models::bert::BertModel;

/// Pretrained encoder producing `(batch, seq_len, hidden_size)` representations.
pub trait SequenceEncoder {
    fn encode(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        segment_ids: &Tensor,
    ) -> candle_core::Result<Tensor>;
}

impl SequenceEncoder for BertModel {
    fn encode(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        segment_ids: &Tensor,
    ) -> candle_core::Result<Tensor> {
        self.forward(input_ids, segment_ids, Some(attention_mask))
    }
}

/// Encoder followed by dropout and a linear projection of the first position.
pub struct EmotionModel<E = BertModel> {
    encoder: E,
    dropout: Dropout,
    classifier: Linear,
    train: bool,
}

impl<E: SequenceEncoder> EmotionModel<E> {
    /// Assembles the model in training mode, as a freshly built head would be.
    pub fn new(encoder: E, classifier: Linear, dr_rate: f32) -> Self {
        Self {
            encoder,
            dropout: Dropout::new(dr_rate),
            classifier,
            train: true,
        }
    }

    /// Switches dropout off for inference.
    pub fn eval(mut self) -> Self {
        self.train = false;
        self
    }

    pub fn is_training(&self) -> bool {
        self.train
    }

    /// Returns `(batch, num_classes)` logits.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        segment_ids: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let sequence_output = self
            .encoder
            .encode(input_ids, attention_mask, segment_ids)?;
        let cls_token = sequence_output.i((.., 0))?;
        let pooled_output = self.dropout.forward_t(&cls_token, self.train)?;
        self.classifier.forward(&pooled_output)
    }
}
