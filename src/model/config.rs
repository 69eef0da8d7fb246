use candle_transformers::models::bert::Config as BertConfig;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use crate::classifier::{Error, Result};
use crate::labels::Emotion;

/// HuggingFace `config.json` of the KoBERT base checkpoint.
const KOBERT_CONFIG: &str = r#"{
    "attention_probs_dropout_prob": 0.1,
    "hidden_act": "gelu",
    "hidden_dropout_prob": 0.1,
    "hidden_size": 768,
    "initializer_range": 0.02,
    "intermediate_size": 3072,
    "layer_norm_eps": 1e-12,
    "max_position_embeddings": 512,
    "model_type": "bert",
    "num_attention_heads": 12,
    "num_hidden_layers": 12,
    "pad_token_id": 1,
    "type_vocab_size": 2,
    "vocab_size": 8002
}"#;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub bert_config: BertConfig,
    #[serde(flatten)]
    pub classifier_config: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_num_classes")]
    pub num_classes: usize,
    #[serde(default = "default_dr_rate")]
    pub dr_rate: f32,
    #[serde(default = "default_max_seq_length")]
    pub max_seq_length: usize,
}

fn default_num_classes() -> usize {
    Emotion::ALL.len()
}

fn default_dr_rate() -> f32 {
    0.6
}

fn default_max_seq_length() -> usize {
    64
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            num_classes: default_num_classes(),
            dr_rate: default_dr_rate(),
            max_seq_length: default_max_seq_length(),
        }
    }
}

impl Config {
    /// The KoBERT base encoder with the five-way emotion head.
    pub fn kobert() -> Result<Self> {
        Self::from_json(KOBERT_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn hidden_size(&self) -> usize {
        self.bert_config.hidden_size
    }

    pub fn pad_id(&self) -> Result<u32> {
        u32::try_from(self.bert_config.pad_token_id).map_err(|_| {
            Error::InvalidConfig(format!(
                "pad_token_id {} does not fit a token id",
                self.bert_config.pad_token_id
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        let head = &self.classifier_config;
        if head.num_classes != Emotion::ALL.len() {
            return Err(Error::LabelCount {
                expected: Emotion::ALL.len(),
                actual: head.num_classes,
            });
        }
        // [CLS] and [SEP] must both fit.
        if head.max_seq_length < 2 {
            return Err(Error::InvalidConfig(format!(
                "max_seq_length must be at least 2, got {}",
                head.max_seq_length
            )));
        }
        if head.max_seq_length > self.bert_config.max_position_embeddings {
            return Err(Error::InvalidConfig(format!(
                "max_seq_length {} exceeds max_position_embeddings {}",
                head.max_seq_length, self.bert_config.max_position_embeddings
            )));
        }
        if !(0.0..1.0).contains(&head.dr_rate) {
            return Err(Error::InvalidConfig(format!(
                "dr_rate must be in [0, 1), got {}",
                head.dr_rate
            )));
        }
        Ok(())
    }
}
