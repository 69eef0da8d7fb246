//! Small on-disk artefacts shared by the unit tests: a one-layer BERT config,
//! randomly initialised weights saved as safetensors, and a word-level
//! `tokenizer.json` with a `[CLS] $A [SEP]` template.

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::bert::BertModel;
use std::path::Path;

use crate::model::config::Config;

pub const TINY_CONFIG: &str = r#"{
    "hidden_act": "gelu",
    "hidden_dropout_prob": 0.1,
    "hidden_size": 8,
    "initializer_range": 0.02,
    "intermediate_size": 16,
    "layer_norm_eps": 1e-12,
    "max_position_embeddings": 64,
    "model_type": "bert",
    "num_attention_heads": 2,
    "num_hidden_layers": 1,
    "pad_token_id": 1,
    "type_vocab_size": 2,
    "vocab_size": 16
}"#;

pub const CLS_ID: u32 = 2;
pub const SEP_ID: u32 = 3;

pub const TOKENIZER_JSON: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [],
    "normalizer": null,
    "pre_tokenizer": { "type": "WhitespaceSplit" },
    "post_processor": {
        "type": "TemplateProcessing",
        "single": [
            { "SpecialToken": { "id": "[CLS]", "type_id": 0 } },
            { "Sequence": { "id": "A", "type_id": 0 } },
            { "SpecialToken": { "id": "[SEP]", "type_id": 0 } }
        ],
        "pair": [
            { "SpecialToken": { "id": "[CLS]", "type_id": 0 } },
            { "Sequence": { "id": "A", "type_id": 0 } },
            { "SpecialToken": { "id": "[SEP]", "type_id": 0 } },
            { "Sequence": { "id": "B", "type_id": 1 } },
            { "SpecialToken": { "id": "[SEP]", "type_id": 1 } }
        ],
        "special_tokens": {
            "[CLS]": { "id": "[CLS]", "ids": [2], "tokens": ["[CLS]"] },
            "[SEP]": { "id": "[SEP]", "ids": [3], "tokens": ["[SEP]"] }
        }
    },
    "decoder": null,
    "model": {
        "type": "WordLevel",
        "vocab": {
            "[UNK]": 0,
            "[PAD]": 1,
            "[CLS]": 2,
            "[SEP]": 3,
            "나는": 4,
            "오늘": 5,
            "정말": 6,
            "기쁘다": 7,
            "슬프다": 8,
            "화가": 9,
            "난다": 10
        },
        "unk_token": "[UNK]"
    }
}"#;

pub fn tiny_config() -> Config {
    Config::from_json(TINY_CONFIG).unwrap()
}

/// Saves `bert.*` and `classifier.*` tensors for `config` to `path`.
pub fn write_weights(path: &Path, config: &Config) {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    BertModel::load(vb.pp("bert"), &config.bert_config).unwrap();
    candle_nn::linear(
        config.hidden_size(),
        config.classifier_config.num_classes,
        vb.pp("classifier"),
    )
    .unwrap();
    varmap.save(path).unwrap();
}

pub fn write_tokenizer(path: &Path) {
    std::fs::write(path, TOKENIZER_JSON).unwrap();
}
