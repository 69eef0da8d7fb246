//! Command-line arguments for the `kobert-emotion` binary. Every path can also
//! be supplied through the environment.

use clap::Parser;
use std::path::PathBuf;

use crate::context::Settings;

pub const DEFAULT_WEIGHTS: &str = "../train_model/kobert_emotion_model_fixed.pth";
pub const DEFAULT_TOKENIZER: &str = "../train_model/tokenizer.json";

#[derive(Parser, Debug)]
#[command(name = "kobert-emotion")]
#[command(about = "Classify Korean sentences into five emotions with a fine-tuned KoBERT")]
pub struct Args {
    /// Trained classifier weights (`.pth` state dict or `.safetensors`).
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_WEIGHTS)]
    pub weights: PathBuf,

    /// KoBERT tokenizer in `tokenizer.json` form.
    #[arg(long, env = "KOBERT_TOKENIZER", default_value = DEFAULT_TOKENIZER)]
    pub tokenizer: PathBuf,

    /// Encoder `config.json`; the KoBERT base config is used when omitted.
    #[arg(long, env = "KOBERT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the padded sequence length of the model config.
    #[arg(long)]
    pub max_seq_length: Option<usize>,

    /// Share of device memory the process may reserve.
    #[arg(long, env = "KOBERT_MEMORY_FRACTION", default_value_t = 0.3)]
    pub memory_fraction: f32,

    /// Run on the CPU even when a GPU is available.
    #[arg(long)]
    pub cpu: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            weights: args.weights,
            tokenizer: args.tokenizer,
            config: args.config,
            max_seq_length: args.max_seq_length,
            memory_fraction: args.memory_fraction,
            force_cpu: args.cpu,
        }
    }
}
