use candle_core::Device;
use std::io::Write;
use std::path::PathBuf;

use crate::classifier::{EmotionClassifier, Error, Result};
use crate::model::config::Config;
use crate::model::loader;
use crate::preprocess::{KoBertTokenizer, SentencePreprocessor};
use crate::repl::LOAD_NOTICE;

/// Everything resolved from the command line before the model is built.
#[derive(Clone, Debug)]
pub struct Settings {
    pub weights: PathBuf,
    pub tokenizer: PathBuf,
    pub config: Option<PathBuf>,
    pub max_seq_length: Option<usize>,
    pub memory_fraction: f32,
    pub force_cpu: bool,
}

/// Process-wide state built once at startup.
pub struct AppContext {
    /// Upper bound on the share of device memory the process may reserve.
    pub memory_fraction: f32,
    pub classifier: EmotionClassifier,
}

pub fn validate_memory_fraction(fraction: f32) -> Result<f32> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(fraction)
    } else {
        Err(Error::InvalidConfig(format!(
            "memory fraction must be in (0, 1], got {fraction}"
        )))
    }
}

pub fn select_device(force_cpu: bool) -> Result<Device> {
    if force_cpu {
        return Ok(Device::Cpu);
    }
    Ok(Device::cuda_if_available(0)?)
}

impl AppContext {
    /// Builds the classifier, writing the load notice to `console` once the
    /// weight file is known to exist.
    pub fn initialize<W: Write>(settings: &Settings, console: &mut W) -> Result<Self> {
        let memory_fraction = validate_memory_fraction(settings.memory_fraction)?;
        let device = select_device(settings.force_cpu)?;

        let mut config = match &settings.config {
            Some(path) => Config::from_file(path)?,
            None => Config::kobert()?,
        };
        if let Some(max_seq_length) = settings.max_seq_length {
            config.classifier_config.max_seq_length = max_seq_length;
            config.validate()?;
        }

        // Before touching the tokenizer, so a missing model is the first failure.
        loader::ensure_exists(&settings.weights)?;
        writeln!(console, "{LOAD_NOTICE}")?;
        let model = loader::load(&settings.weights, &config, &device)?;
        tracing::info!("model weights loaded");

        let max_seq_length = config.classifier_config.max_seq_length;
        let tokenizer = KoBertTokenizer::from_file(&settings.tokenizer, max_seq_length, config.pad_id()?)?;
        let preprocessor = SentencePreprocessor::new(tokenizer, max_seq_length)?;

        Ok(Self {
            classifier: EmotionClassifier::new(model, preprocessor, device),
            memory_fraction,
        })
    }

    pub fn device(&self) -> &Device {
        self.classifier.device()
    }
}
