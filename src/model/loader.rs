use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::BertModel;
use std::path::Path;

use super::config::Config;
use super::EmotionModel;
use crate::classifier::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightFormat {
    /// `torch.save(model.state_dict())` output.
    PyTorch,
    SafeTensors,
}

impl WeightFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("safetensors") => Self::SafeTensors,
            _ => Self::PyTorch,
        }
    }
}

/// Fails with [`Error::WeightsNotFound`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::WeightsNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Builds the encoder and classification head from a saved parameter set and
/// returns the model in inference mode.
///
/// Encoder tensors are read from `bert.*`, the projection from `classifier.*`.
pub fn load<P: AsRef<Path>>(path: P, config: &Config, device: &Device) -> Result<EmotionModel> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let format = WeightFormat::from_path(path);
    tracing::info!(path = %path.display(), ?format, "loading model weights");

    let var_builder = match format {
        WeightFormat::SafeTensors => unsafe {
            VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)
        }?,
        WeightFormat::PyTorch => VarBuilder::from_pth(path, DType::F32, device)?,
    };

    let encoder = BertModel::load(var_builder.pp("bert"), &config.bert_config)?;
    let head = &config.classifier_config;
    let classifier = candle_nn::linear(
        config.hidden_size(),
        head.num_classes,
        var_builder.pp("classifier"),
    )?;

    Ok(EmotionModel::new(encoder, classifier, head.dr_rate).eval())
}
