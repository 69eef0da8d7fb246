use std::path::Path;
use tokenizers::{Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy};

use crate::classifier::{Error, Result};

/// Turns raw text into vocabulary ids, special tokens included.
pub trait SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>>;

    fn pad_id(&self) -> u32;
}

/// SentencePiece vocabulary of KoBERT, exported as a `tokenizer.json`.
#[derive(Clone)]
pub struct KoBertTokenizer {
    tokenizer: Tokenizer,
    pad_id: u32,
}

impl KoBertTokenizer {
    pub fn from_file<P: AsRef<Path>>(path: P, max_seq_length: usize, pad_id: u32) -> Result<Self> {
        let mut tokenizer = Tokenizer::from_file(path.as_ref())?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: max_seq_length,
                strategy: TruncationStrategy::LongestFirst,
                stride: 0,
                direction: TruncationDirection::Right,
            }))?;
        tracing::info!(
            path = %path.as_ref().display(),
            vocab_size = tokenizer.get_vocab_size(true),
            "loaded tokenizer"
        );
        Ok(Self { tokenizer, pad_id })
    }
}

impl SentenceTokenizer for KoBertTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self.tokenizer.encode(text, true)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn pad_id(&self) -> u32 {
        self.pad_id
    }
}

/// Fixed-length single-sentence input for the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreprocessedInput {
    pub token_ids: Vec<u32>,
    pub valid_length: usize,
    pub segment_ids: Vec<u32>,
}

impl PreprocessedInput {
    /// `1` for positions before `valid_length`, `0` for padding.
    pub fn attention_mask(&self) -> Vec<u8> {
        attention_mask(self.token_ids.len(), self.valid_length)
    }

    pub fn seq_len(&self) -> usize {
        self.token_ids.len()
    }
}

pub fn attention_mask(seq_len: usize, valid_length: usize) -> Vec<u8> {
    (0..seq_len).map(|i| u8::from(i < valid_length)).collect()
}

pub struct SentencePreprocessor<T> {
    tokenizer: T,
    max_seq_length: usize,
}

impl<T: SentenceTokenizer> SentencePreprocessor<T> {
    pub fn new(tokenizer: T, max_seq_length: usize) -> Result<Self> {
        if max_seq_length == 0 {
            return Err(Error::InvalidConfig(
                "max_seq_length must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            tokenizer,
            max_seq_length,
        })
    }

    pub fn max_seq_length(&self) -> usize {
        self.max_seq_length
    }

    pub fn preprocess(&self, text: &str) -> Result<PreprocessedInput> {
        let mut token_ids = self.tokenizer.tokenize(text)?;
        // Truncation belongs to the tokenizer; this only holds the length.
        if token_ids.len() > self.max_seq_length {
            tracing::warn!(
                produced = token_ids.len(),
                max_seq_length = self.max_seq_length,
                "tokenizer exceeded the sequence length, dropping trailing ids"
            );
            token_ids.truncate(self.max_seq_length);
        }
        let valid_length = token_ids.len();
        token_ids.resize(self.max_seq_length, self.tokenizer.pad_id());
        Ok(PreprocessedInput {
            token_ids,
            valid_length,
            segment_ids: vec![0; self.max_seq_length],
        })
    }
}
