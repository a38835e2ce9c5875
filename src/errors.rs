use std::path::PathBuf;
use thiserror::Error;

pub type EspoResult<T, E = EspoErr> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EspoErr {
    #[error("Couldn't open file {file}: {error}")]
    File {
        file: PathBuf,
        error: std::io::Error,
    },

    #[error("IO err -> {0}")]
    IO(#[from] std::io::Error),

    #[error("Serde err -> {0}")]
    Serde(#[from] serde_json::error::Error),

    #[error("CSV err -> {0}")]
    Csv(#[from] csv::Error),

    #[error("Espo lexicon err -> {0}")]
    Lexicon(#[from] LexiconErr),

    #[error("Markov model err -> {0}")]
    Model(#[from] ModelErr),

    #[error("Segmentation err -> {0}")]
    Segment(#[from] SegmentErr),
}

#[derive(Debug, Error)]
/// Ошибки чтения пословных списков морфем.
pub enum LexiconErr {
    #[error("Couldn't read morpheme list {file}: {error}")]
    List {
        file: PathBuf,
        error: std::io::Error,
    },
}

#[derive(Debug, Error)]
/// Ошибки обучения, сохранения и открытия марковской модели.
pub enum ModelErr {
    #[error("Couldn't read training corpus {file}: {error}")]
    Corpus {
        file: PathBuf,
        error: std::io::Error,
    },

    #[error("Corpus row {line} lost its '{field}' field")]
    LostField { line: usize, field: &'static str },

    #[error("Corpus row {line} has unknown morpheme type '{name}'")]
    UnknownTag { line: usize, name: String },

    #[error("Corpus row {line} has bad frequency '{value}': {source}")]
    Frequency {
        line: usize,
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("Couldn't create model outdir {outdir}: {error}")]
    Outdir {
        outdir: PathBuf,
        error: std::io::Error,
    },

    #[error("Couldn't access model file {file}: {error}")]
    ModelFile {
        file: PathBuf,
        error: std::io::Error,
    },

    #[error("Serde err -> {0}")]
    Serde(#[from] serde_json::error::Error),

    #[error("Model context '{0}' has no states")]
    EmptyContext(String),

    #[error("Model state '{0}' is not a known morpheme type")]
    UnknownState(String),

    #[error("Model context '{key}' has {found} states, expected {expected}")]
    OrderMismatch {
        key: String,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
/// Ошибки сегментации слова.
pub enum SegmentErr {
    #[error("Morpheme '{0}' was lost from the trie")]
    LostMorpheme(String),
}
