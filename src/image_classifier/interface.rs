use image::DynamicImage;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: &str, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load model: {0}")]
    Model(String),

    #[error("model produces {outputs} scores but {labels} labels were loaded")]
    LabelMismatch { outputs: usize, labels: usize },
}

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("model is not loaded yet")]
    NotLoaded,

    #[error("failed to read image: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to fetch image: {0}")]
    Fetch(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A loaded model. Implementations may return predictions in any order.
pub trait ImageClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassificationError>;
}

pub trait ImageClassifierLoader {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ModelLoadError>;
}
