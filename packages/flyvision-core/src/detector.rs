use async_trait::async_trait;
use thiserror::Error;

use crate::region::LabelRecord;

/// Location of the image handed to a label detector.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    S3 { bucket: String, key: String },
    Http(String),
    Bytes(Vec<u8>),
}

/// Knobs forwarded to the labeling service.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    pub max_labels: usize,
    pub min_confidence: f64,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            max_labels: 50,
            min_confidence: 50.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("unsupported image source")]
    Unsupported,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("detection service error: {0}")]
    Service(String),
}

/// External image-labeling service.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect(
        &self,
        source: &ImageSource,
        options: &DetectOptions,
    ) -> Result<Vec<LabelRecord>, DetectError>;
}

/// Drops labels below `min_confidence` and keeps at most `max_labels`, in order.
pub fn apply_detect_options(labels: Vec<LabelRecord>, options: &DetectOptions) -> Vec<LabelRecord> {
    labels
        .into_iter()
        .filter(|label| label.confidence >= options.min_confidence)
        .take(options.max_labels)
        .collect()
}
