//! Wire model of a DetectLabels response and its mapping onto the core types.
//!
//! Keys are accepted in the service's PascalCase as well as lowercase or
//! snake_case, so recorded responses from other clients load unchanged.

use anyhow::{Context, Result};
use async_trait::async_trait;
use flyvision_core::{
    apply_detect_options, BoundingBox, DetectError, DetectOptions, ImageSource, Instance,
    LabelDetector, LabelRecord,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectLabelsResponse {
    #[serde(rename = "Labels", alias = "labels", default)]
    pub labels: Vec<WireLabel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireLabel {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "Confidence", alias = "confidence", default)]
    pub confidence: f64,
    #[serde(rename = "Instances", alias = "instances", default)]
    pub instances: Vec<WireInstance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireInstance {
    #[serde(
        rename = "BoundingBox",
        alias = "boundingBox",
        alias = "bounding_box",
        alias = "boundingbox",
        default
    )]
    pub bounding_box: WireBoundingBox,
    #[serde(rename = "Confidence", alias = "confidence", default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireBoundingBox {
    #[serde(rename = "Left", alias = "left", default)]
    pub left: f64,
    #[serde(rename = "Top", alias = "top", default)]
    pub top: f64,
    #[serde(rename = "Width", alias = "width", default)]
    pub width: f64,
    #[serde(rename = "Height", alias = "height", default)]
    pub height: f64,
}

impl From<WireBoundingBox> for BoundingBox {
    fn from(b: WireBoundingBox) -> Self {
        BoundingBox::new(b.left, b.top, b.width, b.height)
    }
}

impl From<WireInstance> for Instance {
    fn from(i: WireInstance) -> Self {
        Instance::new(i.bounding_box.into(), i.confidence)
    }
}

impl From<WireLabel> for LabelRecord {
    fn from(l: WireLabel) -> Self {
        LabelRecord {
            name: l.name,
            confidence: l.confidence,
            instances: l.instances.into_iter().map(Instance::from).collect(),
        }
    }
}

impl From<LabelRecord> for WireLabel {
    fn from(l: LabelRecord) -> Self {
        WireLabel {
            name: l.name,
            confidence: l.confidence,
            instances: l
                .instances
                .into_iter()
                .map(|i| WireInstance {
                    bounding_box: WireBoundingBox {
                        left: i.bounding_box.left,
                        top: i.bounding_box.top,
                        width: i.bounding_box.width,
                        height: i.bounding_box.height,
                    },
                    confidence: i.confidence,
                })
                .collect(),
        }
    }
}

impl DetectLabelsResponse {
    pub fn from_label_records(labels: Vec<LabelRecord>) -> Self {
        Self {
            labels: labels.into_iter().map(WireLabel::from).collect(),
        }
    }

    pub fn into_label_records(self) -> Vec<LabelRecord> {
        self.labels.into_iter().map(LabelRecord::from).collect()
    }
}

/// Parses a DetectLabels JSON body into label records.
pub fn parse_detect_labels(json: &str) -> Result<Vec<LabelRecord>> {
    let response: DetectLabelsResponse =
        serde_json::from_str(json).context("Failed to parse DetectLabels JSON")?;
    Ok(response.into_label_records())
}

/// Replays a recorded DetectLabels response instead of calling the service.
pub struct ResponseFileDetector {
    path: PathBuf,
}

impl ResponseFileDetector {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl LabelDetector for ResponseFileDetector {
    async fn detect(
        &self,
        source: &ImageSource,
        options: &DetectOptions,
    ) -> Result<Vec<LabelRecord>, DetectError> {
        debug!(?source, path = %self.path.display(), "replaying recorded label response");
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DetectError::Service(format!("{}: {}", self.path.display(), e)))?;
        let labels = parse_detect_labels(&contents)
            .map_err(|e| DetectError::InvalidInput(format!("{:#}", e)))?;
        let total = labels.len();
        let labels = apply_detect_options(labels, options);
        info!(total, kept = labels.len(), "labels loaded");
        Ok(labels)
    }
}
