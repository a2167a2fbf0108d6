//! Touch-to-product pipeline: validate the request, detect labels on the
//! screenshot, resolve the touched label, then look up its product URL.

use crate::image_location::image_source_from_url;
use crate::product_index::{lookup_product_url, ProductIndex, DEFAULT_PREFIX};
use flyvision_core::{
    normalize_point, resolve_label, DetectError, DetectOptions, LabelDetector, NormalizedPoint,
    ResolveError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenResolution {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Request body as sent by the capture client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(alias = "image_url", default)]
    pub image_s3_url: Option<String>,
    #[serde(default)]
    pub touch_point: Option<TouchPoint>,
    #[serde(default)]
    pub screen_resolution: Option<ScreenResolution>,
}

/// A request whose fields are present and whose point is normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub image_url: String,
    pub point: NormalizedPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub label: String,
    pub product_url: String,
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("image_s3_url is required")]
    MissingImageUrl,
    #[error("touch_point with x,y required")]
    MissingTouchPoint,
    #[error("screen_resolution with width,height required")]
    MissingResolution,
    #[error("Invalid touch point or resolution: {0}")]
    InvalidResolution(#[from] ResolveError),
    #[error("Failed to fetch image: {0}")]
    Fetch(#[source] DetectError),
    #[error("Label detection error: {0}")]
    Detection(#[source] DetectError),
    #[error("No suitable label found near point")]
    NoLabel,
    #[error("No product mapping for label: {0}")]
    NoProductMapping(String),
    #[error("Product index lookup error: {0:#}")]
    Index(anyhow::Error),
}

impl RecommendError {
    /// HTTP status a request layer would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RecommendError::InvalidBody(_)
            | RecommendError::MissingImageUrl
            | RecommendError::MissingTouchPoint
            | RecommendError::MissingResolution
            | RecommendError::InvalidResolution(_)
            | RecommendError::Fetch(_) => 400,
            RecommendError::NoLabel | RecommendError::NoProductMapping(_) => 404,
            RecommendError::Detection(_) | RecommendError::Index(_) => 502,
        }
    }
}

impl From<DetectError> for RecommendError {
    fn from(e: DetectError) -> Self {
        match e {
            DetectError::Service(_) => RecommendError::Detection(e),
            DetectError::Unsupported | DetectError::InvalidInput(_) => RecommendError::Fetch(e),
        }
    }
}

/// `{"detail": ...}` body used for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl From<&RecommendError> for ErrorDetail {
    fn from(e: &RecommendError) -> Self {
        Self {
            detail: e.to_string(),
        }
    }
}

impl RecommendRequest {
    pub fn from_json(body: &str) -> Result<Self, RecommendError> {
        serde_json::from_str(body).map_err(|e| RecommendError::InvalidBody(e.to_string()))
    }

    /// Checks required fields and normalizes the touch point.
    pub fn validate(&self) -> Result<ValidatedRequest, RecommendError> {
        let image_url = match self.image_s3_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Err(RecommendError::MissingImageUrl),
        };
        let (x, y) = match &self.touch_point {
            Some(TouchPoint {
                x: Some(x),
                y: Some(y),
            }) => (*x, *y),
            _ => return Err(RecommendError::MissingTouchPoint),
        };
        let (width, height) = match &self.screen_resolution {
            Some(ScreenResolution {
                width: Some(w),
                height: Some(h),
            }) => (*w, *h),
            _ => return Err(RecommendError::MissingResolution),
        };
        let point = normalize_point(x, y, width, height)?;
        Ok(ValidatedRequest { image_url, point })
    }
}

/// Options for the recommend pipeline
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    pub detect: DetectOptions,
    /// Key prefix of product entries inside the index
    pub product_prefix: String,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            detect: DetectOptions::default(),
            product_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

pub struct Recommender {
    detector: Box<dyn LabelDetector>,
    index: Option<Box<dyn ProductIndex>>,
    options: RecommendOptions,
}

impl Recommender {
    /// Without an index every resolved label ends in `NoProductMapping`.
    pub fn new(
        detector: Box<dyn LabelDetector>,
        index: Option<Box<dyn ProductIndex>>,
        options: RecommendOptions,
    ) -> Self {
        Self {
            detector,
            index,
            options,
        }
    }

    /// Resolves the touched label without looking up a product.
    pub async fn resolve(&self, request: &RecommendRequest) -> Result<String, RecommendError> {
        let validated = request.validate()?;
        let source = image_source_from_url(&validated.image_url);
        let labels = self.detector.detect(&source, &self.options.detect).await?;
        debug!(labels = labels.len(), u = validated.point.u, v = validated.point.v, "resolving touch");

        // a nameless label is not a usable match
        resolve_label(&labels, validated.point)
            .filter(|name| !name.is_empty())
            .ok_or(RecommendError::NoLabel)
    }

    pub async fn recommend(&self, request: &RecommendRequest) -> Result<Recommendation, RecommendError> {
        let label = self.resolve(request).await?;
        info!(%label, "label resolved");

        let url = match &self.index {
            Some(index) => lookup_product_url(index.as_ref(), &self.options.product_prefix, &label)
                .await
                .map_err(RecommendError::Index)?,
            None => {
                warn!("no product index configured");
                None
            }
        };

        match url {
            Some(product_url) => Ok(Recommendation { label, product_url }),
            None => Err(RecommendError::NoProductMapping(label)),
        }
    }
}
