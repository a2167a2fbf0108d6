//! # flyvision-rs
//!
//! Glue between a screenshot, an image-labeling service and a product index:
//! a touch on the screenshot resolves to the detected object under the finger
//! and then to a product URL.
//!
//! ## Features
//!
//! - **DetectLabels mapping**: Load labeling responses in the service's wire shape
//! - **Image locations**: Parse `s3://` and https object-storage URLs
//! - **Product index**: Look up a product URL for a label by raw, lowercase or slug key
//! - **Recommend pipeline**: Validate a request, detect, resolve and look up in one call
//!
//! ## Quick Start
//!
//! ```ignore
//! use flyvision_rs::prelude::*;
//!
//! let detector = ResponseFileDetector::new("labels.json");
//! let index = DirectoryIndex::new("./index");
//! let recommender = Recommender::new(Box::new(detector), Some(Box::new(index)), RecommendOptions::default());
//!
//! let request = RecommendRequest::from_json(&body)?;
//! let rec = recommender.recommend(&request).await?;
//! println!("{} -> {}", rec.label, rec.product_url);
//! ```

pub mod detect_labels;
pub mod image_location;
pub mod product_index;
pub mod recommend;

pub use flyvision_core::{
    normalize_point, resolve_label, BoundingBox, DetectError, DetectOptions, ImageSource, Instance,
    LabelDetector, LabelRecord, NormalizedPoint, ResolveError,
};

// Re-export commonly used types at the root level
pub use detect_labels::{parse_detect_labels, DetectLabelsResponse, ResponseFileDetector};
pub use image_location::{content_type_for, image_source_from_url, parse_s3_url};
pub use product_index::{candidate_keys, lookup_product_url, parse_product_entry, slugify, DirectoryIndex, ProductIndex};
pub use recommend::{ErrorDetail, Recommendation, RecommendError, RecommendOptions, RecommendRequest, Recommender};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use flyvision_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        content_type_for, image_source_from_url, lookup_product_url, normalize_point, parse_detect_labels,
        parse_s3_url, resolve_label, BoundingBox, DetectLabelsResponse, DetectOptions, DirectoryIndex, ImageSource,
        LabelDetector, LabelRecord, NormalizedPoint, ProductIndex, RecommendError, RecommendOptions,
        RecommendRequest, Recommendation, Recommender, ResponseFileDetector,
    };
}
