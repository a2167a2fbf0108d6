//! # flyvision-core
//!
//! Resolves a touch on a screenshot to the object label the user most likely
//! meant, given the labels and bounding boxes returned by an image-labeling
//! service. Everything here is pure and synchronous except the
//! [`LabelDetector`] seam, which describes the external service.
//!
//! ```
//! use flyvision_core::{normalize_point, resolve_label, BoundingBox, LabelRecord};
//!
//! let labels = vec![
//!     LabelRecord::new("Table", 80.0).with_instance(BoundingBox::new(0.0, 0.0, 1.0, 1.0), None),
//!     LabelRecord::new("Cup", 90.0).with_instance(BoundingBox::new(0.1, 0.1, 0.1, 0.1), None),
//! ];
//! let point = normalize_point(150.0, 150.0, 1000.0, 1000.0).unwrap();
//! assert_eq!(resolve_label(&labels, point).as_deref(), Some("Cup"));
//! ```

pub mod detector;
pub mod normalize;
pub mod region;
pub mod resolver;

pub use detector::{apply_detect_options, DetectError, DetectOptions, ImageSource, LabelDetector};
pub use normalize::{normalize_point, ResolveError};
pub use region::{BoundingBox, Instance, LabelRecord, NormalizedPoint};
pub use resolver::resolve_label;
