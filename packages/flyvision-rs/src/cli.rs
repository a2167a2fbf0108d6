//! Command line arguments backing the `flyvision` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use flyvision_core::DetectOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "flyvision",
  about = "Resolve a touch on a screenshot to a detected label and product recommendation",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

/// Knobs forwarded to the label detector
#[derive(ClapArgs, Debug, Clone)]
pub struct DetectArgs {
  /// Maximum number of labels kept from the detection response
  #[arg(long, env = "REKOGNITION_MAX_LABELS", default_value = "50")]
  pub max_labels: usize,

  /// Minimum label confidence (0-100) kept from the detection response
  #[arg(long, env = "DETECT_MIN_CONFIDENCE", default_value = "50")]
  pub min_confidence: f64,
}

impl DetectArgs {
  pub fn options(&self) -> DetectOptions {
    DetectOptions {
      max_labels: self.max_labels,
      min_confidence: self.min_confidence,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Resolve a pixel touch point against a recorded DetectLabels response
  Resolve {
    /// DetectLabels JSON response file
    #[arg(long, short = 'l')]
    labels: PathBuf,

    /// Touch x in pixels
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Touch y in pixels
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Screen width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: f64,

    /// Screen height in pixels
    #[arg(long, allow_negative_numbers = true)]
    height: f64,
  },
  /// Run the full recommend pipeline for a request body
  Recommend {
    /// JSON request with image_s3_url, touch_point and screen_resolution
    #[arg(long, short = 'r')]
    request: PathBuf,

    /// DetectLabels JSON response to replay as the detector output
    #[arg(long, short = 'l')]
    labels: PathBuf,

    /// Directory holding the product index
    #[arg(long, env = "PRODUCT_INDEX_DIR")]
    index_dir: Option<PathBuf>,

    /// Key prefix of product entries inside the index
    #[arg(long, env = "PRODUCT_INDEX_PREFIX", default_value = "product-index")]
    prefix: String,

    #[command(flatten)]
    detect: DetectArgs,
  },
  /// Print the labels a detection would hand to the resolver
  Detect {
    /// Image URL (s3://, virtual-hosted, path-style or plain https)
    image_url: String,

    /// DetectLabels JSON response to replay as the detector output
    #[arg(long, short = 'l')]
    labels: PathBuf,

    #[command(flatten)]
    detect: DetectArgs,
  },
  /// Show where an image URL would be fetched from
  Locate {
    /// Image URL to parse
    url: String,
  },
}
