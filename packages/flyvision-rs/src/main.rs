mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands};
use flyvision_rs::prelude::*;
use flyvision_rs::ErrorDetail;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flyvision=info,flyvision_rs=info")),
    )
    .init();

  let args = Args::parse();

  match run(args).await {
    Ok(code) => code,
    Err(e) => {
      eprintln!("Error: {:#}", e);
      ExitCode::FAILURE
    }
  }
}

/// 404-style outcomes exit 1, client errors 2, upstream failures 3.
fn exit_code_for(status: u16) -> ExitCode {
  match status {
    404 => ExitCode::from(1),
    400..=499 => ExitCode::from(2),
    _ => ExitCode::from(3),
  }
}

async fn read_labels(path: &Path) -> Result<Vec<LabelRecord>> {
  let contents = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("Failed to read {}", path.display()))?;
  parse_detect_labels(&contents)
}

async fn run(args: Args) -> Result<ExitCode> {
  match args.command {
    Commands::Version => {
      println!("flyvision {}", env!("CARGO_PKG_VERSION"));
      Ok(ExitCode::SUCCESS)
    }
    Commands::Resolve {
      labels,
      x,
      y,
      width,
      height,
    } => {
      let labels = read_labels(&labels).await?;
      let point = match normalize_point(x, y, width, height) {
        Ok(point) => point,
        Err(e) => {
          eprintln!("{}", e);
          return Ok(ExitCode::from(2));
        }
      };
      debug!(u = point.u, v = point.v, labels = labels.len(), "resolving");
      match resolve_label(&labels, point).filter(|name| !name.is_empty()) {
        Some(name) => {
          println!("{}", name);
          Ok(ExitCode::SUCCESS)
        }
        None => {
          eprintln!("no match");
          Ok(ExitCode::from(1))
        }
      }
    }
    Commands::Recommend {
      request,
      labels,
      index_dir,
      prefix,
      detect,
    } => {
      let body = tokio::fs::read_to_string(&request)
        .await
        .with_context(|| format!("Failed to read {}", request.display()))?;

      let index = index_dir.map(|dir| Box::new(DirectoryIndex::new(dir)) as Box<dyn ProductIndex>);
      let options = RecommendOptions {
        detect: detect.options(),
        product_prefix: prefix,
      };
      let recommender = Recommender::new(Box::new(ResponseFileDetector::new(labels)), index, options);

      let outcome = match RecommendRequest::from_json(&body) {
        Ok(req) => recommender.recommend(&req).await,
        Err(e) => Err(e),
      };
      match outcome {
        Ok(rec) => {
          println!("{}", serde_json::to_string_pretty(&rec)?);
          Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
          eprintln!("{}", serde_json::to_string(&ErrorDetail::from(&e))?);
          Ok(exit_code_for(e.status_code()))
        }
      }
    }
    Commands::Detect {
      image_url,
      labels,
      detect,
    } => {
      let source = image_source_from_url(&image_url);
      let detector = ResponseFileDetector::new(labels);
      let labels = detector.detect(&source, &detect.options()).await?;
      let response = DetectLabelsResponse::from_label_records(labels);
      println!("{}", serde_json::to_string_pretty(&response)?);
      Ok(ExitCode::SUCCESS)
    }
    Commands::Locate { url } => {
      let content_type = content_type_for(&url);
      let located = match image_source_from_url(&url) {
        ImageSource::S3 { bucket, key } => serde_json::json!({
          "source": "s3",
          "bucket": bucket,
          "key": key,
          "content_type": content_type,
        }),
        _ => serde_json::json!({
          "source": "http",
          "url": url,
          "content_type": content_type,
        }),
      };
      println!("{}", serde_json::to_string_pretty(&located)?);
      Ok(ExitCode::SUCCESS)
    }
  }
}
