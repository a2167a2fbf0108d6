//! Label to product URL lookup against a keyed product index.
//!
//! Each entry is stored under `<prefix>/<variant>.json` or `<prefix>/<variant>.txt`,
//! where the variant is the raw label, its lowercase form, or a slug.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_PREFIX: &str = "product-index";

static SLUG_SEPARATOR: OnceLock<Option<Regex>> = OnceLock::new();

/// Storage holding product entries by key.
#[async_trait]
pub trait ProductIndex: Send + Sync {
    /// Raw entry bytes, or `None` when no entry exists under `key`.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Product index laid out as files beneath a local directory.
pub struct DirectoryIndex {
    root: PathBuf,
}

impl DirectoryIndex {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ProductIndex for DirectoryIndex {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

#[derive(Deserialize)]
struct ProductEntry {
    url: Option<serde_json::Value>,
}

/// Lowercases `label` and collapses every run of non-alphanumerics into `-`.
pub fn slugify(label: &str) -> String {
    let lower = label.to_lowercase();
    let re = SLUG_SEPARATOR.get_or_init(|| Regex::new(r"[^a-z0-9]+").ok());
    match re {
        Some(re) => re.replace_all(&lower, "-").trim_matches('-').to_string(),
        None => lower,
    }
}

/// Keys probed for `label`, in lookup order.
pub fn candidate_keys(prefix: &str, label: &str) -> Vec<String> {
    let lower = label.to_lowercase();
    let slug = slugify(label);
    let mut keys = Vec::with_capacity(6);
    for variant in [label, lower.as_str(), slug.as_str()] {
        for ext in ["json", "txt"] {
            keys.push(format!("{}/{}.{}", prefix, variant, ext));
        }
    }
    keys
}

/// Extracts a product URL from an entry body.
///
/// A JSON object with a non-blank string `url` wins; otherwise the whole
/// body is taken as the URL when it is non-blank text.
pub fn parse_product_entry(content: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(content);
    if let Ok(ProductEntry {
        url: Some(serde_json::Value::String(url)),
    }) = serde_json::from_str::<ProductEntry>(&text)
    {
        let url = url.trim();
        if !url.is_empty() {
            return Some(url.to_string());
        }
    }
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Returns the first product URL found among the candidate keys for `label`.
pub async fn lookup_product_url(
    index: &dyn ProductIndex,
    prefix: &str,
    label: &str,
) -> Result<Option<String>> {
    for key in candidate_keys(prefix, label) {
        let Some(content) = index.fetch(&key).await? else {
            continue;
        };
        if let Some(url) = parse_product_entry(&content) {
            debug!(%key, %url, "product entry found");
            return Ok(Some(url));
        }
    }
    Ok(None)
}
