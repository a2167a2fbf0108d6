//! Parsing of image URLs into the object-storage location or plain HTTP URL
//! the detector should read from.
use flyvision_core::ImageSource;
use regex::Regex;
use std::sync::OnceLock;

/// Bucket/key patterns for https object-storage URLs, tried in order.
static S3_HTTP_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn get_s3_http_patterns() -> &'static Vec<Regex> {
    S3_HTTP_PATTERNS.get_or_init(|| {
        [
            // virtual-hosted style: https://<bucket>.s3.<region>.amazonaws.com/<key>
            r"^https?://([a-z0-9_.-]+)\.s3[.-][a-z0-9-]+\.amazonaws\.com/(.+)",
            // path style: https://s3.<region>.amazonaws.com/<bucket>/<key>
            r"^https?://s3[.-][a-z0-9-]+\.amazonaws\.com/([^/]+)/(.+)",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Splits an object-storage URL into `(bucket, key)`.
///
/// Accepts `s3://bucket/key` plus the virtual-hosted and path-style https
/// forms. Anything else, including `s3://bucket` without a key, is `None`.
pub fn parse_s3_url(url: &str) -> Option<(String, String)> {
    if let Some(rest) = url.strip_prefix("s3://") {
        let (bucket, key) = rest.split_once('/')?;
        return Some((bucket.to_string(), key.to_string()));
    }

    get_s3_http_patterns().iter().find_map(|re| {
        let caps = re.captures(url)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    })
}

/// Object storage when the URL parses as one, otherwise a plain HTTP fetch.
pub fn image_source_from_url(url: &str) -> ImageSource {
    match parse_s3_url(url) {
        Some((bucket, key)) => ImageSource::S3 { bucket, key },
        None => ImageSource::Http(url.to_string()),
    }
}

/// Content type guessed from the URL's extension, defaulting to JPEG.
pub fn content_type_for(url: &str) -> &'static str {
    let lower = url.to_lowercase();
    [
        (".png", "image/png"),
        (".gif", "image/gif"),
        (".webp", "image/webp"),
        (".bmp", "image/bmp"),
    ]
    .iter()
    .find(|(ext, _)| lower.ends_with(ext))
    .map(|(_, content_type)| *content_type)
    .unwrap_or("image/jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(bucket: &str, key: &str) -> Option<(String, String)> {
        Some((bucket.to_string(), key.to_string()))
    }

    #[test]
    fn test_s3_scheme() {
        assert_eq!(parse_s3_url("s3://shots/2024/a.png"), pair("shots", "2024/a.png"));
        assert_eq!(parse_s3_url("s3://shots"), None);
    }

    #[test]
    fn test_virtual_hosted_style() {
        assert_eq!(
            parse_s3_url("https://my.shots.s3.us-east-1.amazonaws.com/dir/a.jpg"),
            pair("my.shots", "dir/a.jpg")
        );
        assert_eq!(
            parse_s3_url("http://shots.s3-eu-west-1.amazonaws.com/a.jpg"),
            pair("shots", "a.jpg")
        );
    }

    #[test]
    fn test_path_style() {
        assert_eq!(
            parse_s3_url("https://s3.us-west-2.amazonaws.com/shots/dir/a.jpg"),
            pair("shots", "dir/a.jpg")
        );
    }

    #[test]
    fn test_key_stops_at_newline() {
        assert_eq!(
            parse_s3_url("https://shots.s3.us-east-1.amazonaws.com/a.jpg\nextra"),
            pair("shots", "a.jpg")
        );
        assert_eq!(
            parse_s3_url("https://s3.us-east-1.amazonaws.com/shots/b.jpg\nextra"),
            pair("shots", "b.jpg")
        );
    }

    #[test]
    fn test_other_urls_are_http() {
        assert_eq!(parse_s3_url("https://example.com/a.png"), None);
        assert_eq!(
            image_source_from_url("https://example.com/a.png"),
            ImageSource::Http("https://example.com/a.png".to_string())
        );
        assert_eq!(
            image_source_from_url("s3://b/k.png"),
            ImageSource::S3 {
                bucket: "b".to_string(),
                key: "k.png".to_string()
            }
        );
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("s3://b/SHOT.PNG"), "image/png");
        assert_eq!(content_type_for("https://x/a.webp"), "image/webp");
        assert_eq!(content_type_for("https://x/a.gif"), "image/gif");
        assert_eq!(content_type_for("https://x/a.bmp"), "image/bmp");
        assert_eq!(content_type_for("https://x/a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("https://x/a"), "image/jpeg");
    }
}
