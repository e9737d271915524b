//! Shimmer placeholder shown while an image is being transformed.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::DEFAULT_IMAGE_DIMENSION;

static DEFAULT_DATA_URL: LazyLock<String> =
    LazyLock::new(|| data_url(DEFAULT_IMAGE_DIMENSION, DEFAULT_IMAGE_DIMENSION));

/// Animated gradient SVG of the given size.
pub fn shimmer(width: u32, height: u32) -> String {
    format!(
        r##"
<svg width="{width}" height="{height}" version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <defs>
    <linearGradient id="g">
      <stop stop-color="#7986AC" offset="20%" />
      <stop stop-color="#68769e" offset="50%" />
      <stop stop-color="#7986AC" offset="70%" />
    </linearGradient>
  </defs>
  <rect width="{width}" height="{height}" fill="#7986AC" />
  <rect id="r" width="{width}" height="{height}" fill="url(#g)" />
  <animate xlink:href="#r" attributeName="x" from="-{width}" to="{width}" dur="1s" repeatCount="indefinite"  />
</svg>"##
    )
}

/// The shimmer SVG as a base64 `data:` URL usable in an `<img src>`.
pub fn data_url(width: u32, height: u32) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(shimmer(width, height))
    )
}

/// The 1000×1000 placeholder, encoded once.
pub fn default_data_url() -> &'static str {
    &DEFAULT_DATA_URL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shimmer_embeds_dimensions() {
        let svg = shimmer(320, 240);
        assert!(svg.contains(r#"width="320" height="240""#));
        assert!(svg.contains(r#"from="-320" to="320""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn data_url_decodes_back_to_svg() {
        let url = data_url(10, 20);
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, shimmer(10, 20));
    }

    #[test]
    fn default_data_url_is_cached() {
        let first = default_data_url();
        assert!(std::ptr::eq(first, default_data_url()));
        assert_eq!(first, data_url(1000, 1000));
    }
}
