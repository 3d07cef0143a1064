//! Chart image analysis: decoding, edge-density profile and extrema.

pub mod extrema;
pub mod profile;

pub use extrema::detect_extrema;
pub use profile::extract_profile;

use crate::types::{ExtremumSet, ImageSize, Profile};
use image::RgbImage;
use thiserror::Error;

/// Errors raised while turning uploaded bytes into a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("empty upload")]
    Empty,

    #[error("unreadable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode PNG or JPEG bytes into an RGB raster.
///
/// The format is sniffed from the content, not the file name.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ChartError> {
    if bytes.is_empty() {
        return Err(ChartError::Empty);
    }
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgb8())
}

/// Visual features of a single chart.
#[derive(Debug, Clone)]
pub struct ChartFeatures {
    pub size: ImageSize,
    pub profile: Profile,
    pub extrema: ExtremumSet,
}

/// Run the full image pipeline on a decoded chart.
pub fn analyze_image(image: &RgbImage) -> ChartFeatures {
    let profile = extract_profile(image);
    let extrema = detect_extrema(profile.values());

    ChartFeatures {
        size: ImageSize {
            width: image.width(),
            height: image.height(),
        },
        profile,
        extrema,
    }
}

/// Decode and analyse raw upload bytes.
pub fn analyze_bytes(bytes: &[u8]) -> Result<ChartFeatures, ChartError> {
    let image = decode_image(bytes)?;
    Ok(analyze_image(&image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(ChartError::Empty)));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not a png");
        assert!(matches!(result, Err(ChartError::Decode(_))));
    }

    #[test]
    fn test_analyze_image_reports_size() {
        let image = RgbImage::new(7, 13);
        let features = analyze_image(&image);

        assert_eq!(features.size, ImageSize { width: 7, height: 13 });
        assert_eq!(features.profile.len(), 13);
        assert!(features.extrema.is_empty());
    }
}
