//! Image-to-profile pipeline tests

use chart_mentor::services::chart::profile::edge_map;
use chart_mentor::services::chart::{analyze_bytes, analyze_image, ChartError};
use chart_mentor::services::{decode_image, detect_extrema, extract_profile};
use image::{ImageFormat, Rgb, RgbImage};
use proptest::prelude::*;
use std::io::Cursor;

const BACKGROUND: Rgb<u8> = Rgb([19, 23, 34]);
const LINE: Rgb<u8> = Rgb([38, 166, 154]);

fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// Draw a zigzag price line, three pixels thick, across a dark canvas.
fn zigzag_chart(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
    let amplitude = height as f64 * 0.35;
    let mid = height as f64 / 2.0;

    for x in 0..width {
        let phase = (x as f64 / width as f64) * std::f64::consts::TAU * 3.0;
        let y = (mid + amplitude * phase.sin()).round() as i64;
        for dy in -1..=1 {
            let yy = y + dy;
            if yy >= 0 && (yy as u32) < height {
                image.put_pixel(x, yy as u32, LINE);
            }
        }
    }
    image
}

#[test]
fn test_profile_length_matches_height() {
    for height in [1u32, 2, 3, 9, 10, 11, 64, 1000] {
        let image = zigzag_chart(24, height);
        let profile = extract_profile(&image);
        assert_eq!(profile.len(), height as usize, "height {}", height);
    }
}

#[test]
fn test_uniform_image_has_no_extrema() {
    let image = RgbImage::from_pixel(120, 80, BACKGROUND);
    let features = analyze_image(&image);

    assert!(features.profile.is_flat_zero());
    assert!(features.extrema.is_empty());
}

#[test]
fn test_narrow_image_is_processable() {
    // Narrower than the blur kernel
    let image = zigzag_chart(3, 50);
    let profile = extract_profile(&image);
    assert_eq!(profile.len(), 50);
    assert!(profile.values().iter().all(|v| *v >= 0.0));
}

#[test]
fn test_zigzag_chart_has_swings() {
    let image = zigzag_chart(300, 200);
    let features = analyze_image(&image);

    assert_eq!(features.profile.len(), 200);
    assert!(!features.profile.is_flat_zero());
    assert!(!features.extrema.is_empty());

    let values = features.profile.values();
    for &i in &features.extrema.peaks {
        assert!(values[i - 1] < values[i] && values[i] > values[i + 1]);
    }
}

#[test]
fn test_thin_price_line_is_detected() {
    // 1 px line, 140 levels brighter than the canvas
    let mut image = RgbImage::from_pixel(60, 60, Rgb([40, 40, 40]));
    for x in 0..60 {
        image.put_pixel(x, 30, Rgb([180, 180, 180]));
    }

    let gray = image::imageops::grayscale(&image);
    let edges = edge_map(&gray);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
    assert!(edge_pixels > 0);

    let profile = extract_profile(&image);
    assert!(profile.values()[30] > 0.0);
    assert!(profile.values()[29] > 0.0);
}

#[test]
fn test_extraction_is_deterministic() {
    let image = zigzag_chart(150, 120);
    let first = extract_profile(&image);
    let second = extract_profile(&image);

    assert_eq!(first, second);
    assert_eq!(detect_extrema(first.values()), detect_extrema(second.values()));
}

#[test]
fn test_png_and_jpeg_decode() {
    let image = zigzag_chart(64, 48);

    for format in [ImageFormat::Png, ImageFormat::Jpeg] {
        let bytes = encode(&image, format);
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));

        let features = analyze_bytes(&bytes).unwrap();
        assert_eq!(features.size.height, 48);
        assert_eq!(features.profile.len(), 48);
    }
}

#[test]
fn test_png_round_trip_preserves_profile() {
    let image = zigzag_chart(80, 60);
    let bytes = encode(&image, ImageFormat::Png);

    let from_bytes = analyze_bytes(&bytes).unwrap();
    assert_eq!(from_bytes.profile, extract_profile(&image));
}

#[test]
fn test_unreadable_bytes_rejected() {
    assert!(matches!(analyze_bytes(b"GIF89a nope"), Err(ChartError::Decode(_))));
    assert!(matches!(analyze_bytes(&[]), Err(ChartError::Empty)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn profile_is_non_negative_and_sized(width in 1u32..48, height in 1u32..160, seed in any::<u64>()) {
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
        let mut state = seed;
        for y in 0..height {
            for x in 0..width {
                // xorshift noise
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                if state % 5 == 0 {
                    image.put_pixel(x, y, LINE);
                }
            }
        }

        let features = analyze_image(&image);
        prop_assert_eq!(features.profile.len(), height as usize);
        prop_assert!(features.profile.values().iter().all(|v| *v >= 0.0));

        let last = height as usize - 1;
        for &i in features.extrema.peaks.iter().chain(features.extrema.troughs.iter()) {
            prop_assert!(i >= 1 && i < last);
        }
    }
}
