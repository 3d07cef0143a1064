//! Edge-density profile extraction.
//!
//! A chart screenshot is reduced to one number per pixel row: how many
//! Canny edge pixels that row contains, smoothed with a short moving
//! average. Price action drawn across a row shows up as a bump.

use crate::types::Profile;
use image::{imageops, GrayImage, Luma, RgbImage};
use imageproc::filter::separable_filter_equal;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// Binomial approximation of a 5x5 Gaussian, applied separably.
pub const BLUR_KERNEL: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 50.0;
pub const CANNY_HIGH: f32 = 150.0;

/// Width of the moving average applied to the raw row sums.
pub const SMOOTHING_WINDOW: usize = 10;

/// Canny needs a full 3x3 neighbourhood; anything thinner has no edges.
const MIN_EDGE_DIMENSION: u32 = 3;

/// Compute the smoothed per-row edge density of an RGB chart.
///
/// The result always has exactly `image.height()` entries.
pub fn extract_profile(image: &RgbImage) -> Profile {
    let gray = imageops::grayscale(image);
    let edges = edge_map(&gray);
    let raw = row_sums(&edges);
    Profile::new(moving_average(&raw, SMOOTHING_WINDOW))
}

/// Blur once with [`BLUR_KERNEL`] then run Canny, returning a binary
/// (0 / 255) map of the same size.
///
/// `imageproc::edges::canny` applies its own Gaussian first, so the Canny
/// stages run here on the already blurred image instead.
pub fn edge_map(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width < MIN_EDGE_DIMENSION || height < MIN_EDGE_DIMENSION {
        return GrayImage::new(width, height);
    }

    let blurred = separable_filter_equal(gray, &BLUR_KERNEL);
    let thinned = non_maximum_suppression(&blurred);
    hysteresis(&thinned, width, height, CANNY_LOW, CANNY_HIGH)
}

/// Sobel gradient magnitude, kept only where it peaks along the gradient
/// direction. Border pixels are always zero. Row-major, `width * height`.
fn non_maximum_suppression(blurred: &GrayImage) -> Vec<f32> {
    let (width, height) = blurred.dimensions();
    let gx = horizontal_sobel(blurred);
    let gy = vertical_sobel(blurred);

    let w = width as usize;
    let magnitude: Vec<f32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(dx, dy)| {
            let (dx, dy) = (dx.0[0] as f32, dy.0[0] as f32);
            (dx * dx + dy * dy).sqrt()
        })
        .collect();

    let mut thinned = vec![0.0f32; magnitude.len()];
    for y in 1..height as usize - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let m = magnitude[idx];
            if m == 0.0 {
                continue;
            }

            let dx = gx.get_pixel(x as u32, y as u32).0[0] as f32;
            let dy = gy.get_pixel(x as u32, y as u32).0[0] as f32;
            let mut angle = dy.atan2(dx).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            // Image rows grow downwards, so a positive dy points down.
            let (a, b) = if !(22.5..157.5).contains(&angle) {
                (idx - 1, idx + 1)
            } else if angle < 67.5 {
                (idx - w - 1, idx + w + 1)
            } else if angle < 112.5 {
                (idx - w, idx + w)
            } else {
                (idx - w + 1, idx + w - 1)
            };

            if m >= magnitude[a] && m >= magnitude[b] {
                thinned[idx] = m;
            }
        }
    }
    thinned
}

/// Keep strong edges plus any weak edge 8-connected to one.
fn hysteresis(thinned: &[f32], width: u32, height: u32, low: f32, high: f32) -> GrayImage {
    let w = width as usize;
    let h = height as usize;
    let mut out = GrayImage::new(width, height);
    let mut stack = Vec::new();

    for (idx, &m) in thinned.iter().enumerate() {
        if m < high || out.get_pixel((idx % w) as u32, (idx / w) as u32).0[0] != 0 {
            continue;
        }

        out.put_pixel((idx % w) as u32, (idx / w) as u32, Luma([255]));
        stack.push(idx);
        while let Some(current) = stack.pop() {
            let (cx, cy) = (current % w, current / w);
            for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                    let next = ny * w + nx;
                    let pixel = out.get_pixel_mut(nx as u32, ny as u32);
                    if thinned[next] >= low && pixel.0[0] == 0 {
                        *pixel = Luma([255]);
                        stack.push(next);
                    }
                }
            }
        }
    }
    out
}

/// Sum each row of the edge map.
pub fn row_sums(edges: &GrayImage) -> Vec<f64> {
    let (width, height) = edges.dimensions();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| edges.get_pixel(x, y).0[0] as f64)
                .sum()
        })
        .collect()
}

/// Centered moving average with "same" output length.
///
/// For an even window the centre sits just right of the middle, so index
/// `i` averages `values[i - w/2 ..= i + w/2 - 1]`. Samples that fall off
/// either end are dropped but the divisor stays `window`, so boundary
/// rows are pulled towards zero.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.is_empty() {
        return values.to_vec();
    }

    let left = window / 2;
    let right = window - left - 1;

    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0.0);
    for value in values {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + value);
    }

    let n = values.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(left);
            let end = (i + right + 1).min(n);
            // Clamp away rounding residue so the profile stays non-negative.
            ((prefix[end] - prefix[start]) / window as f64).max(0.0)
        })
        .collect()
}
