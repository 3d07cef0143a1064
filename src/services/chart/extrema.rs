//! Swing high/low detection on an edge-density profile.

use crate::types::ExtremumSet;

/// Find strict single-sample local maxima and minima.
///
/// Row `i` is a peak when `p[i-1] < p[i] > p[i+1]` and a trough when
/// `p[i-1] > p[i] < p[i+1]`. Equal neighbours never qualify, so flat
/// runs and plateaus wider than one sample are not reported. The first
/// and last rows are never reported.
pub fn detect_extrema(profile: &[f64]) -> ExtremumSet {
    let mut extrema = ExtremumSet::default();

    for (offset, window) in profile.windows(3).enumerate() {
        let (prev, current, next) = (window[0], window[1], window[2]);
        let index = offset + 1;

        if prev < current && current > next {
            extrema.peaks.push(index);
        } else if prev > current && current < next {
            extrema.troughs.push(index);
        }
    }

    extrema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_peak() {
        let extrema = detect_extrema(&[0.0, 2.0, 1.0]);
        assert_eq!(extrema.peaks, vec![1]);
        assert!(extrema.troughs.is_empty());
    }

    #[test]
    fn test_single_trough() {
        let extrema = detect_extrema(&[3.0, 1.0, 2.0]);
        assert!(extrema.peaks.is_empty());
        assert_eq!(extrema.troughs, vec![1]);
    }

    #[test]
    fn test_zigzag() {
        let extrema = detect_extrema(&[0.0, 5.0, 1.0, 4.0, 2.0, 6.0, 0.0]);
        assert_eq!(extrema.peaks, vec![1, 3, 5]);
        assert_eq!(extrema.troughs, vec![2, 4]);
    }

    #[test]
    fn test_plateau_is_ignored() {
        let extrema = detect_extrema(&[0.0, 3.0, 3.0, 0.0]);
        assert!(extrema.is_empty());
    }

    #[test]
    fn test_short_profiles() {
        assert!(detect_extrema(&[]).is_empty());
        assert!(detect_extrema(&[1.0]).is_empty());
        assert!(detect_extrema(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_boundaries_excluded() {
        // Row 0 is the global max and row 4 the global min, neither reported.
        let extrema = detect_extrema(&[9.0, 1.0, 5.0, 2.0, 0.0]);
        assert_eq!(extrema.peaks, vec![2]);
        assert_eq!(extrema.troughs, vec![1]);
    }
}
