use serde::{Deserialize, Serialize};

/// Per-row edge density of a chart image, after smoothing.
///
/// One value per image row, so `len()` always equals the source height.
/// Values are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Vec<f64>);

impl Profile {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// True when every row carries zero edge density.
    pub fn is_flat_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

/// Strict local extrema of a profile, as row indices.
///
/// Both lists are strictly increasing, disjoint, and never contain the
/// first or last row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremumSet {
    /// Local maxima (swing highs).
    pub peaks: Vec<usize>,
    /// Local minima (swing lows).
    pub troughs: Vec<usize>,
}

impl ExtremumSet {
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.troughs.is_empty()
    }

    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    pub fn trough_count(&self) -> usize {
        self.troughs.len()
    }
}

/// Pixel dimensions of a decoded chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_len_and_values() {
        let profile = Profile::new(vec![0.0, 1.5, 3.0]);
        assert_eq!(profile.len(), 3);
        assert!(!profile.is_empty());
        assert_eq!(profile.values(), &[0.0, 1.5, 3.0]);
        assert!(!profile.is_flat_zero());
    }

    #[test]
    fn test_profile_serializes_as_array() {
        let profile = Profile::new(vec![1.0, 2.0]);
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, "[1.0,2.0]");
    }

    #[test]
    fn test_extremum_set_counts() {
        let set = ExtremumSet {
            peaks: vec![2, 8],
            troughs: vec![5],
        };
        assert_eq!(set.peak_count(), 2);
        assert_eq!(set.trough_count(), 1);
        assert!(!set.is_empty());
        assert!(ExtremumSet::default().is_empty());
    }
}
