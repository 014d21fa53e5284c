//! Connected component label maps

use crate::error::{Error, Result};

/// Per-pixel component labels
///
/// `0` is background; every positive value names one connected component.
/// Maps produced by the labeler use exactly the labels `1..=count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
}

impl LabelMap {
    /// Create an all-background label map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major label buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `labels.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, labels: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if labels.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: labels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the label at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.labels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Row-major label buffer
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Largest label present (0 for an all-background map)
    pub fn max_label(&self) -> u32 {
        self.labels.iter().copied().max().unwrap_or(0)
    }

    /// Check whether the positive labels are exactly `1..=max_label`.
    pub fn is_dense(&self) -> bool {
        let max = self.max_label() as usize;
        let mut seen = vec![false; max + 1];
        for &label in &self.labels {
            seen[label as usize] = true;
        }
        seen.iter().skip(1).all(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_max() {
        let map = LabelMap::from_vec(3, 1, vec![0, 2, 1]).unwrap();
        assert_eq!(map.get(1, 0), Some(2));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.max_label(), 2);
        assert!(map.is_dense());
    }

    #[test]
    fn test_not_dense() {
        let map = LabelMap::from_vec(3, 1, vec![0, 3, 1]).unwrap();
        assert!(!map.is_dense());
        assert!(LabelMap::new(2, 2).is_dense());
        assert_eq!(LabelMap::new(2, 2).max_label(), 0);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(LabelMap::from_vec(2, 2, vec![0; 3]).is_err());
    }
}
