//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Only solid rectangles ("bricks") are needed here, so a SEL
//! is fully described by its size and its origin.

use crate::{MorphError, MorphResult};

/// Rectangular structuring element
///
/// The origin `(cx, cy)` is the cell of the rectangle that sits on the
/// pixel being computed. Placed at `(x, y)`, the element covers columns
/// `x - cx .. x - cx + width` and rows `y - cy .. y - cy + height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
}

impl Sel {
    /// Create a rectangular "brick" structuring element.
    ///
    /// The origin defaults to the geometric center, rounded toward the
    /// top-left corner for even sizes.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::DegenerateElement`] if either side is zero.
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::DegenerateElement { width, height });
        }
        Ok(Self {
            width,
            height,
            cx: (width - 1) / 2,
            cy: (height - 1) / 2,
        })
    }

    /// Create a square structuring element
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a brick with an explicit origin.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::DegenerateElement`] for a zero side and
    /// [`MorphError::InvalidParameters`] if the origin lies outside the brick.
    pub fn with_origin(width: u32, height: u32, cx: u32, cy: u32) -> MorphResult<Self> {
        let mut sel = Self::create_brick(width, height)?;
        sel.set_origin(cx, cy)?;
        Ok(sel)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Move the origin.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameters`] if `(cx, cy)` is outside the brick.
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidParameters(format!(
                "origin ({cx}, {cy}) outside {}x{} element",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Iterate over covered positions relative to the origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| (x - cx, y - cy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin() {
        let sel = Sel::create_brick(3, 5).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (1, 2));

        let sel = Sel::create_brick(2, 4).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (0, 1));

        let sel = Sel::create_square(1).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (0, 0));
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(
            Sel::create_brick(0, 3).unwrap_err(),
            MorphError::DegenerateElement {
                width: 0,
                height: 3
            }
        );
        assert!(Sel::create_square(0).is_err());
    }

    #[test]
    fn test_origin_bounds() {
        assert!(Sel::with_origin(3, 3, 2, 2).is_ok());
        assert!(matches!(
            Sel::with_origin(3, 3, 3, 0),
            Err(MorphError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_hit_offsets() {
        let sel = Sel::create_brick(2, 2).unwrap();
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
