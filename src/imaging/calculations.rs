//! Pure canvas geometry for the composition strategies.
//!
//! All functions here are pure and testable without any I/O or pixels.

use super::backend::Dimensions;

/// Canvas for stacked layers: the largest width by the largest height.
///
/// Returns a 0×0 canvas for no layers.
pub fn overlap_canvas(layers: &[Dimensions]) -> Dimensions {
    Dimensions {
        width: layers.iter().map(|d| d.width).max().unwrap_or(0),
        height: layers.iter().map(|d| d.height).max().unwrap_or(0),
    }
}

/// Canvas and placement for tiles laid out left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalLayout {
    pub canvas: Dimensions,
    /// X offset of each tile, in input order.
    pub offsets: Vec<u32>,
}

/// Lay tiles out left to right: widths add up, height is the tallest tile.
///
/// Returns `None` if the combined width does not fit in `u32`.
///
/// # Examples
/// ```
/// # use traitmint::imaging::{Dimensions, horizontal_layout};
/// let layout = horizontal_layout(&[
///     Dimensions { width: 100, height: 100 },
///     Dimensions { width: 80, height: 120 },
/// ])
/// .unwrap();
/// assert_eq!(layout.canvas, Dimensions { width: 180, height: 120 });
/// assert_eq!(layout.offsets, vec![0, 100]);
/// ```
pub fn horizontal_layout(tiles: &[Dimensions]) -> Option<HorizontalLayout> {
    let mut offsets = Vec::with_capacity(tiles.len());
    let mut x: u32 = 0;
    for tile in tiles {
        offsets.push(x);
        x = x.checked_add(tile.width)?;
    }
    Some(HorizontalLayout {
        canvas: Dimensions {
            width: x,
            height: tiles.iter().map(|d| d.height).max().unwrap_or(0),
        },
        offsets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn overlap_takes_max_of_each_axis() {
        assert_eq!(
            overlap_canvas(&[dims(100, 100), dims(80, 120)]),
            dims(100, 120)
        );
    }

    #[test]
    fn overlap_single_layer() {
        assert_eq!(overlap_canvas(&[dims(7, 3)]), dims(7, 3));
    }

    #[test]
    fn overlap_no_layers() {
        assert_eq!(overlap_canvas(&[]), dims(0, 0));
    }

    #[test]
    fn horizontal_sums_widths() {
        let layout = horizontal_layout(&[dims(100, 100), dims(80, 120)]).unwrap();
        assert_eq!(layout.canvas, dims(180, 120));
        assert_eq!(layout.offsets, vec![0, 100]);
    }

    #[test]
    fn horizontal_offsets_accumulate() {
        let layout = horizontal_layout(&[dims(10, 5), dims(20, 5), dims(30, 9)]).unwrap();
        assert_eq!(layout.offsets, vec![0, 10, 30]);
        assert_eq!(layout.canvas, dims(60, 9));
    }

    #[test]
    fn horizontal_width_overflow() {
        assert_eq!(horizontal_layout(&[dims(u32::MAX, 1), dims(1, 1)]), None);
    }
}
