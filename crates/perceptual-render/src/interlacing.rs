//! Adam7-like progressive refinement passes.
//!
//! A render starts with large blocks on a sparse grid and alternately
//! interleaves new rows and new columns until every pixel is painted
//! individually. With 7 passes this is the classic Adam7 layout.

use perceptual_math::is_odd;

/// State of one interlacing pass.
///
/// For every row anchor `line_offset + k * line_frequency` and every column
/// anchor `column_offset + k * column_frequency`, the caller paints a block
/// of `rectangle_width x rectangle_height` pixels, clipped at the image
/// edge.
///
/// # Example
///
/// ```rust
/// use perceptual_render::InterlacingPass;
///
/// let mut pass = InterlacingPass::make::<3>();
/// assert_eq!((pass.rectangle_width, pass.rectangle_height), (2, 2));
/// pass.switch_to_next_pass();
/// assert_eq!((pass.rectangle_width, pass.rectangle_height), (1, 2));
/// assert_eq!(pass.column_offset, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterlacingPass {
    /// Passes left, including this one. The last pass has countdown 1.
    pub countdown: u32,
    /// Block width.
    pub rectangle_width: u32,
    /// Block height.
    pub rectangle_height: u32,
    /// Distance between column anchors.
    pub column_frequency: u32,
    /// First column anchor.
    pub column_offset: u32,
    /// Distance between row anchors.
    pub line_frequency: u32,
    /// First row anchor.
    pub line_offset: u32,
}

impl InterlacingPass {
    /// Creates the first pass of a sequence of `pass_count` passes.
    ///
    /// Even counts are rounded up to the next odd number; counts below 1
    /// become 1.
    pub fn new(pass_count: i32) -> Self {
        let count: u32 = if pass_count < 1 {
            1
        } else if is_odd(pass_count) {
            pass_count.unsigned_abs()
        } else {
            pass_count.unsigned_abs() + 1
        };
        let base = base_size(count);
        Self {
            countdown: count,
            rectangle_width: base,
            rectangle_height: base,
            column_frequency: base,
            column_offset: 0,
            line_frequency: base,
            line_offset: 0,
        }
    }

    /// Creates the first pass of `N` passes, checked at compile time.
    pub fn make<const N: i32>() -> Self {
        const { assert!(N >= 1 && N % 2 == 1, "pass count must be positive and odd") };
        Self::new(N)
    }

    /// Advances to the next pass. Does nothing on the last pass.
    ///
    /// After an odd countdown new rows are interleaved between the rows
    /// painted so far; after an even countdown new columns are.
    pub fn switch_to_next_pass(&mut self) {
        if self.countdown <= 1 {
            return;
        }
        self.countdown -= 1;
        let base = base_size(self.countdown);
        if is_odd(self.countdown) {
            self.rectangle_width = base;
            self.rectangle_height = base;
            self.column_frequency = base;
            self.column_offset = 0;
            self.line_frequency = base.saturating_mul(2);
            self.line_offset = base;
        } else {
            let half = base / 2;
            self.rectangle_width = half;
            self.rectangle_height = base;
            self.column_frequency = base;
            self.column_offset = half;
            self.line_frequency = base;
            self.line_offset = 0;
        }
    }

    /// Returns `true` on the last pass.
    pub fn is_last(&self) -> bool {
        self.countdown <= 1
    }

    /// Row anchors of this pass for an image of `height` rows.
    pub fn row_anchors(&self, height: u32) -> impl Iterator<Item = u32> + use<> {
        (self.line_offset..height).step_by(self.line_frequency as usize)
    }

    /// Column anchors of this pass for an image of `width` columns.
    pub fn column_anchors(&self, width: u32) -> impl Iterator<Item = u32> + use<> {
        (self.column_offset..width).step_by(self.column_frequency as usize)
    }
}

/// `2^floor(countdown / 2)`, saturating at `2^31`.
fn base_size(countdown: u32) -> u32 {
    1u32.checked_shl(countdown / 2).unwrap_or(1 << 31)
}
