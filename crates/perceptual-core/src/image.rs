//! Raster image buffer.
//!
//! [`Image`] is a row-major buffer of [`Rgba8`] pixels together with its
//! [`PixelFormat`] and device pixel ratio. Diagram renderers write into it,
//! the boundary and antialiasing helpers post-process it, and callers copy
//! it out for display or export.
//!
//! # Usage
//!
//! ```rust
//! use perceptual_core::{Image, PixelFormat, Rgba8};
//!
//! let mut image = Image::new(4, 3, PixelFormat::Argb32Premultiplied);
//! image.set_pixel(1, 2, Rgba8::opaque(255, 0, 0)).unwrap();
//! assert_eq!(image.pixel(1, 2), Some(Rgba8::opaque(255, 0, 0)));
//! assert_eq!(image.pixel(4, 0), None);
//! ```

use crate::{Error, Point, Rect, Result, Rgba8};

/// Memory interpretation of the pixels in an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 8-bit RGBA with color channels premultiplied by alpha.
    ///
    /// The only format the boundary and antialiasing helpers operate on.
    #[default]
    Argb32Premultiplied,
    /// 8-bit RGBA with straight (unassociated) alpha.
    Argb32,
    /// 8-bit RGB; alpha is ignored and treated as opaque.
    Rgb32,
}

/// A row-major raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    device_pixel_ratio: f64,
    pixels: Vec<Rgba8>,
}

impl Image {
    /// Creates a fully transparent image.
    ///
    /// Zero width or height yields an empty (null) image.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self::filled(width, height, format, Rgba8::TRANSPARENT)
    }

    /// Creates an image filled with one color.
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: Rgba8) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        Self {
            width,
            height,
            format,
            device_pixel_ratio: 1.0,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<Rgba8>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            format,
            device_pixel_ratio: 1.0,
            pixels,
        })
    }

    /// Width in physical pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in physical pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Ratio of physical pixels to logical pixels.
    #[inline]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Sets the ratio of physical pixels to logical pixels.
    #[inline]
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Returns `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whole-image rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if `point` lies inside the image.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Returns the pixel at (x, y), or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Returns the pixel at a signed position, or `None` outside the image.
    #[inline]
    pub fn pixel_at(&self, point: Point) -> Option<Rgba8> {
        if !self.contains(point) {
            return None;
        }
        self.pixel(point.x as u32, point.y as u32)
    }

    /// Writes the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
        Ok(())
    }

    /// Fills the whole image.
    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Fills a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let Some(clipped) = rect.intersect(&self.rect()) else {
            return;
        };
        let width = self.width as usize;
        let x0 = clipped.x as usize;
        let x1 = x0 + clipped.width as usize;
        for y in clipped.y as usize..clipped.bottom() as usize {
            self.pixels[y * width + x0..y * width + x1].fill(color);
        }
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// All pixels, row-major, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Returns straight-alpha RGBA bytes, row-major.
    ///
    /// Premultiplied pixels are un-premultiplied; [`PixelFormat::Rgb32`]
    /// pixels are forced opaque.
    pub fn to_straight_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| {
                let straight = match self.format {
                    PixelFormat::Argb32Premultiplied => pixel.unpremultiplied(),
                    PixelFormat::Argb32 => *pixel,
                    PixelFormat::Rgb32 => pixel.with_alpha(255),
                };
                straight.to_array()
            })
            .collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let image = Image::new(3, 2, PixelFormat::Argb32Premultiplied);
        assert_eq!(image.pixels().len(), 6);
        assert!(image.pixels().iter().all(Rgba8::is_transparent));
        assert_eq!(image.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn test_zero_size_is_empty() {
        let image = Image::new(0, 10, PixelFormat::Argb32Premultiplied);
        assert!(image.is_empty());
        assert_eq!(image.width(), 0);
        assert_eq!(image.height(), 0);
    }

    #[test]
    fn test_from_pixels_validates_length() {
        let result = Image::from_pixels(2, 2, PixelFormat::Argb32, vec![Rgba8::TRANSPARENT; 3]);
        assert!(result.is_err());
        let ok = Image::from_pixels(2, 2, PixelFormat::Argb32, vec![Rgba8::TRANSPARENT; 4]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut image = Image::new(2, 2, PixelFormat::Argb32Premultiplied);
        let err = image.set_pixel(2, 0, Rgba8::opaque(1, 2, 3)).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_pixel_at_negative() {
        let image = Image::filled(2, 2, PixelFormat::Argb32Premultiplied, Rgba8::opaque(9, 9, 9));
        assert_eq!(image.pixel_at(Point::new(-1, 0)), None);
        assert_eq!(image.pixel_at(Point::new(1, 1)), Some(Rgba8::opaque(9, 9, 9)));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut image = Image::new(4, 4, PixelFormat::Argb32Premultiplied);
        let red = Rgba8::opaque(255, 0, 0);
        image.fill_rect(Rect::new(2, 2, 10, 10), red);
        assert_eq!(image.pixel(3, 3), Some(red));
        assert_eq!(image.pixel(2, 2), Some(red));
        assert_eq!(image.pixel(1, 2), Some(Rgba8::TRANSPARENT));
        let opaque = image.pixels().iter().filter(|p| p.is_opaque()).count();
        assert_eq!(opaque, 4);
    }

    #[test]
    fn test_straight_bytes() {
        let image = Image::filled(
            1,
            1,
            PixelFormat::Argb32Premultiplied,
            Rgba8::new(128, 0, 0, 128),
        );
        let bytes = image.to_straight_rgba_bytes();
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[3], 128);
        assert!(bytes[0] >= 254);
    }
}
