//! Boundary detection and selective antialiasing.
//!
//! Gamut diagrams have a hard edge between displayable colors (opaque) and
//! the rest (transparent). Instead of supersampling the whole image, only
//! the pixels along that edge are resampled:
//!
//! 1. [`find_boundary`] collects every pixel on either side of the edge.
//! 2. [`do_antialias`] evaluates a color function on a 16x16 sub-grid of
//!    each such pixel and derives coverage alpha from it.

use crate::RenderContext;
use perceptual_core::{Image, PixelFormat, Point, Rgba8};
use tracing::debug;

/// Sub-samples per pixel side. 16 x 16 = 256 matches the 8-bit alpha range.
pub const ANTIALIAS_SIDE_LENGTH: usize = 16;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn has_expected_format(image: &Image) -> bool {
    if image.format() == PixelFormat::Argb32Premultiplied {
        return true;
    }
    debug!(format = ?image.format(), "skipping antialiasing: unsupported pixel format");
    false
}

/// Pixels adjacent to the edge between opaque and fully transparent areas.
///
/// For every non-transparent pixel with at least one fully transparent
/// neighbor (8-neighborhood, neighbors outside the image ignored), both
/// the pixel and those neighbors are returned. The list has no duplicates
/// and is ordered by first discovery in row-major order.
///
/// Returns an empty list for images in any format other than
/// [`PixelFormat::Argb32Premultiplied`].
///
/// # Example
///
/// ```rust
/// use perceptual_core::{Image, PixelFormat, Point, Rgba8};
/// use perceptual_render::find_boundary;
///
/// let mut image = Image::filled(3, 1, PixelFormat::Argb32Premultiplied, Rgba8::opaque(9, 9, 9));
/// image.set_pixel(2, 0, Rgba8::TRANSPARENT).unwrap();
/// assert_eq!(find_boundary(&image), vec![Point::new(2, 0), Point::new(1, 0)]);
/// ```
pub fn find_boundary(image: &Image) -> Vec<Point> {
    if !has_expected_format(image) {
        return Vec::new();
    }
    let width = image.width() as i32;
    let height = image.height() as i32;
    let mut seen = vec![false; image.pixels().len()];
    let mut coordinates = Vec::new();
    let mut push = |point: Point, coordinates: &mut Vec<Point>| {
        let index = point.y as usize * width as usize + point.x as usize;
        if !seen[index] {
            seen[index] = true;
            coordinates.push(point);
        }
    };

    for y in 0..height {
        for x in 0..width {
            let is_transparent = |p: Point| image.pixel_at(p).is_some_and(|c| c.is_transparent());
            if is_transparent(Point::new(x, y)) {
                continue;
            }
            let mut has_transparent_neighbor = false;
            for (dx, dy) in NEIGHBORS {
                let neighbor = Point::new(x + dx, y + dy);
                // pixel_at is None outside the image
                if is_transparent(neighbor) {
                    has_transparent_neighbor = true;
                    push(neighbor, &mut coordinates);
                }
            }
            if has_transparent_neighbor {
                push(Point::new(x, y), &mut coordinates);
            }
        }
    }
    coordinates
}

/// Resamples `points` of `image` with `color_at`.
///
/// `color_at(x, y)` takes continuous pixel coordinates where `(x, y)` is
/// the center of pixel `(x, y)`, and returns [`Rgba8::TRANSPARENT`] where
/// nothing is drawn. For each point, 16 x 16 sub-samples spread evenly over
/// the pixel's square are evaluated:
///
/// - alpha is the fraction of non-transparent sub-samples, scaled to 255
/// - color is the pixel's own color if it is not transparent, otherwise the
///   mean of the non-transparent sub-samples
///
/// The result is stored premultiplied. Points without any non-transparent
/// sub-sample are left unchanged. Sampling runs on the render pool and the
/// image is only written after all workers finished.
///
/// Does nothing for images in any format other than
/// [`PixelFormat::Argb32Premultiplied`].
pub fn do_antialias<F>(ctx: &RenderContext, image: &mut Image, points: &[Point], color_at: F)
where
    F: Fn(f64, f64) -> Rgba8 + Sync,
{
    if !has_expected_format(image) || points.is_empty() {
        return;
    }
    let source = &*image;
    let resampled = ctx.map_split(points, |point| {
        let own = source.pixel_at(*point)?;
        resample(own, *point, &color_at).map(|color| (*point, color))
    });
    for (point, color) in resampled.into_iter().flatten() {
        // Points come from this image, so they are in bounds
        let _ = image.set_pixel(point.x as u32, point.y as u32, color);
    }
}

fn resample<F>(own: Rgba8, point: Point, color_at: &F) -> Option<Rgba8>
where
    F: Fn(f64, f64) -> Rgba8,
{
    const TOTAL: usize = ANTIALIAS_SIDE_LENGTH * ANTIALIAS_SIDE_LENGTH;
    let step = 1.0 / ANTIALIAS_SIDE_LENGTH as f64;
    let x0 = point.x as f64 - 0.5 + step / 2.0;
    let y0 = point.y as f64 - 0.5 + step / 2.0;

    let mut count = 0usize;
    let mut sum = [0u32; 3];
    for i in 0..ANTIALIAS_SIDE_LENGTH {
        for j in 0..ANTIALIAS_SIDE_LENGTH {
            let sample = color_at(x0 + i as f64 * step, y0 + j as f64 * step);
            if !sample.is_transparent() {
                count += 1;
                sum[0] += sample.r as u32;
                sum[1] += sample.g as u32;
                sum[2] += sample.b as u32;
            }
        }
    }
    if count == 0 {
        return None;
    }

    let color = if own.is_transparent() {
        let mean = |total: u32| (total as f64 / count as f64).round() as u8;
        Rgba8::opaque(mean(sum[0]), mean(sum[1]), mean(sum[2]))
    } else {
        own.unpremultiplied()
    };
    let alpha = (count as f64 / TOTAL as f64 * 255.0).round() as u8;
    Some(color.with_alpha(alpha).premultiplied())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

    #[test]
    fn test_resample_half_covered_opaque_pixel() {
        // Left half of pixel 0 is drawn
        let color_at = |x: f64, _: f64| if x < 0.0 { RED } else { Rgba8::TRANSPARENT };
        let result = resample(RED, Point::new(0, 0), &color_at).unwrap();
        assert_eq!(result.a, 128);
        assert_eq!(result, Rgba8::new(128, 0, 0, 128));
    }

    #[test]
    fn test_resample_transparent_pixel_takes_mean() {
        let color_at = |_: f64, y: f64| {
            if y < 5.0 {
                Rgba8::opaque(100, 0, 0)
            } else {
                Rgba8::opaque(200, 50, 0)
            }
        };
        // Top half of pixel (0, 5) is in y < 5
        let result = resample(Rgba8::TRANSPARENT, Point::new(0, 5), &color_at).unwrap();
        assert_eq!(result.a, 255);
        assert_eq!(result, Rgba8::opaque(150, 25, 0));
    }

    #[test]
    fn test_resample_nothing_drawn() {
        let color_at = |_: f64, _: f64| Rgba8::TRANSPARENT;
        assert_eq!(resample(RED, Point::new(3, 3), &color_at), None);
    }
}
