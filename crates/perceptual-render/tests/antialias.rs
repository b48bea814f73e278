//! Boundary detection and edge resampling.

use perceptual_core::{Image, PixelFormat, Point, Rgba8};
use perceptual_render::{RenderContext, do_antialias, find_boundary};

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

fn premultiplied(width: u32, height: u32, color: Rgba8) -> Image {
    Image::filled(width, height, PixelFormat::Argb32Premultiplied, color)
}

#[test]
fn uniform_images_have_no_boundary() {
    assert!(find_boundary(&premultiplied(6, 4, RED)).is_empty());
    assert!(find_boundary(&premultiplied(6, 4, Rgba8::TRANSPARENT)).is_empty());
    assert!(find_boundary(&premultiplied(0, 0, RED)).is_empty());
}

#[test]
fn single_hole_yields_its_neighborhood() {
    let mut image = premultiplied(5, 5, RED);
    image.set_pixel(2, 2, Rgba8::TRANSPARENT).unwrap();
    let mut boundary = find_boundary(&image);
    assert_eq!(boundary.len(), 9);
    boundary.sort_by_key(|p| (p.y, p.x));
    let expected: Vec<Point> = (1..=3)
        .flat_map(|y| (1..=3).map(move |x| Point::new(x, y)))
        .collect();
    assert_eq!(boundary, expected);
}

#[test]
fn hole_in_corner_ignores_outside_neighbors() {
    let mut image = premultiplied(3, 3, RED);
    image.set_pixel(0, 0, Rgba8::TRANSPARENT).unwrap();
    let boundary = find_boundary(&image);
    assert_eq!(boundary.len(), 4);
    assert!(boundary.iter().all(|p| p.x <= 1 && p.y <= 1));
}

#[test]
fn semi_transparent_pixels_are_not_holes() {
    let mut image = premultiplied(3, 3, RED);
    image.set_pixel(1, 1, Rgba8::new(1, 0, 0, 1)).unwrap();
    assert!(find_boundary(&image).is_empty());
}

#[test]
fn other_formats_are_skipped() {
    let mut image = Image::filled(3, 3, PixelFormat::Argb32, RED);
    image.set_pixel(1, 1, Rgba8::TRANSPARENT).unwrap();
    assert!(find_boundary(&image).is_empty());

    let before = image.clone();
    let ctx = RenderContext::new(2).unwrap();
    do_antialias(&ctx, &mut image, &[Point::new(1, 1)], |_, _| RED);
    assert_eq!(image, before);
}

#[test]
fn vertical_edge_gets_coverage_alpha() {
    // Left two columns drawn, edge at x = 1.75 in pixel coordinates
    let mut image = premultiplied(4, 3, Rgba8::TRANSPARENT);
    for y in 0..3 {
        for x in 0..2 {
            image.set_pixel(x, y, RED).unwrap();
        }
    }
    let color_at = |x: f64, _: f64| if x < 1.75 { RED } else { Rgba8::TRANSPARENT };
    let boundary = find_boundary(&image);
    assert!(boundary.iter().all(|p| p.x == 1 || p.x == 2));

    let ctx = RenderContext::new(2).unwrap();
    do_antialias(&ctx, &mut image, &boundary, color_at);
    for y in 0..3 {
        assert_eq!(image.pixel(0, y), Some(RED));
        // Fully inside the drawn area
        assert_eq!(image.pixel(1, y), Some(RED));
        // 4 of 16 sample columns drawn: alpha round(64 / 256 * 255)
        assert_eq!(image.pixel(2, y), Some(Rgba8::new(64, 0, 0, 64)));
        assert_eq!(image.pixel(3, y), Some(Rgba8::TRANSPARENT));
    }
}

#[test]
fn points_without_drawn_samples_stay_unchanged() {
    let mut image = premultiplied(2, 1, RED);
    image.set_pixel(1, 0, Rgba8::TRANSPARENT).unwrap();
    let before = image.clone();
    let ctx = RenderContext::new(1).unwrap();
    do_antialias(&ctx, &mut image, &find_boundary(&before), |_, _| Rgba8::TRANSPARENT);
    assert_eq!(image, before);
}
