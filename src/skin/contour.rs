use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

/// `mask` inside a one-pixel background frame. The border follower never
/// starts on the outermost row or column, so regions touching the image edge
/// are only found once they have background around them.
fn with_background_frame(mask: &GrayImage) -> GrayImage {
    let (w, h) = mask.dimensions();
    GrayImage::from_fn(w + 2, h + 2, |x, y| {
        if (1..=w).contains(&x) && (1..=h).contains(&y) {
            *mask.get_pixel(x - 1, y - 1)
        } else {
            Luma([0])
        }
    })
}

/// Outermost borders of the set regions in `mask`, in the order the border
/// follower discovers them (raster order of each border's first pixel).
/// Hole borders and anything nested inside a hole are skipped. Points are in
/// `mask` coordinates, including for regions that touch the image edge.
pub fn external_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(&with_background_frame(mask))
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|mut c| {
            for p in &mut c.points {
                *p = Point::new(p.x - 1, p.y - 1);
            }
            c
        })
        .collect()
}

/// Area enclosed by a closed polygon (shoelace formula). Degenerate contours
/// (a single pixel or a one-pixel-wide line) enclose zero area.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    (twice as f64 / 2.0).abs()
}

/// Index and area of the contour enclosing the most area.
///
/// Equal areas resolve to the earliest contour in `contours`, so the result
/// is deterministic for a given mask.
pub fn largest_by_area(contours: &[Contour<i32>]) -> Option<(usize, f64)> {
    contours
        .iter()
        .enumerate()
        .map(|(i, c)| (i, contour_area(&c.points)))
        .fold(None, |best, (i, area)| match best {
            Some((_, best_area)) if area <= best_area => best,
            _ => Some((i, area)),
        })
}
