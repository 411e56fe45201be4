use std::f64::consts::PI;

use image::GrayImage;

/// Offset of one circular sample point from the centre pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SamplePoint {
    dr: f64,
    dc: f64,
}

/// `points` samples on a circle of `radius`, starting due right and turning
/// counter-clockwise (rows grow downwards). Offsets are rounded to five
/// decimals so axis-aligned samples land exactly on pixel centres.
fn circle(points: u32, radius: f64) -> Vec<SamplePoint> {
    let round5 = |v: f64| (v * 1e5).round() / 1e5;
    (0..points)
        .map(|p| {
            let angle = 2.0 * PI * p as f64 / points as f64;
            SamplePoint { dr: round5(-radius * angle.sin()), dc: round5(radius * angle.cos()) }
        })
        .collect()
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Pixel value, or 0 outside the frame.
#[inline]
fn pixel_or_zero(gray: &GrayImage, r: i64, c: i64) -> f64 {
    if r < 0 || c < 0 || r >= gray.height() as i64 || c >= gray.width() as i64 {
        0.0
    } else {
        f64::from(gray.get_pixel(c as u32, r as u32).0[0])
    }
}

/// Bilinear sample at fractional (`r`, `c`). Written as nested lerps so a
/// flat neighbourhood reproduces its value exactly.
fn sample(gray: &GrayImage, r: f64, c: f64) -> f64 {
    let (r0, c0) = (r.floor(), c.floor());
    let (r1, c1) = (r.ceil(), c.ceil());
    let (fr, fc) = (r - r0, c - c0);
    let (r0, r1, c0, c1) = (r0 as i64, r1 as i64, c0 as i64, c1 as i64);

    let top    = lerp(pixel_or_zero(gray, r0, c0), pixel_or_zero(gray, r0, c1), fc);
    let bottom = lerp(pixel_or_zero(gray, r1, c0), pixel_or_zero(gray, r1, c1), fc);
    lerp(top, bottom, fr)
}

/// Rotation-invariant uniform local binary pattern.
///
/// Each neighbour is 1 when its interpolated value is at least the centre's.
/// Patterns with at most two 0/1 changes along the sample sequence map to
/// their number of ones (`0..=points`); every other pattern maps to
/// `points + 1`. Changes are counted between consecutive samples only, not
/// across the wrap from the last sample back to the first.
///
/// Returns one code per pixel in row-major order. Flat neighbourhoods give
/// code `points` (all ones); isolated bright peaks give 0.
pub fn uniform_lbp(gray: &GrayImage, points: u32, radius: f64) -> Vec<u8> {
    let circle = circle(points, radius);
    let non_uniform = (points + 1) as u8;
    let mut bits = vec![false; circle.len()];
    let mut codes = Vec::with_capacity(gray.width() as usize * gray.height() as usize);

    for r in 0..gray.height() {
        for c in 0..gray.width() {
            let centre = f64::from(gray.get_pixel(c, r).0[0]);
            for (bit, s) in bits.iter_mut().zip(&circle) {
                *bit = sample(gray, r as f64 + s.dr, c as f64 + s.dc) - centre >= 0.0;
            }

            let changes = bits.windows(2).filter(|w| w[0] != w[1]).count();
            let code = if changes <= 2 {
                bits.iter().filter(|&&b| b).count() as u8
            } else {
                non_uniform
            };
            codes.push(code);
        }
    }
    codes
}
