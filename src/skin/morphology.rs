use image::{GrayImage, Luma};

use crate::skin::mask::FOREGROUND;

/// One row of a structuring element: the horizontal span
/// `[-half_width, half_width]` at vertical offset `dy` from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    dy: i32,
    half_width: i32,
}

/// A centred, row-symmetric structuring element stored as horizontal spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    size: u32,
    spans: Vec<Span>,
}

impl StructuringElement {
    /// Ellipse inscribed in a `size × size` square (`size` odd).
    ///
    /// Row `dy` spans `round(r * sqrt(1 - dy² / r²))` cells either side of the
    /// centre, which for `size = 7` gives widths 1, 5, 7, 7, 7, 5, 1.
    pub fn ellipse(size: u32) -> StructuringElement {
        let r = (size / 2) as i32;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };
        let spans = (-r..=r)
            .map(|dy| {
                let half_width = (r as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i32;
                Span { dy, half_width }
            })
            .collect();
        StructuringElement { size, spans }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the cell at offset (`dx`, `dy`) from the anchor is part of the element.
    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.spans.iter().any(|s| s.dy == dy && dx.abs() <= s.half_width)
    }
}

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

/// Per-row running count of set cells; entry `x` of a row holds the count
/// over columns `0..x`, so each row has `width + 1` entries.
fn row_prefix_counts(mask: &GrayImage) -> Vec<u32> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let mut prefix = vec![0u32; (w + 1) * h];
    for y in 0..h {
        let row = &mut prefix[y * (w + 1)..(y + 1) * (w + 1)];
        for x in 0..w {
            let set = (mask.get_pixel(x as u32, y as u32).0[0] != 0) as u32;
            row[x + 1] = row[x] + set;
        }
    }
    prefix
}

/// Cells of the element that fall outside the image are ignored, so the frame
/// edge neither grows nor erodes the mask.
fn apply(mask: &GrayImage, element: &StructuringElement, op: Op) -> GrayImage {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let stride = (w + 1) as usize;
    let prefix = row_prefix_counts(mask);

    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        let mut hit = false;
        let mut covered = true;

        for span in &element.spans {
            let yy = y + span.dy;
            if yy < 0 || yy >= h {
                continue;
            }
            let lo = (x - span.half_width).max(0);
            let hi = (x + span.half_width).min(w - 1);
            let row = yy as usize * stride;
            let set = prefix[row + hi as usize + 1] - prefix[row + lo as usize];
            let len = (hi - lo + 1) as u32;

            hit |= set > 0;
            covered &= set == len;
        }

        let on = match op {
            Op::Dilate => hit,
            Op::Erode  => covered,
        };
        Luma([if on { FOREGROUND } else { 0 }])
    })
}

pub fn dilate(mask: &GrayImage, element: &StructuringElement) -> GrayImage {
    apply(mask, element, Op::Dilate)
}

pub fn erode(mask: &GrayImage, element: &StructuringElement) -> GrayImage {
    apply(mask, element, Op::Erode)
}

/// `iterations` dilations followed by as many erosions; fills gaps narrower
/// than the element.
pub fn close(mask: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    out
}

/// `iterations` erosions followed by as many dilations; removes specks
/// smaller than the element.
pub fn open(mask: &GrayImage, element: &StructuringElement, iterations: u32) -> GrayImage {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    out
}
