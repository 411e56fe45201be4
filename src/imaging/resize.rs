use image::{Rgb, RgbImage};

/// Interpolation weights are fixed point with this many fractional bits.
const WEIGHT_BITS: u32 = 11;
const WEIGHT_ONE: i32 = 1 << WEIGHT_BITS;

/// Source rows or columns feeding one destination coordinate, with their
/// fixed-point weights. `w0 + w1 == WEIGHT_ONE`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: u32,
    hi: u32,
    w0: i32,
    w1: i32,
}

fn weights(frac: f32) -> (i32, i32) {
    let scale = WEIGHT_ONE as f32;
    (round_half_even((1.0 - frac) * scale), round_half_even(frac * scale))
}

fn round_half_even(v: f32) -> i32 {
    let r = v.round();
    if (r - v).abs() == 0.5 && r % 2.0 != 0.0 { (r - v.signum()) as i32 } else { r as i32 }
}

/// Destination pixel `d` samples source coordinate `(d + 0.5) * src / dst - 0.5`.
/// Horizontally a coordinate outside the frame snaps to the edge pixel.
fn column_taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = 1.0 / (dst_len as f64 / src_len as f64);
    (0..dst_len)
        .map(|d| {
            let f = ((d as f64 + 0.5) * scale - 0.5) as f32;
            let lo = f.floor();
            let (lo, frac) = if lo < 0.0 {
                (0, 0.0)
            } else if lo as u32 >= src_len - 1 {
                (src_len - 1, 0.0)
            } else {
                (lo as u32, f - lo)
            };
            let (w0, w1) = weights(frac);
            Tap { lo, hi: (lo + 1).min(src_len - 1), w0, w1 }
        })
        .collect()
}

/// Vertically the weights are kept and the rows are clamped instead, which
/// only matters for rounding.
fn row_taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = 1.0 / (dst_len as f64 / src_len as f64);
    let last = src_len as i64 - 1;
    (0..dst_len)
        .map(|d| {
            let f = ((d as f64 + 0.5) * scale - 0.5) as f32;
            let lo = f.floor();
            let (w0, w1) = weights(f - lo);
            let lo = lo as i64;
            Tap { lo: lo.clamp(0, last) as u32, hi: (lo + 1).clamp(0, last) as u32, w0, w1 }
        })
        .collect()
}

/// Resizes with bilinear interpolation to exactly `width × height`.
///
/// No antialiasing prefilter is applied when shrinking, matching the plain
/// linear resize the classifier's training data went through. Arithmetic is
/// the 8-bit fixed-point scheme of that resize, so results agree to the bit.
/// Returns a copy when the size already matches.
pub fn resize_bilinear(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    if src.width() == 0 || src.height() == 0 {
        return RgbImage::new(width, height);
    }

    let xs = column_taps(src.width(), width);
    let ys = row_taps(src.height(), height);

    // Horizontal pass over one source row, scaled by WEIGHT_ONE.
    let horizontal = |row: u32, tx: Tap, c: usize| -> i32 {
        let a = i32::from(src.get_pixel(tx.lo, row).0[c]);
        let b = i32::from(src.get_pixel(tx.hi, row).0[c]);
        a * tx.w0 + b * tx.w1
    };

    RgbImage::from_fn(width, height, |x, y| {
        let tx = xs[x as usize];
        let ty = ys[y as usize];
        let mut out = [0u8; 3];
        for (c, v) in out.iter_mut().enumerate() {
            let top = horizontal(ty.lo, tx, c);
            let bottom = horizontal(ty.hi, tx, c);
            let sum = ((ty.w0 * (top >> 4)) >> 16) + ((ty.w1 * (bottom >> 4)) >> 16) + 2;
            *v = (sum >> 2).clamp(0, 255) as u8;
        }
        Rgb(out)
    })
}
