use crate::error::{Error, Result};
use crate::macgfx::canvas::{Canvas, FOREGROUND};
use crate::macgfx::png;

pub const DEFAULT_SCALE: f64 = 1.5;
pub const BLACK: u8 = 0;
pub const WHITE: u8 = 255;

/// 8-bit grayscale raster, row-major
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct GrayImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GrayImage {
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        png::encode_raster(&self.pixels, self.width, self.height)
    }
}

fn shade(value: u8) -> u8 {
    if value == FOREGROUND { BLACK } else { WHITE }
}

impl Canvas {
    /// Grayscale copy without resampling: ink becomes black, paper white
    pub fn to_gray(&self) -> GrayImage {
        GrayImage{
            width: self.width(),
            height: self.height(),
            pixels: self.pixels().iter().map(|&v| shade(v)).collect(),
        }
    }
}

/// Scales `canvas` by `scale` with bilinear filtering
///
/// Output pixel `(ox, oy)` samples the source at `(ox / scale - 0.5, oy / scale - 0.5)`.
/// The integer sample position is clamped into the canvas before the
/// fractional weights are taken, so the top and left edges extrapolate and
/// the result is clamped to `0..=255`. Output dimensions are
/// `round(dim * scale)` (ties to even), but never less than one pixel.
pub fn resample(canvas: &Canvas, scale: f64) -> Result<GrayImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidScale(scale));
    }
    let src_w = canvas.width();
    let src_h = canvas.height();
    if src_w == 0 || src_h == 0 {
        return Ok(GrayImage{ width: 0, height: 0, pixels: Vec::new() });
    }
    let dst_w = ((src_w as f64 * scale).round_ties_even() as u32).max(1);
    let dst_h = ((src_h as f64 * scale).round_ties_even() as u32).max(1);

    let sample = |x: u32, y: u32| -> f64 {
        shade(canvas.get_pixel(x, y)) as f64
    };
    let neighbours = |s: f64, dim: u32| -> (u32, u32, f64) {
        let s0 = (s.floor().max(0.0) as u32).min(dim - 1);
        let s1 = (s0 + 1).min(dim - 1);
        (s0, s1, s - s0 as f64)
    };

    let mut pixels = Vec::with_capacity(dst_w as usize * dst_h as usize);
    for oy in 0..dst_h {
        let (y0, y1, fy) = neighbours(oy as f64 / scale - 0.5, src_h);
        for ox in 0..dst_w {
            let (x0, x1, fx) = neighbours(ox as f64 / scale - 0.5, src_w);
            let v = sample(x0, y0) * (1.0 - fx) * (1.0 - fy)
                + sample(x1, y0) * fx * (1.0 - fy)
                + sample(x0, y1) * (1.0 - fx) * fy
                + sample(x1, y1) * fx * fy;
            pixels.push(v.round_ties_even().clamp(0.0, 255.0) as u8);
        }
    }
    Ok(GrayImage{ width: dst_w, height: dst_h, pixels })
}
