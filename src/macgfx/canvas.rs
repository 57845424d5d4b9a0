use crate::macgfx::rect::{Point, Rect};

/// Ink; QuickDraw draws set bits in black
pub const FOREGROUND: u8 = 1;
/// Paper
pub const BACKGROUND: u8 = 0;

/// Packed 1-bit image, most significant bit leftmost
///
/// `rows` may hold fewer than `bounds.height()` rows, and rows may be shorter
/// than `row_bytes`; the missing bytes read as zero.
pub struct BitMap {
    pub row_bytes: usize,
    pub bounds: Rect,
    pub rows: Vec<Vec<u8>>,
}

impl BitMap {
    /// Bit at `(x, y)` in the bitmap's own coordinates; `None` outside `bounds` or past `row_bytes`
    pub fn bit(&self, x: i32, y: i32) -> Option<u8> {
        let row = y - self.bounds.top as i32;
        let col = x - self.bounds.left as i32;
        if row < 0 || col < 0 || row >= self.bounds.height() || col as usize / 8 >= self.row_bytes {
            return None;
        }
        let byte = self.rows.get(row as usize)
            .and_then(|r| r.get(col as usize / 8))
            .copied()
            .unwrap_or(0);
        Some((byte >> (7 - (col % 8))) & 1)
    }
}

/// Monochrome raster holding one 0/1 value per pixel
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = vec![ BACKGROUND; width as usize * height as usize ];
        Self{ width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Sets a pixel; coordinates outside the canvas are ignored
    pub fn put_pixel(&mut self, x: i32, y: i32, value: u8) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = value;
        }
    }

    /// Bresenham line in canvas coordinates, endpoints included
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        // Always walk from the lesser endpoint so both directions set the same pixels
        let ((mut x, mut y), (x_end, y_end)) = if (x1, y1) < (x0, y0) {
            ((x1, y1), (x0, y0))
        } else {
            ((x0, y0), (x1, y1))
        };
        let dx = (x_end - x).abs();
        let dy = (y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx - dy;
        loop {
            self.put_pixel(x, y, FOREGROUND);
            if x == x_end && y == y_end { break; }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Copies `src` out of `bitmap` to `dst`, both in picture coordinates
    ///
    /// `origin` is the picture frame's top-left corner. The copy is a
    /// translation only: when `dst` differs in size from `src`, the canvas
    /// clips rather than stretches.
    pub fn blit(&mut self, bitmap: &BitMap, src: &Rect, dst: &Rect, origin: Point) {
        let dx = dst.left as i64 - src.left as i64 - origin.h as i64;
        let dy = dst.top as i64 - src.top as i64 - origin.v as i64;
        // only visit source pixels that land on the canvas
        let ys = (src.top as i64).max(-dy)..(src.bottom as i64).min(self.height as i64 - dy);
        let xs = (src.left as i64).max(-dx)..(src.right as i64).min(self.width as i64 - dx);
        for src_y in ys {
            for src_x in xs.clone() {
                if let Some(bit) = bitmap.bit(src_x as i32, src_y as i32) {
                    self.put_pixel((src_x + dx) as i32, (src_y + dy) as i32, bit);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_pixels(canvas: &Canvas) -> Vec<(u32, u32)> {
        let mut result = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.get_pixel(x, y) == FOREGROUND {
                    result.push((x, y));
                }
            }
        }
        result
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_line(0, 0, 4, 0);
        assert_eq!(set_pixels(&canvas), vec![ (0, 0), (1, 0), (2, 0), (3, 0), (4, 0) ]);
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_line(0, 0, 0, 4);
        assert_eq!(set_pixels(&canvas), vec![ (0, 0), (0, 1), (0, 2), (0, 3), (0, 4) ]);
    }

    #[test]
    fn test_line_is_symmetric() {
        let endpoints = [ (0, 0, 5, 5), (6, 1, 1, 6), (0, 7, 7, 3), (2, 0, 5, 7), (7, 2, 0, 3) ];
        for &(x0, y0, x1, y1) in &endpoints {
            let mut forward = Canvas::new(8, 8);
            forward.draw_line(x0, y0, x1, y1);
            let mut backward = Canvas::new(8, 8);
            backward.draw_line(x1, y1, x0, y0);
            assert_eq!(forward, backward, "line ({},{})-({},{})", x0, y0, x1, y1);
            assert_eq!(forward.get_pixel(x0 as u32, y0 as u32), FOREGROUND);
            assert_eq!(forward.get_pixel(x1 as u32, y1 as u32), FOREGROUND);
        }
    }

    #[test]
    fn test_line_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_line(-3, 1, 10, 1);
        assert_eq!(set_pixels(&canvas), vec![ (0, 1), (1, 1), (2, 1), (3, 1) ]);
    }

    #[test]
    fn test_blit_identity() {
        let bounds = Rect::new(10, 20, 12, 36);
        let bitmap = BitMap{ row_bytes: 2, bounds, rows: vec![ vec![ 0x80, 0x01 ], vec![ 0x40, 0x00 ] ] };
        let mut canvas = Canvas::new(16, 2);
        canvas.blit(&bitmap, &bounds, &bounds, bounds.top_left());
        assert_eq!(set_pixels(&canvas), vec![ (0, 0), (15, 0), (1, 1) ]);
    }

    #[test]
    fn test_blit_translates_and_clips() {
        let bounds = Rect::new(0, 0, 1, 8);
        let bitmap = BitMap{ row_bytes: 1, bounds, rows: vec![ vec![ 0xff ] ] };
        let mut canvas = Canvas::new(4, 4);
        canvas.blit(&bitmap, &Rect::new(0, 2, 1, 5), &Rect::new(3, 2, 4, 5), Point::new(0, 0));
        assert_eq!(set_pixels(&canvas), vec![ (2, 3), (3, 3) ]);
    }

    #[test]
    fn test_bitmap_bit_outside_rows() {
        let bitmap = BitMap{ row_bytes: 1, bounds: Rect::new(0, 0, 1, 8), rows: vec![ vec![ 0x01 ] ] };
        assert_eq!(bitmap.bit(7, 0), Some(1));
        assert_eq!(bitmap.bit(8, 0), None);
        assert_eq!(bitmap.bit(-1, 0), None);
        assert_eq!(bitmap.bit(0, 1), None);
    }

    #[test]
    fn test_bitmap_missing_bytes_read_as_zero() {
        let bitmap = BitMap{ row_bytes: 2, bounds: Rect::new(0, 0, 3, 16), rows: vec![ vec![ 0xff ] ] };
        assert_eq!(bitmap.bit(7, 0), Some(1));
        assert_eq!(bitmap.bit(8, 0), Some(0));
        assert_eq!(bitmap.bit(0, 2), Some(0));
        assert_eq!(bitmap.bit(16, 0), None);
        assert_eq!(bitmap.bit(0, 3), None);
    }

    #[test]
    fn test_blit_huge_rects_only_touch_canvas() {
        let bounds = Rect::new(-32768, -32768, 32767, 32767);
        let bitmap = BitMap{ row_bytes: 0xffff, bounds, rows: vec![] };
        let mut canvas = Canvas::new(3, 3);
        canvas.put_pixel(1, 1, FOREGROUND);
        canvas.blit(&bitmap, &bounds, &bounds, Point::new(0, 0));
        assert!(set_pixels(&canvas).is_empty());
    }
}
