//! `ICON` and `ICN#` resources: 32x32 bitmaps stored as 32 rows of 4 bytes
use crate::macgfx::canvas::{BitMap, Canvas};
use crate::macgfx::rect::Rect;

pub const ICON_SIZE: u32 = 32;
const ICON_ROW_BYTES: usize = 4;
/// One 32x32 1-bit plane
pub const ICON_PLANE_BYTES: usize = ICON_ROW_BYTES * ICON_SIZE as usize;

/// Decodes an `ICON`; missing bytes read as background
pub fn decode_icon(data: &[u8]) -> Canvas {
    let plane = &data[..data.len().min(ICON_PLANE_BYTES)];
    let bounds = Rect::new(0, 0, ICON_SIZE as i16, ICON_SIZE as i16);
    let bitmap = BitMap{
        row_bytes: ICON_ROW_BYTES,
        bounds,
        rows: plane.chunks(ICON_ROW_BYTES).map(|row| row.to_vec()).collect(),
    };
    let mut canvas = Canvas::new(ICON_SIZE, ICON_SIZE);
    canvas.blit(&bitmap, &bounds, &bounds, bounds.top_left());
    canvas
}

/// Decodes the icon plane of an `ICN#`, ignoring the mask plane that follows it
pub fn decode_masked_icon(data: &[u8]) -> Canvas {
    decode_icon(&data[..data.len().min(ICON_PLANE_BYTES)])
}
