//! Version 1 picture interpreter
//!
//! A picture is a 16-bit size, the frame rectangle and a stream of opcodes.
//! Bitmaps and lines are rendered onto a canvas covering the frame; every
//! other known opcode is stepped over.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::macgfx::canvas::{BitMap, Canvas};
use crate::macgfx::opcode::{self, LineKind, Op, Shape};
use crate::macgfx::rect::{Point, Rect};
use crate::macres::packbits;

/// Application header in front of PICT files on disk
pub const PICT_FILE_HEADER_SIZE: usize = 512;
const PICTURE_HEADER_SIZE: usize = 10;
/// Rows narrower than this are stored unpacked even by packBitsRect
const MIN_PACKED_ROW_BYTES: usize = 8;
/// Largest frame area rendered, 4096x4096
const MAX_FRAME_PIXELS: u64 = 1 << 24;
/// From this width on, packed row lengths are 16 bits instead of 8
const WIDE_ROW_BYTES: usize = 250;

struct OpReader<'a> {
    rdr: Cursor<&'a [u8]>,
}

impl<'a> OpReader<'a> {
    fn new(data: &'a [u8], offset: usize) -> Self {
        let mut rdr = Cursor::new(data);
        rdr.set_position(offset as u64);
        Self{ rdr }
    }

    fn offset(&self) -> usize {
        self.rdr.position() as usize
    }

    fn at_end(&self) -> bool {
        self.offset() >= self.rdr.get_ref().len()
    }

    fn u8(&mut self) -> Result<u8> {
        let offset = self.offset();
        self.rdr.read_u8().map_err(|_| Error::TruncatedPicture{ offset })
    }

    fn i8(&mut self) -> Result<i8> {
        let offset = self.offset();
        self.rdr.read_i8().map_err(|_| Error::TruncatedPicture{ offset })
    }

    fn u16(&mut self) -> Result<u16> {
        let offset = self.offset();
        self.rdr.read_u16::<BigEndian>().map_err(|_| Error::TruncatedPicture{ offset })
    }

    fn i16(&mut self) -> Result<i16> {
        let offset = self.offset();
        self.rdr.read_i16::<BigEndian>().map_err(|_| Error::TruncatedPicture{ offset })
    }

    fn point(&mut self) -> Result<Point> {
        let v = self.i16()?;
        let h = self.i16()?;
        Ok(Point{ v, h })
    }

    fn rect(&mut self) -> Result<Rect> {
        let top = self.i16()?;
        let left = self.i16()?;
        let bottom = self.i16()?;
        let right = self.i16()?;
        Ok(Rect{ top, left, bottom, right })
    }

    fn skip(&mut self, n: usize) {
        self.rdr.set_position(self.rdr.position() + n as u64);
    }

    /// Up to `n` bytes at the cursor (fewer near the end); the cursor moves by `n` regardless
    fn take(&mut self, n: usize) -> &'a [u8] {
        let data: &'a [u8] = *self.rdr.get_ref();
        let start = self.offset().min(data.len());
        let end = self.offset().saturating_add(n).min(data.len());
        self.skip(n);
        &data[start..end]
    }
}

struct Interpreter<'a> {
    rdr: OpReader<'a>,
    frame: Rect,
    canvas: Canvas,
    pen: Point,
    last_rect: Option<Rect>,
    last_poly_size: Option<u16>,
    last_rgn_size: Option<u16>,
}

impl<'a> Interpreter<'a> {
    fn run(mut self) -> Result<Canvas> {
        while !self.rdr.at_end() {
            let offset = self.rdr.offset();
            let opcode = self.rdr.u8()?;
            let op = opcode::lookup(opcode);
            log::trace!("{:5}: 0x{:02x} {:?}", offset, opcode, op);
            match op {
                Op::EndOfPicture => { break; },
                Op::Skip(n) => { self.rdr.skip(n); },
                Op::Sized{ lead, inclusive } => { self.skip_sized(lead, inclusive)?; },
                Op::Text{ lead } => {
                    self.rdr.skip(lead);
                    let length = self.rdr.u8()?;
                    self.rdr.skip(length as usize);
                },
                Op::Shape{ shape, same, .. } => { self.shape(shape, same)?; },
                Op::Bits{ packed } => { self.bits(packed)?; },
                Op::Line(kind) => { self.line(kind)?; },
                Op::Unsupported => {
                    log::warn!("unsupported opcode 0x{:02x} at offset {}, giving up", opcode, offset);
                    return Err(Error::UnsupportedOpcode{ opcode, offset });
                }
            }
        }
        Ok(self.canvas)
    }

    fn skip_sized(&mut self, lead: usize, inclusive: bool) -> Result<u16> {
        self.rdr.skip(lead);
        let size = self.rdr.u16()?;
        let remaining = if inclusive { (size as usize).saturating_sub(2) } else { size as usize };
        self.rdr.skip(remaining);
        Ok(size)
    }

    fn shape(&mut self, shape: Shape, same: bool) -> Result<()> {
        match (shape, same) {
            (Shape::Rect | Shape::RRect | Shape::Oval, false) => {
                self.last_rect = Some(self.rdr.rect()?);
            },
            (Shape::Arc, false) => {
                self.last_rect = Some(self.rdr.rect()?);
                self.rdr.skip(4); // start angle, arc angle
            },
            (Shape::Arc, true) => {
                self.rdr.skip(4);
            },
            (Shape::Poly, false) => {
                self.last_poly_size = Some(self.skip_sized(0, true)?);
            },
            (Shape::Rgn, false) => {
                self.last_rgn_size = Some(self.skip_sized(0, true)?);
            },
            (Shape::Poly, true) => {
                log::trace!("reusing polygon of size {:?}", self.last_poly_size);
            },
            (Shape::Rgn, true) => {
                log::trace!("reusing region of size {:?}", self.last_rgn_size);
            },
            (_, true) => {
                log::trace!("reusing rect {:?}", self.last_rect);
            },
        }
        Ok(())
    }

    fn line(&mut self, kind: LineKind) -> Result<()> {
        let (from, to) = match kind {
            LineKind::Line => {
                let from = self.rdr.point()?;
                (from, self.rdr.point()?)
            },
            LineKind::LineFrom => {
                (self.pen, self.rdr.point()?)
            },
            LineKind::ShortLine => {
                let from = self.rdr.point()?;
                let dh = self.rdr.i8()?;
                let dv = self.rdr.i8()?;
                (from, from.offset(dh, dv))
            },
            LineKind::ShortLineFrom => {
                let dh = self.rdr.i8()?;
                let dv = self.rdr.i8()?;
                (self.pen, self.pen.offset(dh, dv))
            },
        };
        let left = self.frame.left as i32;
        let top = self.frame.top as i32;
        self.canvas.draw_line(from.h as i32 - left, from.v as i32 - top, to.h as i32 - left, to.v as i32 - top);
        self.pen = to;
        Ok(())
    }

    fn bits(&mut self, packed: bool) -> Result<()> {
        let row_bytes = self.rdr.u16()? as usize;
        let bounds = self.rdr.rect()?;
        let src_rect = self.rdr.rect()?;
        let dst_rect = self.rdr.rect()?;
        let _mode = self.rdr.u16()?;

        let height = bounds.height().max(0) as usize;
        let mut rows = Vec::new();
        for _ in 0..height {
            if self.rdr.at_end() {
                break;
            }
            let row = if packed && row_bytes >= MIN_PACKED_ROW_BYTES {
                let count = if row_bytes >= WIDE_ROW_BYTES {
                    self.rdr.u16()? as usize
                } else {
                    self.rdr.u8()? as usize
                };
                // the declared count, not what the decoder used, decides where the next row starts
                let (row, _) = packbits::unpack_row(self.rdr.take(count), 0, row_bytes);
                row
            } else {
                self.rdr.take(row_bytes).to_vec()
            };
            rows.push(row);
        }
        let short_rows = height - rows.iter().filter(|row| row.len() >= row_bytes).count();
        if short_rows > 0 {
            log::debug!("bitmap at offset {}: {} of {} rows short, padded", self.rdr.offset(), short_rows, height);
        }

        let bitmap = BitMap{ row_bytes, bounds, rows };
        self.canvas.blit(&bitmap, &src_rect, &dst_rect, self.frame.top_left());
        Ok(())
    }
}

/// Renders a picture resource
///
/// Returns `Ok(None)` when the frame has no area.
pub fn decode_picture(data: &[u8]) -> Result<Option<Canvas>> {
    let mut rdr = OpReader::new(data, 0);
    let _pic_size = rdr.u16()?;
    let frame = rdr.rect()?;
    if frame.is_empty() {
        log::debug!("picture frame {:?} is empty", frame);
        return Ok(None);
    }

    let width = frame.width() as u32;
    let height = frame.height() as u32;
    if width as u64 * height as u64 > MAX_FRAME_PIXELS {
        return Err(Error::FrameTooLarge{ width, height });
    }
    let canvas = Canvas::new(width, height);
    let interp = Interpreter{
        rdr: OpReader::new(data, PICTURE_HEADER_SIZE),
        frame,
        canvas,
        pen: Point::default(),
        last_rect: None,
        last_poly_size: None,
        last_rgn_size: None,
    };
    interp.run().map(Some)
}

/// Renders a PICT file, which carries a 512-byte header in front of the picture
pub fn decode_pict_file(data: &[u8]) -> Result<Option<Canvas>> {
    if data.len() < PICT_FILE_HEADER_SIZE + PICTURE_HEADER_SIZE {
        return Err(Error::TruncatedPicture{ offset: data.len() });
    }
    decode_picture(&data[PICT_FILE_HEADER_SIZE..])
}
