//! Minimal PNG writer: 8-bit grayscale, unfiltered scanlines, one IDAT chunk
use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

use crate::error::{Error, Result};

pub const PNG_SIGNATURE: [u8; 8] = [ 0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a ];

const CHUNK_IHDR: [u8; 4] = *b"IHDR";
const CHUNK_IDAT: [u8; 4] = *b"IDAT";
const CHUNK_IEND: [u8; 4] = *b"IEND";

const BIT_DEPTH: u8 = 8;
const COLOR_GRAYSCALE: u8 = 0;
const COMPRESSION_DEFLATE: u8 = 0;
const FILTER_METHOD_ADAPTIVE: u8 = 0;
const INTERLACE_NONE: u8 = 0;
const FILTER_NONE: u8 = 0;

fn write_chunk(out: &mut Vec<u8>, ty: [u8; 4], data: &[u8]) -> Result<()> {
    out.write_u32::<BigEndian>(data.len() as u32)?;
    out.extend_from_slice(&ty);
    out.extend_from_slice(data);
    let mut crc = crc32fast::Hasher::new();
    crc.update(&ty);
    crc.update(data);
    out.write_u32::<BigEndian>(crc.finalize())?;
    Ok(())
}

/// Encodes `width * height` grayscale bytes as a PNG file
pub fn encode_raster(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyRaster{ width, height });
    }
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(Error::RasterSizeMismatch{ expected, actual: pixels.len() });
    }

    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.write_u32::<BigEndian>(width)?;
    ihdr.write_u32::<BigEndian>(height)?;
    ihdr.extend_from_slice(&[ BIT_DEPTH, COLOR_GRAYSCALE, COMPRESSION_DEFLATE, FILTER_METHOD_ADAPTIVE, INTERLACE_NONE ]);
    write_chunk(&mut out, CHUNK_IHDR, &ihdr)?;

    let mut scanlines = Vec::with_capacity(expected + height as usize);
    for row in pixels.chunks_exact(width as usize) {
        scanlines.push(FILTER_NONE);
        scanlines.extend_from_slice(row);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&scanlines)?;
    let idat = encoder.finish()?;
    write_chunk(&mut out, CHUNK_IDAT, &idat)?;

    write_chunk(&mut out, CHUNK_IEND, &[])?;
    Ok(out)
}
