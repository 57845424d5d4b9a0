use std::io::Read;

use flate2::read::ZlibDecoder;

use rsrc_reenigne::macgfx::{self, resample, RecordKind};
use rsrc_reenigne::macres::fork;
use rsrc_reenigne::{Error, ResourceType};

/// Resource fork with one resource per entry, all unnamed
fn build_fork(resources: &[([u8; 4], u16, Vec<u8>)]) -> Vec<u8> {
    let mut data_section = Vec::new();
    let mut refs = Vec::new();
    let mut type_list = Vec::new();

    let ref_lists_start = 2 + resources.len() * 8;
    for (tag, id, data) in resources {
        type_list.extend_from_slice(tag);
        type_list.extend_from_slice(&0u16.to_be_bytes());
        type_list.extend_from_slice(&((ref_lists_start + refs.len()) as u16).to_be_bytes());

        refs.extend_from_slice(&id.to_be_bytes());
        refs.extend_from_slice(&0xffffu16.to_be_bytes());
        refs.push(0);
        refs.extend_from_slice(&(data_section.len() as u32).to_be_bytes()[1..]);
        refs.extend_from_slice(&[ 0u8; 4 ]);

        data_section.extend_from_slice(&(data.len() as u32).to_be_bytes());
        data_section.extend_from_slice(data);
    }

    let map_offset = 16 + data_section.len() as u32;
    let name_list_offset = (28 + 2 + type_list.len() + refs.len()) as u16;
    let mut out = Vec::new();
    out.extend_from_slice(&16u32.to_be_bytes());
    out.extend_from_slice(&map_offset.to_be_bytes());
    out.extend_from_slice(&(data_section.len() as u32).to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&data_section);
    out.extend_from_slice(&[ 0u8; 24 ]);
    out.extend_from_slice(&28u16.to_be_bytes());
    out.extend_from_slice(&name_list_offset.to_be_bytes());
    out.extend_from_slice(&((resources.len() as u16).wrapping_sub(1)).to_be_bytes());
    out.extend_from_slice(&type_list);
    out.extend_from_slice(&refs);
    out
}

/// 2x2 picture whose four pixels are all foreground, drawn by one BitsRect
fn solid_picture() -> Vec<u8> {
    let rect = [ 0u8, 0, 0, 0, 0, 2, 0, 2 ];
    let mut ops = vec![ 0x11, 0x01, 0x90, 0x00, 0x02 ];
    for _ in 0..3 {
        ops.extend_from_slice(&rect);
    }
    ops.extend_from_slice(&[ 0x00, 0x00 ]);
    ops.extend_from_slice(&[ 0xc0, 0x00, 0xc0, 0x00 ]);
    ops.push(0xff);

    let mut data = Vec::new();
    data.extend_from_slice(&((10 + ops.len()) as u16).to_be_bytes());
    data.extend_from_slice(&rect);
    data.extend_from_slice(&ops);
    data
}

struct DecodedPng {
    width: u32,
    height: u32,
    ihdr: Vec<u8>,
    pixels: Vec<u8>,
}

fn read_png(png: &[u8]) -> DecodedPng {
    assert_eq!(&png[..8], &[ 0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a ]);
    let mut pos = 8;
    let mut ihdr = Vec::new();
    let mut idat = Vec::new();
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let ty = &png[pos + 4..pos + 8];
        let body = &png[pos + 8..pos + 8 + len];
        match ty {
            b"IHDR" => ihdr = body.to_vec(),
            b"IDAT" => idat.extend_from_slice(body),
            b"IEND" => assert_eq!(pos + 12 + len, png.len()),
            _ => panic!("unexpected chunk {:?}", ty),
        }
        pos += 12 + len;
    }
    let width = u32::from_be_bytes(ihdr[0..4].try_into().unwrap());
    let height = u32::from_be_bytes(ihdr[4..8].try_into().unwrap());

    let mut raw = Vec::new();
    ZlibDecoder::new(idat.as_slice()).read_to_end(&mut raw).unwrap();
    assert_eq!(raw.len(), (width as usize + 1) * height as usize);
    let mut pixels = Vec::new();
    for row in raw.chunks(width as usize + 1) {
        assert_eq!(row[0], 0);
        pixels.extend_from_slice(&row[1..]);
    }
    DecodedPng{ width, height, ihdr, pixels }
}

#[test]
fn test_solid_picture_to_png() {
    let archive = build_fork(&[ (*b"PICT", 128, solid_picture()) ]);
    let records = fork::list_records(&archive, ResourceType::PICT).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.num, 128);

    let canvas = macgfx::decode_record(&records[0].data, RecordKind::Picture).unwrap().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (2, 2));
    assert_eq!(canvas.pixels(), &[ 1, 1, 1, 1 ]);

    let image = resample::resample(&canvas, resample::DEFAULT_SCALE).unwrap();
    let png = read_png(&image.encode_png().unwrap());
    assert_eq!(png.ihdr, vec![ 0, 0, 0, 3, 0, 0, 0, 3, 8, 0, 0, 0, 0 ]);
    assert_eq!((png.width, png.height), (3, 3));
    assert_eq!(png.pixels, vec![ 0; 9 ]);
}

#[test]
fn test_icons_to_png() {
    let mut icon = vec![ 0u8; 128 ];
    icon[0] = 0x80;
    let mut masked = vec![ 0xffu8; 256 ];
    masked[..128].fill(0);

    let archive = build_fork(&[
        (*b"ICON", 1, icon),
        (*b"ICN#", 2, masked),
    ]);

    let icons = fork::list_records(&archive, ResourceType::ICON).unwrap();
    let canvas = macgfx::decode_record(&icons[0].data, RecordKind::Icon).unwrap().unwrap();
    let png = read_png(&resample::resample(&canvas, 1.0).unwrap().encode_png().unwrap());
    assert_eq!((png.width, png.height), (32, 32));
    // the half-pixel offset blends the ink into its right and lower neighbours
    assert_eq!(&png.pixels[0..3], &[ 0, 64, 255 ]);
    assert_eq!(&png.pixels[32..35], &[ 64, 191, 255 ]);
    for y in 0..32 {
        for x in 0..32 {
            if x >= 2 || y >= 2 {
                assert_eq!(png.pixels[y * 32 + x], 255);
            }
        }
    }

    // the mask plane is all ones but must not show up
    let masked = fork::list_records(&archive, ResourceType::ICN).unwrap();
    assert_eq!(masked[0].id.num, 2);
    let canvas = macgfx::decode_record(&masked[0].data, RecordKind::MaskedIcon).unwrap().unwrap();
    let png = read_png(&resample::resample(&canvas, 1.5).unwrap().encode_png().unwrap());
    assert_eq!((png.width, png.height), (48, 48));
    assert!(png.pixels.iter().all(|&p| p == 255));
}

#[test]
fn test_unit_scale_round_trip() {
    let archive = build_fork(&[ (*b"PICT", 5, solid_picture()), (*b"ICON", 7, vec![ 0xcc; 128 ]) ]);
    let icons = fork::list_records(&archive, ResourceType::ICON).unwrap();
    let canvas = macgfx::decode_record(&icons[0].data, RecordKind::Icon).unwrap().unwrap();

    let image = resample::resample(&canvas, 1.0).unwrap();
    let png = read_png(&image.encode_png().unwrap());
    assert_eq!((png.width, png.height), (32, 32));
    assert_eq!(png.pixels, image.pixels);

    // columns come in pairs of ink and pairs of paper; every pixel whose left
    // neighbour matches it keeps its shade
    let shade = |p: u8| if p == 1 { 0 } else { 255 };
    for y in 0..32usize {
        for x in 1..32usize {
            let here = canvas.pixels()[y * 32 + x];
            if here == canvas.pixels()[y * 32 + x - 1] {
                assert_eq!(png.pixels[y * 32 + x], shade(here), "pixel ({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_map_offset_past_end() {
    let mut archive = build_fork(&[ (*b"PICT", 128, solid_picture()) ]);
    archive[4..8].copy_from_slice(&0x7fff_ffffu32.to_be_bytes());
    assert!(matches!(fork::list_records(&archive, ResourceType::PICT), Err(Error::ContainerMalformed(_))));
}

#[test]
fn test_missing_type_is_empty() {
    let archive = build_fork(&[ (*b"PICT", 128, solid_picture()) ]);
    assert!(fork::list_records(&archive, ResourceType::ICON).unwrap().is_empty());
}
