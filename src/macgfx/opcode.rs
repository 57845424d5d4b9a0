//! Version 1 picture opcodes and how far each one moves the stream
//!
//! Every opcode is a single byte. `OPCODES` maps each value to an `Op`
//! describing its payload; values without an entry are `Op::Unsupported`.

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Shape {
    Rect,
    RRect,
    Oval,
    Arc,
    Poly,
    Rgn,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Verb {
    Frame,
    Paint,
    Erase,
    Invert,
    Fill,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum LineKind {
    /// pnLoc, newPt
    Line,
    /// newPt
    LineFrom,
    /// pnLoc, dh, dv
    ShortLine,
    /// dh, dv
    ShortLineFrom,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Op {
    EndOfPicture,
    /// Fixed-size payload
    Skip(usize),
    /// `lead` bytes, then a 16-bit size; `inclusive` sizes count their own two bytes
    Sized { lead: usize, inclusive: bool },
    /// `lead` bytes, then a length-prefixed string
    Text { lead: usize },
    /// `same` variants reuse the last rectangle (or polygon/region) and carry no geometry
    Shape { shape: Shape, verb: Verb, same: bool },
    Bits { packed: bool },
    Line(LineKind),
    Unsupported,
}

pub const OP_END_OF_PICTURE: u8 = 0xff;

pub static OPCODES: [Op; 256] = build_opcodes();

const fn build_opcodes() -> [Op; 256] {
    let mut table = [ Op::Unsupported; 256 ];
    table[0x00] = Op::Skip(0);                                  // NOP
    table[0x01] = Op::Sized{ lead: 0, inclusive: true };        // clipRgn
    table[0x02] = Op::Skip(8);                                  // bkPat
    table[0x03] = Op::Skip(2);                                  // txFont
    table[0x04] = Op::Skip(1);                                  // txFace
    table[0x05] = Op::Skip(2);                                  // txMode
    table[0x06] = Op::Skip(4);                                  // spExtra
    table[0x07] = Op::Skip(4);                                  // pnSize
    table[0x08] = Op::Skip(2);                                  // pnMode
    table[0x09] = Op::Skip(8);                                  // pnPat
    table[0x0a] = Op::Skip(8);                                  // fillPat
    table[0x0b] = Op::Skip(4);                                  // ovSize
    table[0x0d] = Op::Skip(2);                                  // txSize
    table[0x0e] = Op::Skip(4);                                  // fgColor
    table[0x0f] = Op::Skip(4);                                  // bkColor
    table[0x10] = Op::Skip(8);                                  // txRatio
    table[0x11] = Op::Skip(1);                                  // version
    table[0x20] = Op::Line(LineKind::Line);
    table[0x21] = Op::Line(LineKind::LineFrom);
    table[0x22] = Op::Line(LineKind::ShortLine);
    table[0x23] = Op::Line(LineKind::ShortLineFrom);
    table[0x28] = Op::Text{ lead: 4 };                          // longText: txLoc
    table[0x29] = Op::Text{ lead: 1 };                          // dhText
    table[0x2a] = Op::Text{ lead: 1 };                          // dvText
    table[0x2b] = Op::Text{ lead: 2 };                          // dhdvText
    table[0x2c] = Op::Sized{ lead: 0, inclusive: true };        // fontName
    table[0x90] = Op::Bits{ packed: false };                    // bitsRect
    table[0x98] = Op::Bits{ packed: true };                     // packBitsRect
    table[0xa0] = Op::Skip(2);                                  // shortComment: kind
    table[0xa1] = Op::Sized{ lead: 2, inclusive: false };       // longComment: kind, size
    table[OP_END_OF_PICTURE as usize] = Op::EndOfPicture;

    // 0x30 frameRect .. 0x34 fillRect, 0x38 frameSameRect .. 0x3c fillSameRect,
    // and likewise for each shape in the following rows
    let shapes = [
        (0x30, Shape::Rect), (0x40, Shape::RRect), (0x50, Shape::Oval),
        (0x60, Shape::Arc), (0x70, Shape::Poly), (0x80, Shape::Rgn),
    ];
    let verbs = [ Verb::Frame, Verb::Paint, Verb::Erase, Verb::Invert, Verb::Fill ];
    let mut s = 0;
    while s < shapes.len() {
        let (base, shape) = shapes[s];
        let mut v = 0;
        while v < verbs.len() {
            table[base + v] = Op::Shape{ shape, verb: verbs[v], same: false };
            table[base + 8 + v] = Op::Shape{ shape, verb: verbs[v], same: true };
            v += 1;
        }
        s += 1;
    }
    table
}

pub fn lookup(opcode: u8) -> Op {
    OPCODES[opcode as usize]
}
