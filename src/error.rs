use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Header, map or reference offsets do not fit inside the archive
    #[error("malformed resource container: {0}")]
    ContainerMalformed(String),

    /// The interpreter met an opcode it has no rule for
    #[error("unsupported opcode 0x{opcode:02x} at offset {offset}")]
    UnsupportedOpcode { opcode: u8, offset: usize },

    /// A fixed opcode field runs past the end of the picture
    #[error("picture data truncated at offset {offset}")]
    TruncatedPicture { offset: usize },

    /// The picture frame is larger than any picture this decoder renders
    #[error("picture frame {width}x{height} is too large")]
    FrameTooLarge { width: u32, height: u32 },

    #[error("invalid scale factor {0}")]
    InvalidScale(f64),

    #[error("cannot encode an empty {width}x{height} raster")]
    EmptyRaster { width: u32, height: u32 },

    #[error("raster has {actual} pixels, expected {expected}")]
    RasterSizeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
