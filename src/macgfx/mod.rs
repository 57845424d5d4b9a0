pub mod canvas;
pub mod icon;
pub mod opcode;
pub mod picture;
pub mod png;
pub mod rect;
pub mod resample;

use crate::error::Result;
use crate::macres::resource::ResourceType;
use canvas::Canvas;

/// How a resource's bytes are turned into a canvas
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum RecordKind {
    /// `PICT`: opcode stream
    Picture,
    /// `ICON`: 32x32 bitmap
    Icon,
    /// `ICN#`: 32x32 bitmap followed by its mask
    MaskedIcon,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [ RecordKind::Picture, RecordKind::Icon, RecordKind::MaskedIcon ];

    pub fn from_type(rtype: ResourceType) -> Option<RecordKind> {
        match rtype {
            ResourceType::PICT => Some(RecordKind::Picture),
            ResourceType::ICON => Some(RecordKind::Icon),
            ResourceType::ICN => Some(RecordKind::MaskedIcon),
            _ => None,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            RecordKind::Picture => ResourceType::PICT,
            RecordKind::Icon => ResourceType::ICON,
            RecordKind::MaskedIcon => ResourceType::ICN,
        }
    }
}

/// Renders one resource; `Ok(None)` means the picture frame was empty
pub fn decode_record(data: &[u8], kind: RecordKind) -> Result<Option<Canvas>> {
    match kind {
        RecordKind::Picture => picture::decode_picture(data),
        RecordKind::Icon => Ok(Some(icon::decode_icon(data))),
        RecordKind::MaskedIcon => Ok(Some(icon::decode_masked_icon(data))),
    }
}
