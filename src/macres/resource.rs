use std::fmt;
use std::fmt::Formatter;

/// Four-character resource type code, such as `PICT` or `ICN#`
#[derive(PartialEq,Eq,Hash,Clone,Copy,PartialOrd,Ord)]
pub struct ResourceType(pub [u8; 4]);

impl ResourceType {
    pub const PICT: ResourceType = ResourceType(*b"PICT");
    pub const ICON: ResourceType = ResourceType(*b"ICON");
    pub const ICN: ResourceType = ResourceType(*b"ICN#");

    /// Builds a type code from text; shorter codes are padded with spaces
    pub fn new(tag: &str) -> Option<ResourceType> {
        if tag.len() > 4 || !tag.is_ascii() {
            return None;
        }
        let mut code = [ b' '; 4 ];
        code[..tag.len()].copy_from_slice(tag.as_bytes());
        Some(ResourceType(code))
    }

    /// Lower-case alphanumeric form, usable in file names (`ICN#` becomes `icn`)
    pub fn file_stem(&self) -> String {
        self.0.iter()
            .filter(|b| b.is_ascii_alphanumeric())
            .map(|b| b.to_ascii_lowercase() as char)
            .collect()
    }
}

impl From<u32> for ResourceType {
    fn from(code: u32) -> Self {
        ResourceType(code.to_be_bytes())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let ch = if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self)
    }
}

#[derive(PartialEq,Eq,Hash,Clone,Copy,Debug)]
pub struct ResourceID {
    pub rtype: ResourceType,
    pub num: u16,
}

impl fmt::Display for ResourceID {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.rtype, self.num)
    }
}

/// One resource as stored in the fork; never modified after loading
#[derive(Clone,Debug)]
pub struct Record {
    pub id: ResourceID,
    pub name: Option<String>,
    pub data: Vec<u8>,
}
