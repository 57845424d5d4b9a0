//! Classic Mac OS resource fork parsing
//!
//! A fork starts with a small header pointing at the data section and the
//! resource map. The map holds a type list; every type entry points at a
//! list of 12-byte references, and each reference locates one length-prefixed
//! blob inside the data section plus an optional name in the name list.

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use packed_struct::prelude::*;
use std::collections::BTreeMap;
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::macres::resource::{Record, ResourceID, ResourceType};

const FORK_HEADER_SIZE: usize = 8;
const MAP_HEADER_SIZE: usize = 28;
const TYPE_ENTRY_SIZE: usize = 8;
const REFERENCE_SIZE: usize = 12;
const NO_NAME: u16 = 0xffff;

#[derive(PackedStruct)]
#[packed_struct(endian="msb")]
pub struct ForkHeader {
    pub data_offset: u32,
    pub map_offset: u32,
}

#[derive(PackedStruct)]
#[packed_struct(endian="msb")]
pub struct MapHeader {
    pub header_copy0: u32,
    pub header_copy1: u32,
    pub header_copy2: u32,
    pub header_copy3: u32,
    pub next_map: u32,
    pub file_ref: u16,
    pub attributes: u16,
    pub type_list_offset: u16,
    pub name_list_offset: u16,
}

#[derive(PackedStruct)]
#[packed_struct(endian="msb")]
struct TypeEntry {
    rtype: u32,
    count_minus_one: u16,
    ref_list_offset: u16,
}

/// One entry of the map's type list
#[derive(Clone,Copy,Debug)]
pub struct TypeListEntry {
    pub rtype: ResourceType,
    pub count: usize,
    ref_list: usize,
}

pub struct ResourceFork<'a> {
    data: &'a [u8],
    data_offset: usize,
    name_list: usize,
    types: Vec<TypeListEntry>,
}

fn malformed(what: String) -> Error {
    Error::ContainerMalformed(what)
}

fn slice_at<'a>(data: &'a [u8], offset: usize, len: usize, what: &str) -> Result<&'a [u8]> {
    offset.checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| malformed(format!("{} at {}..+{} runs past end of fork ({} bytes)", what, offset, len, data.len())))
}

impl<'a> ResourceFork<'a> {
    /// Parses the fork header, map header and type list
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = slice_at(data, 0, FORK_HEADER_SIZE, "fork header")?;
        let header = ForkHeader::unpack_from_slice(header)
            .map_err(|e| malformed(format!("fork header: {}", e)))?;
        let data_offset = header.data_offset as usize;
        let map_offset = header.map_offset as usize;

        let map = slice_at(data, map_offset, MAP_HEADER_SIZE, "resource map header")?;
        let map = MapHeader::unpack_from_slice(map)
            .map_err(|e| malformed(format!("resource map header: {}", e)))?;
        let type_list = map_offset + map.type_list_offset as usize;
        let name_list = map_offset + map.name_list_offset as usize;

        // The stored count is one less than the number of types; 0xffff means none
        let num_types = BigEndian::read_u16(slice_at(data, type_list, 2, "type list")?).wrapping_add(1);
        let mut types = Vec::with_capacity(num_types as usize);
        for n in 0..num_types as usize {
            let entry_offset = type_list + 2 + n * TYPE_ENTRY_SIZE;
            let entry = slice_at(data, entry_offset, TYPE_ENTRY_SIZE, "type list entry")?;
            let entry = TypeEntry::unpack_from_slice(entry)
                .map_err(|e| malformed(format!("type list entry {}: {}", n, e)))?;
            types.push(TypeListEntry{
                rtype: ResourceType::from(entry.rtype),
                count: entry.count_minus_one as usize + 1,
                ref_list: type_list + entry.ref_list_offset as usize,
            });
        }
        log::debug!("resource fork: data at {}, map at {}, {} type(s)", data_offset, map_offset, types.len());

        Ok(Self{ data, data_offset, name_list, types })
    }

    pub fn types(&self) -> &[TypeListEntry] {
        &self.types
    }

    /// Loads every resource of the given type; a broken reference only fails its own entry
    pub fn records(&self, rtype: ResourceType) -> Vec<Result<Record>> {
        self.types.iter()
            .filter(|t| t.rtype == rtype)
            .flat_map(|t| (0..t.count).map(move |n| self.read_record(t, n)))
            .collect()
    }

    fn read_record(&self, entry: &TypeListEntry, index: usize) -> Result<Record> {
        let ref_offset = entry.ref_list + index * REFERENCE_SIZE;
        let reference = slice_at(self.data, ref_offset, REFERENCE_SIZE, "reference list entry")?;
        let mut rdr = Cursor::new(reference);
        let num = rdr.read_u16::<BigEndian>()?;
        let name_offset = rdr.read_u16::<BigEndian>()?;
        let _attributes = rdr.read_u8()?;
        let local_offset = rdr.read_u24::<BigEndian>()? as usize;
        let id = ResourceID{ rtype: entry.rtype, num };

        let offset = self.data_offset + local_offset;
        let length = BigEndian::read_u32(slice_at(self.data, offset, 4, "resource length")?) as usize;
        let data = slice_at(self.data, offset + 4, length, "resource data")
            .map_err(|e| malformed(format!("{}: {}", id, e)))?
            .to_vec();

        let name = if name_offset == NO_NAME {
            None
        } else {
            Some(self.read_name(name_offset as usize)?)
        };
        Ok(Record{ id, name, data })
    }

    fn read_name(&self, name_offset: usize) -> Result<String> {
        let offset = self.name_list + name_offset;
        let length = slice_at(self.data, offset, 1, "resource name")?[0] as usize;
        let name = slice_at(self.data, offset + 1, length, "resource name")?;
        Ok(name.iter().map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER }).collect())
    }
}

/// Returns every loadable resource of type `rtype`, ordered by id
///
/// Entries whose offsets are out of range are logged and skipped; a fork whose
/// header or map cannot be read at all is an error. On duplicate ids the
/// entry listed last wins.
pub fn list_records(archive: &[u8], rtype: ResourceType) -> Result<Vec<Record>> {
    let fork = ResourceFork::parse(archive)?;
    let mut records: BTreeMap<u16, Record> = BTreeMap::new();
    for record in fork.records(rtype) {
        match record {
            Ok(record) => {
                records.insert(record.id.num, record);
            },
            Err(e) => {
                log::warn!("skipping {} resource: {}", rtype, e);
            }
        }
    }
    Ok(records.into_values().collect())
}
