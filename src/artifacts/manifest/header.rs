use crate::artifacts::manifest::HEADER_SIZE;
use crate::artifacts::manifest::checksum::Checksum;
use crate::artifacts::objects::object::Packable;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ManifestHeader {
    pub marker: String,
    pub version: u32,
    pub entries_count: u32,
}

impl ManifestHeader {
    pub fn read_from(reader: &mut Checksum) -> anyhow::Result<Self> {
        let bytes = reader.read(HEADER_SIZE)?;

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| anyhow::anyhow!("Invalid marker in manifest header"))?;
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);

        Ok(ManifestHeader {
            marker,
            version,
            entries_count,
        })
    }
}

impl Packable for ManifestHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}
