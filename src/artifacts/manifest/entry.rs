use crate::artifacts::manifest::checksum::Checksum;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

/// Raw fingerprint size in bytes
const OID_SIZE: usize = 20;

/// Size of the name length prefix in bytes
const NAME_LENGTH_SIZE: usize = 2;

/// One `(name, fingerprint)` row of a manifest
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ManifestEntry {
    pub name: String,
    pub oid: ObjectId,
}

impl ManifestEntry {
    pub fn read_from(reader: &mut Checksum) -> anyhow::Result<Self> {
        let oid = ObjectId::read_h40_from(&reader.read(OID_SIZE)?)?;

        let name_length = byteorder::NetworkEndian::read_u16(&reader.read(NAME_LENGTH_SIZE)?);
        let name = String::from_utf8(reader.read(name_length as usize)?.to_vec())
            .map_err(|_| anyhow::anyhow!("Manifest entry name is not UTF-8"))?;

        Ok(ManifestEntry { name, oid })
    }
}

impl Packable for ManifestEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_length = u16::try_from(self.name.len())
            .map_err(|_| anyhow::anyhow!("Name too long for manifest: {}", self.name))?;

        let mut bytes = Vec::with_capacity(OID_SIZE + NAME_LENGTH_SIZE + self.name.len());
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(name_length)?;
        bytes.write_all(self.name.as_bytes())?;

        Ok(Bytes::from(bytes))
    }
}
