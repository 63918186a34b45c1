//! Base record layout shared by every profile variant.

use crate::wire::{RecordReader, RecordWriter, WireError};

/// Version written ahead of the base fields. The base layout has never
/// changed; variants version themselves independently.
const BASE_VERSION: i32 = 0;

/// Fields common to every profile: where the server is and what the user
/// called it. Embedded by value in each variant and (de)serialized first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseProfile {
    pub server_address: String,
    pub server_port: u16,
    /// Display name; empty means "derive from address".
    pub name: String,
}

impl Default for BaseProfile {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            server_port: 1080,
            name: String::new(),
        }
    }
}

impl BaseProfile {
    pub(crate) fn apply_defaults(&mut self) {
        if self.server_address.trim().is_empty() {
            self.server_address = "127.0.0.1".to_string();
        }
    }

    pub(crate) fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(BASE_VERSION);
        w.write_str(&self.server_address);
        w.write_i32(i32::from(self.server_port));
        w.write_str(&self.name);
    }

    pub(crate) fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let _version = r.read_i32()?;
        self.server_address = r.read_str()?;
        self.server_port = r.read_i32()? as u16;
        self.name = r.read_str()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_roundtrip() {
        let base = BaseProfile {
            server_address: "example.com".to_string(),
            server_port: 8388,
            name: "home".to_string(),
        };
        let mut w = RecordWriter::new();
        base.serialize(&mut w);
        let bytes = w.into_bytes();

        let mut decoded = BaseProfile::default();
        decoded.deserialize(&mut RecordReader::new(&bytes)).unwrap();
        assert_eq!(decoded, base);
    }

    #[test]
    fn test_blank_address_defaults_to_loopback() {
        let mut base = BaseProfile {
            server_address: "  ".to_string(),
            ..Default::default()
        };
        base.apply_defaults();
        assert_eq!(base.server_address, "127.0.0.1");
    }
}
