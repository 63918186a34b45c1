//! ShadowTLS profile record.

use crate::profile::base::BaseProfile;
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 0;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ShadowTlsProfile {
    pub base: BaseProfile,
    pub sni: String,
    pub password: String,
    pub alpn: String,
    /// Protocol v3 (strict mode); otherwise v2.
    pub v3: bool,
}

impl ProfileRecord for ShadowTlsProfile {
    fn base(&self) -> &BaseProfile {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.base
    }

    fn apply_defaults(&mut self) {
        self.base.apply_defaults();
    }

    fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(VERSION);
        self.base.serialize(w);
        w.write_str(&self.sni);
        w.write_str(&self.password);
        w.write_str(&self.alpn);
        w.write_bool(self.v3);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let _version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.sni = r.read_str()?;
        self.password = r.read_str()?;
        self.alpn = r.read_str()?;
        self.v3 = r.read_bool()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut record = ShadowTlsProfile::default();
        record.base.server_address = "stls.example.com".to_string();
        record.sni = "cloud.example.com".to_string();
        record.password = "pw".to_string();
        record.v3 = true;
        let record = record.defaulted();

        let decoded = ShadowTlsProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_truncated_record_is_fatal() {
        let bytes = ShadowTlsProfile::default().defaulted().encode();
        assert!(ShadowTlsProfile::decode(&bytes[..bytes.len() - 1]).is_err());
    }
}
