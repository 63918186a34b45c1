//! Shadowsocks profile record.
//!
//! Version 5 moved Shadowsocks onto the shared transport layout (for
//! plugin-less TLS/ws deployments behind CDNs); earlier versions stored a
//! flat address/port pair. Versions 2 and 3 carried experiment flags that
//! were later removed and are decoded into the void.

use crate::profile::base::BaseProfile;
use crate::profile::standard::{StandardTransport, StreamExtra, StreamExtraMut};
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 5;

#[derive(Debug, PartialEq, Eq)]
pub struct ShadowsocksProfile {
    pub stream: StandardTransport,
    pub method: String,
    pub password: String,
    /// SIP003 plugin declaration, `name;opt=value;...`.
    pub plugin: String,
    pub reduced_iv_head_entropy: bool,
}

impl Default for ShadowsocksProfile {
    fn default() -> Self {
        Self {
            stream: StandardTransport::default(),
            method: "aes-256-gcm".to_string(),
            password: String::new(),
            plugin: String::new(),
            reduced_iv_head_entropy: false,
        }
    }
}

impl ProfileRecord for ShadowsocksProfile {
    fn base(&self) -> &BaseProfile {
        &self.stream.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.stream.base
    }

    fn apply_defaults(&mut self) {
        self.stream.apply_defaults();
        if self.method.trim().is_empty() {
            self.method = "aes-256-gcm".to_string();
        }
    }

    fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(VERSION);
        self.stream.serialize_with(w, StreamExtra::None);
        w.write_str(&self.method);
        w.write_str(&self.password);
        w.write_str(&self.plugin);
        w.write_bool(self.reduced_iv_head_entropy);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        if version >= 5 {
            self.stream.deserialize_with(r, StreamExtraMut::None)?;
        } else {
            self.stream.base.server_address = r.read_str()?;
            self.stream.base.server_port = r.read_i32()? as u16;
        }
        self.method = r.read_str()?;
        self.password = r.read_str()?;
        self.plugin = r.read_str()?;
        if version >= 1 {
            self.reduced_iv_head_entropy = r.read_bool()?;
        }
        if version == 2 || version == 3 {
            r.read_bool()?; // uot, removed
        }
        if version == 3 {
            r.read_bool()?; // encryptedProtocolExtension, removed
        }
        Ok(())
    }

    fn can_tcping(&self) -> bool {
        self.stream.stream_can_tcping()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        self.stream.merge_features(&mut dest.stream);
        dest.reduced_iv_head_entropy = self.reduced_iv_head_entropy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = ShadowsocksProfile::default().defaulted();
        assert_eq!(record.method, "aes-256-gcm");
        assert_eq!(record.plugin, "");
    }

    #[test]
    fn test_roundtrip() {
        let mut record = ShadowsocksProfile::default();
        record.stream.base.server_address = "ss.example.com".to_string();
        record.stream.base.server_port = 8388;
        record.method = "chacha20-ietf-poly1305".to_string();
        record.password = "barfoo!".to_string();
        record.plugin = "obfs-local;obfs=http;obfs-host=bing.com".to_string();
        let record = record.defaulted();

        let decoded = ShadowsocksProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_legacy_v0_layout() {
        let mut w = RecordWriter::new();
        w.write_i32(0);
        w.write_str("legacy.example.com");
        w.write_i32(8388);
        w.write_str("rc4-md5");
        w.write_str("hunter2");
        w.write_str("");
        let decoded = ShadowsocksProfile::decode(&w.into_bytes()).unwrap();

        assert_eq!(decoded.stream.base.server_address, "legacy.example.com");
        assert_eq!(decoded.method, "rc4-md5");
        assert_eq!(decoded.password, "hunter2");
        assert!(!decoded.reduced_iv_head_entropy);
        assert_eq!(decoded.stream.transport, "tcp");
    }

    #[test]
    fn test_v2_discards_uot_flag() {
        let mut w = RecordWriter::new();
        w.write_i32(2);
        w.write_str("legacy.example.com");
        w.write_i32(8388);
        w.write_str("aes-128-gcm");
        w.write_str("pw");
        w.write_str("");
        w.write_bool(true); // reduced iv head entropy
        w.write_bool(true); // uot, removed
        let decoded = ShadowsocksProfile::decode(&w.into_bytes()).unwrap();

        assert_eq!(decoded.method, "aes-128-gcm");
        assert!(decoded.reduced_iv_head_entropy);
        assert_eq!(decoded.password, "pw");
    }

    #[test]
    fn test_v3_discards_both_experiment_flags() {
        let mut w = RecordWriter::new();
        w.write_i32(3);
        w.write_str("legacy.example.com");
        w.write_i32(8388);
        w.write_str("aes-128-gcm");
        w.write_str("pw");
        w.write_str("plug");
        w.write_bool(false);
        w.write_bool(true); // uot, removed
        w.write_bool(true); // encryptedProtocolExtension, removed
        let decoded = ShadowsocksProfile::decode(&w.into_bytes()).unwrap();
        assert_eq!(decoded.plugin, "plug");
        assert!(!decoded.reduced_iv_head_entropy);
    }

    #[test]
    fn test_blank_method_falls_back() {
        let mut w = RecordWriter::new();
        w.write_i32(0);
        w.write_str("legacy.example.com");
        w.write_i32(8388);
        w.write_str(""); // blank method
        w.write_str("pw");
        w.write_str("");
        let decoded = ShadowsocksProfile::decode(&w.into_bytes()).unwrap();
        assert_eq!(decoded.method, "aes-256-gcm");
    }

    #[test]
    fn test_feature_merge_copies_entropy_flag() {
        let mut source = ShadowsocksProfile::default();
        source.reduced_iv_head_entropy = true;
        let mut dest = ShadowsocksProfile::default();
        source.apply_feature_settings(&mut dest);
        assert!(dest.reduced_iv_head_entropy);
    }
}
