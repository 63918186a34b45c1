//! Brook profile record.
//!
//! The `protocol` discriminator selects between the plain, ws, wss and quic
//! server modes. Before version 7 the writer ran the `ws` branch into the
//! `wss` one, so old ws records carry the wss suffix too; the decoder keeps
//! that chain as an explicit helper.

use crate::profile::base::BaseProfile;
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 7;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BrookProfile {
    pub base: BaseProfile,
    /// Server mode: empty (plain), `ws`, `wss` or `quic`.
    pub protocol: String,
    pub password: String,
    pub ws_path: String,
    pub insecure: bool,
    pub without_brook_protocol: bool,
    pub udp_over_tcp: bool,
    pub tls_fingerprint: String,
    pub fragment: String,
    pub sni: String,
    pub udp_over_stream: bool,
}

impl ProfileRecord for BrookProfile {
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
        w.write_str(&self.protocol);
        w.write_str(&self.password);
        w.write_bool(self.udp_over_tcp);
        match self.protocol.as_str() {
            "ws" => {
                w.write_str(&self.ws_path);
                w.write_bool(self.without_brook_protocol);
            }
            "wss" => {
                w.write_str(&self.ws_path);
                w.write_bool(self.insecure);
                w.write_bool(self.without_brook_protocol);
                w.write_str(&self.tls_fingerprint);
                w.write_str(&self.fragment);
                w.write_str(&self.sni);
            }
            "quic" => {
                w.write_bool(self.insecure);
                w.write_bool(self.without_brook_protocol);
                w.write_str(&self.sni);
                w.write_bool(self.udp_over_stream);
            }
            _ => {}
        }
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.protocol = r.read_str()?;
        self.password = r.read_str()?;
        if version >= 5 {
            self.udp_over_tcp = r.read_bool()?;
        }
        if version >= 1 {
            match self.protocol.as_str() {
                "ws" => {
                    self.ws_path = r.read_str()?;
                    if version >= 2 {
                        self.without_brook_protocol = r.read_bool()?;
                    }
                    if version < 7 {
                        self.read_wss_tail(r, version)?;
                    }
                }
                "wss" => self.read_wss_tail(r, version)?,
                "quic" => {
                    if version >= 4 {
                        self.insecure = r.read_bool()?;
                        self.without_brook_protocol = r.read_bool()?;
                    }
                    if version >= 5 {
                        self.sni = r.read_str()?;
                    }
                    if version >= 6 {
                        self.udp_over_stream = r.read_bool()?;
                    }
                }
                _ => {
                    if version == 2 {
                        r.read_bool()?; // uot, removed
                    }
                }
            }
        }
        Ok(())
    }

    fn can_tcping(&self) -> bool {
        self.protocol != "quic"
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        if self.insecure {
            dest.insecure = true;
        }
    }
}

impl BrookProfile {
    /// The wss layout; ws records written before version 7 continue into it.
    fn read_wss_tail(&mut self, r: &mut RecordReader, version: i32) -> Result<(), WireError> {
        self.ws_path = r.read_str()?;
        if version >= 2 {
            self.insecure = r.read_bool()?;
            self.without_brook_protocol = r.read_bool()?;
        }
        if version >= 5 {
            self.tls_fingerprint = r.read_str()?;
            self.fragment = r.read_str()?;
            self.sni = r.read_str()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_roundtrip() {
        let mut record = BrookProfile::default();
        record.base.server_address = "brook.example.com".to_string();
        record.password = "pw".to_string();
        record.udp_over_tcp = true;
        let record = record.defaulted();

        let decoded = BrookProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_wss_roundtrip() {
        let mut record = BrookProfile::default();
        record.protocol = "wss".to_string();
        record.ws_path = "/ws".to_string();
        record.insecure = true;
        record.tls_fingerprint = "chrome".to_string();
        record.sni = "cdn.example.com".to_string();
        let record = record.defaulted();

        let decoded = BrookProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_quic_roundtrip_and_tcping() {
        let mut record = BrookProfile::default();
        record.protocol = "quic".to_string();
        record.without_brook_protocol = true;
        record.sni = "quic.example.com".to_string();
        record.udp_over_stream = true;
        let record = record.defaulted();

        assert!(!record.can_tcping());
        let decoded = BrookProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_v6_ws_record_carries_wss_suffix() {
        // Before version 7 the ws writer continued into the wss layout,
        // writing the path twice.
        let mut w = RecordWriter::new();
        w.write_i32(6);
        BaseProfile::default().serialize(&mut w);
        w.write_str("ws");
        w.write_str("pw");
        w.write_bool(false); // udp over tcp (v5+)
        w.write_str("/early"); // ws path, first copy
        w.write_bool(false); // without brook protocol
        w.write_str("/final"); // ws path, wss copy wins
        w.write_bool(true); // insecure
        w.write_bool(true); // without brook protocol
        w.write_str("firefox");
        w.write_str("");
        w.write_str("sni.example.com");
        let decoded = BrookProfile::decode(&w.into_bytes()).unwrap();

        assert_eq!(decoded.ws_path, "/final");
        assert!(decoded.insecure);
        assert!(decoded.without_brook_protocol);
        assert_eq!(decoded.tls_fingerprint, "firefox");
        assert_eq!(decoded.sni, "sni.example.com");
    }

    #[test]
    fn test_v2_plain_record_discards_uot() {
        let mut w = RecordWriter::new();
        w.write_i32(2);
        BaseProfile::default().serialize(&mut w);
        w.write_str(""); // plain mode
        w.write_str("pw");
        w.write_bool(true); // uot, removed
        let decoded = BrookProfile::decode(&w.into_bytes()).unwrap();
        assert_eq!(decoded.password, "pw");
        assert!(!decoded.udp_over_tcp);
    }

    #[test]
    fn test_insecure_merge_is_sticky() {
        let mut source = BrookProfile::default();
        source.insecure = true;
        let mut dest = BrookProfile::default();
        source.apply_feature_settings(&mut dest);
        assert!(dest.insecure);

        let source = BrookProfile::default();
        source.apply_feature_settings(&mut dest);
        assert!(dest.insecure);
    }
}
