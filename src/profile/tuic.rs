//! TUIC v4 profile record, driving the legacy standalone client.
//!
//! Version 1 appended the UUID after the protocol gained proper user
//! identities; the password slot was called "token" back then and keeps its
//! wire position.

use crate::profile::base::BaseProfile;
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 1;

#[derive(Debug, PartialEq, Eq)]
pub struct TuicProfile {
    pub base: BaseProfile,
    pub uuid: String,
    pub password: String,
    pub ca_text: String,
    pub udp_relay_mode: String,
    pub congestion_control: String,
    pub alpn: String,
    pub disable_sni: bool,
    pub zero_rtt_handshake: bool,
    pub mtu: i32,
    pub sni: String,
}

impl Default for TuicProfile {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            uuid: String::new(),
            password: String::new(),
            ca_text: String::new(),
            udp_relay_mode: "native".to_string(),
            congestion_control: "cubic".to_string(),
            alpn: String::new(),
            disable_sni: false,
            zero_rtt_handshake: false,
            mtu: 1500,
            sni: String::new(),
        }
    }
}

impl ProfileRecord for TuicProfile {
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
        w.write_str(&self.password);
        w.write_str(&self.ca_text);
        w.write_str(&self.udp_relay_mode);
        w.write_str(&self.congestion_control);
        w.write_str(&self.alpn);
        w.write_bool(self.disable_sni);
        w.write_bool(self.zero_rtt_handshake);
        w.write_i32(self.mtu);
        w.write_str(&self.sni);
        w.write_str(&self.uuid);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.password = r.read_str()?; // was "token"
        self.ca_text = r.read_str()?;
        self.udp_relay_mode = r.read_str()?;
        self.congestion_control = r.read_str()?; // was "congestionController"
        self.alpn = r.read_str()?;
        self.disable_sni = r.read_bool()?;
        self.zero_rtt_handshake = r.read_bool()?; // was "reduceRTT"
        self.mtu = r.read_i32()?;
        self.sni = r.read_str()?;
        if version >= 1 {
            self.uuid = r.read_str()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = TuicProfile::default().defaulted();
        assert_eq!(record.udp_relay_mode, "native");
        assert_eq!(record.congestion_control, "cubic");
        assert_eq!(record.mtu, 1500);
    }

    #[test]
    fn test_roundtrip() {
        let mut record = TuicProfile::default();
        record.base.server_address = "tuic.example.com".to_string();
        record.base.server_port = 8443;
        record.uuid = "f1f2".to_string();
        record.password = "token-value".to_string();
        record.congestion_control = "bbr".to_string();
        record.zero_rtt_handshake = true;
        let record = record.defaulted();

        let decoded = TuicProfile::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_v0_has_no_uuid() {
        // Version 0 records end after the SNI; the token doubles as identity.
        let mut w = RecordWriter::new();
        w.write_i32(0);
        BaseProfile::default().serialize(&mut w);
        w.write_str("legacy-token");
        w.write_str("");
        w.write_str("native");
        w.write_str("cubic");
        w.write_str("");
        w.write_bool(false);
        w.write_bool(false);
        w.write_i32(1500);
        w.write_str("");
        let decoded = TuicProfile::decode(&w.into_bytes()).unwrap();
        assert_eq!(decoded.password, "legacy-token");
        assert_eq!(decoded.uuid, "");
    }
}
