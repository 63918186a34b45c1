//! TUIC v5 profile record.

use crate::net::is_ip_address;
use crate::profile::base::BaseProfile;
use crate::profile::{FeatureFlags, ProfileRecord};
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 0;

#[derive(Debug, PartialEq, Eq)]
pub struct Tuic5Profile {
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

impl Default for Tuic5Profile {
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

impl ProfileRecord for Tuic5Profile {
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
        let _version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.password = r.read_str()?;
        self.ca_text = r.read_str()?;
        self.udp_relay_mode = r.read_str()?;
        self.congestion_control = r.read_str()?;
        self.alpn = r.read_str()?;
        self.disable_sni = r.read_bool()?;
        self.zero_rtt_handshake = r.read_bool()?;
        self.mtu = r.read_i32()?;
        self.sni = r.read_str()?;
        self.uuid = r.read_str()?;
        Ok(())
    }

    /// QUIC-based, so a TCP connect tells us nothing.
    fn can_tcping(&self) -> bool {
        false
    }

    fn can_mapping(&self, _flags: &FeatureFlags) -> bool {
        !is_ip_address(&self.base.server_address) || !self.sni.trim().is_empty()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        dest.ca_text = self.ca_text.clone();
        dest.zero_rtt_handshake = self.zero_rtt_handshake;
        dest.mtu = self.mtu;
    }
}
