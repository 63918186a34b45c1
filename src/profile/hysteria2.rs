//! Hysteria2 profile record.
//!
//! Version 2 introduced multi-port expressions (`"443,5000-6000"`) and the
//! hop interval; older records synthesize `server_ports` from the base port.

use crate::net::{is_ip_address, is_ipv6_address, is_valid_hysteria_multi_port};
use crate::profile::base::BaseProfile;
use crate::profile::{FeatureFlags, ProfileRecord};
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
pub struct Hysteria2Profile {
    pub base: BaseProfile,
    pub auth: String,
    /// Salamander obfuscation password; empty disables obfuscation.
    pub obfs: String,
    pub sni: String,
    pub pin_sha256: String,
    pub ca_text: String,
    pub allow_insecure: bool,
    pub upload_mbps: i32,
    pub download_mbps: i32,
    pub disable_mtu_discovery: bool,
    pub init_stream_receive_window: i32,
    pub max_stream_receive_window: i32,
    pub init_conn_receive_window: i32,
    pub max_conn_receive_window: i32,
    /// Port expression: single port, ranges, or a comma list of both.
    pub server_ports: String,
    pub hop_interval: i32,
}

impl Default for Hysteria2Profile {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            auth: String::new(),
            obfs: String::new(),
            sni: String::new(),
            pin_sha256: String::new(),
            ca_text: String::new(),
            allow_insecure: false,
            upload_mbps: 0,
            download_mbps: 0,
            disable_mtu_discovery: false,
            init_stream_receive_window: 0,
            max_stream_receive_window: 0,
            init_conn_receive_window: 0,
            max_conn_receive_window: 0,
            server_ports: "1080".to_string(),
            hop_interval: 30,
        }
    }
}

impl ProfileRecord for Hysteria2Profile {
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
        w.write_str(&self.auth);
        w.write_str(&self.obfs);
        w.write_str(&self.sni);
        w.write_str(&self.pin_sha256);
        w.write_str(&self.ca_text);
        w.write_bool(self.allow_insecure);
        w.write_i32(self.upload_mbps);
        w.write_i32(self.download_mbps);
        w.write_bool(self.disable_mtu_discovery);
        w.write_i32(self.init_stream_receive_window);
        w.write_i32(self.max_stream_receive_window);
        w.write_i32(self.init_conn_receive_window);
        w.write_i32(self.max_conn_receive_window);
        w.write_str(&self.server_ports);
        w.write_i32(self.hop_interval);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.auth = r.read_str()?;
        self.obfs = r.read_str()?;
        self.sni = r.read_str()?;
        self.pin_sha256 = r.read_str()?;
        self.ca_text = r.read_str()?;
        self.allow_insecure = r.read_bool()?;
        self.upload_mbps = r.read_i32()?;
        self.download_mbps = r.read_i32()?;
        self.disable_mtu_discovery = r.read_bool()?;
        self.init_stream_receive_window = r.read_i32()?;
        self.max_stream_receive_window = r.read_i32()?;
        self.init_conn_receive_window = r.read_i32()?;
        self.max_conn_receive_window = r.read_i32()?;
        if version < 2 {
            self.server_ports = self.base.server_port.to_string();
        }
        if version >= 2 {
            self.server_ports = r.read_str()?;
            self.hop_interval = r.read_i32()?;
        }
        Ok(())
    }

    fn can_tcping(&self) -> bool {
        false
    }

    fn can_mapping(&self, flags: &FeatureFlags) -> bool {
        if is_ip_address(&self.base.server_address) && self.sni.trim().is_empty() {
            return false;
        }
        if !flags.hysteria_port_hopping {
            return true;
        }
        !is_valid_hysteria_multi_port(&self.server_ports)
    }

    fn display_address(&self) -> String {
        if is_ipv6_address(&self.base.server_address) {
            format!("[{}]:{}", self.base.server_address, self.server_ports)
        } else {
            format!("{}:{}", self.base.server_address, self.server_ports)
        }
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        if self.allow_insecure {
            dest.allow_insecure = true;
        }
        dest.upload_mbps = self.upload_mbps;
        dest.download_mbps = self.download_mbps;
        dest.disable_mtu_discovery = self.disable_mtu_discovery;
        dest.ca_text = self.ca_text.clone();
        dest.hop_interval = self.hop_interval;
        dest.init_conn_receive_window = self.init_conn_receive_window;
        dest.init_stream_receive_window = self.init_stream_receive_window;
        dest.max_conn_receive_window = self.max_conn_receive_window;
        dest.max_stream_receive_window = self.max_stream_receive_window;
    }
}
