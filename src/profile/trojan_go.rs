//! Trojan-Go profile record.
//!
//! Keeps its own flat layout rather than the shared transport schema; the
//! only transport discriminator it knows is `ws`.

use crate::net::is_ip_address;
use crate::profile::base::BaseProfile;
use crate::profile::{FeatureFlags, ProfileRecord};
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 4;

#[derive(Debug, PartialEq, Eq)]
pub struct TrojanGoProfile {
    pub base: BaseProfile,
    pub password: String,
    pub sni: String,
    /// `none` or `ws`.
    pub transport: String,
    pub host: String,
    pub path: String,
    /// `none` or an `ss;method:password` shadowsocks layer.
    pub encryption: String,
    pub plugin: String,
    pub allow_insecure: bool,
    pub utls_fingerprint: String,
    pub mux: bool,
    pub mux_concurrency: i32,
}

impl Default for TrojanGoProfile {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            password: String::new(),
            sni: String::new(),
            transport: "none".to_string(),
            host: String::new(),
            path: String::new(),
            encryption: "none".to_string(),
            plugin: String::new(),
            allow_insecure: false,
            utls_fingerprint: String::new(),
            mux: false,
            mux_concurrency: 8,
        }
    }
}

impl ProfileRecord for TrojanGoProfile {
    fn base(&self) -> &BaseProfile {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.base
    }

    fn apply_defaults(&mut self) {
        self.base.apply_defaults();
        if self.transport.trim().is_empty() {
            self.transport = "none".to_string();
        }
        if self.encryption.trim().is_empty() {
            self.encryption = "none".to_string();
        }
    }

    fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(VERSION);
        self.base.serialize(w);
        w.write_str(&self.password);
        w.write_str(&self.sni);
        w.write_str(&self.transport);
        if self.transport == "ws" {
            w.write_str(&self.host);
            w.write_str(&self.path);
        }
        w.write_str(&self.encryption);
        w.write_str(&self.plugin);
        w.write_bool(self.allow_insecure);
        w.write_str(&self.utls_fingerprint);
        w.write_bool(self.mux);
        w.write_i32(self.mux_concurrency);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.password = r.read_str()?;
        self.sni = r.read_str()?;
        self.transport = r.read_str()?;
        if self.transport == "ws" {
            self.host = r.read_str()?;
            self.path = r.read_str()?;
        }
        self.encryption = r.read_str()?;
        if version <= 2 && self.encryption.starts_with("ss;") {
            // Records written before the method list was normalized stored
            // the cipher in arbitrary case; lower it the way the old reader
            // did, off-by-one bound included, so stored profiles keep their
            // historical value.
            if let Some(colon) = self.encryption.find(':')
                && let Some(method) = self.encryption.get("ss;".len()..colon - 1)
                && let Some(pass) = self.encryption.get(colon + 1..)
            {
                self.encryption = format!("ss;{}:{}", method.to_lowercase(), pass);
            }
        }
        self.plugin = r.read_str()?;
        if version >= 1 {
            self.allow_insecure = r.read_bool()?;
        }
        if version >= 2 {
            self.utls_fingerprint = r.read_str()?;
        }
        if version >= 4 {
            self.mux = r.read_bool()?;
            self.mux_concurrency = r.read_i32()?;
        }
        Ok(())
    }

    fn can_mapping(&self, _flags: &FeatureFlags) -> bool {
        !is_ip_address(&self.base.server_address) || !self.sni.trim().is_empty()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        if self.allow_insecure {
            dest.allow_insecure = true;
        }
        dest.mux = self.mux;
        dest.mux_concurrency = self.mux_concurrency;
        dest.utls_fingerprint = self.utls_fingerprint.clone();
    }
}
