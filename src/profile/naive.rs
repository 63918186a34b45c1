//! NaiveProxy profile record.

use crate::net::is_ip_address;
use crate::profile::base::BaseProfile;
use crate::profile::{FeatureFlags, ProfileRecord};
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 5;

#[derive(Debug, PartialEq, Eq)]
pub struct NaiveProfile {
    pub base: BaseProfile,
    /// `https` or `quic`.
    pub proto: String,
    pub username: String,
    pub password: String,
    /// Newline-separated `Name: value` pairs sent with the CONNECT request.
    pub extra_headers: String,
    pub insecure_concurrency: i32,
    pub no_post_quantum: bool,
    pub sni: String,
}

impl Default for NaiveProfile {
    fn default() -> Self {
        Self {
            base: BaseProfile {
                server_port: 443,
                ..Default::default()
            },
            proto: "https".to_string(),
            username: String::new(),
            password: String::new(),
            extra_headers: String::new(),
            insecure_concurrency: 0,
            no_post_quantum: false,
            sni: String::new(),
        }
    }
}

impl ProfileRecord for NaiveProfile {
    fn base(&self) -> &BaseProfile {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.base
    }

    fn apply_defaults(&mut self) {
        self.base.apply_defaults();
        if self.proto.trim().is_empty() {
            self.proto = "https".to_string();
        }
    }

    fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(VERSION);
        self.base.serialize(w);
        w.write_str(&self.proto);
        w.write_str(&self.username);
        w.write_str(&self.password);
        w.write_str(&self.extra_headers);
        w.write_i32(self.insecure_concurrency);
        w.write_bool(self.no_post_quantum);
        w.write_str(&self.sni);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.proto = r.read_str()?;
        self.username = r.read_str()?;
        self.password = r.read_str()?;
        self.extra_headers = r.read_str()?;
        if version >= 1 {
            self.insecure_concurrency = r.read_i32()?;
        }
        if version == 2 {
            r.read_bool()?; // uot, removed
        }
        if version >= 4 {
            self.no_post_quantum = r.read_bool()?;
        }
        if version >= 5 {
            self.sni = r.read_str()?;
        }
        Ok(())
    }

    fn network(&self) -> &'static str {
        "tcp"
    }

    fn can_tcping(&self) -> bool {
        self.proto != "quic"
    }

    fn can_mapping(&self, _flags: &FeatureFlags) -> bool {
        !is_ip_address(&self.base.server_address) || !self.sni.trim().is_empty()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        dest.no_post_quantum = self.no_post_quantum;
    }
}
