//! Trojan profile record.
//!
//! Version 2 moved Trojan onto the shared transport layout; versions 0 and 1
//! predate that refactor and stored a flat address/password/TLS tuple which
//! the decoder still accepts.

use crate::profile::base::BaseProfile;
use crate::profile::standard::{StandardTransport, StreamExtra, StreamExtraMut};
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 2;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TrojanProfile {
    pub stream: StandardTransport,
    pub password: String,
}

impl ProfileRecord for TrojanProfile {
    fn base(&self) -> &BaseProfile {
        &self.stream.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.stream.base
    }

    fn apply_defaults(&mut self) {
        self.stream.apply_defaults();
    }

    fn serialize(&self, w: &mut RecordWriter) {
        w.write_i32(VERSION);
        self.stream.serialize_with(w, StreamExtra::None);
        w.write_str(&self.password);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        if version >= 2 {
            self.stream.deserialize_with(r, StreamExtraMut::None)?;
            self.password = r.read_str()?;
        } else {
            // flat pre-refactor layout
            self.stream.base.server_address = r.read_str()?;
            self.stream.base.server_port = r.read_i32()? as u16;
            self.password = r.read_str()?;
            self.stream.security = r.read_str()?;
            self.stream.sni = r.read_str()?;
            self.stream.alpn = r.read_str()?;
            if version == 1 {
                if self.stream.security == "tls" {
                    self.stream.allow_insecure = r.read_bool()?;
                } else {
                    // xtls, removed
                    self.stream.security = "tls".to_string();
                    r.read_str()?; // flow, removed
                }
            }
        }
        Ok(())
    }

    fn can_tcping(&self) -> bool {
        self.stream.stream_can_tcping()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        self.stream.merge_features(&mut dest.stream);
    }
}
