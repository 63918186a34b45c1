//! VMess profile record.
//!
//! Shares the standard transport layout; its own fields ride in the
//! variant slot between the security section and the packet-encoding tail.

use crate::profile::base::BaseProfile;
use crate::profile::standard::{StandardTransport, StreamExtra, StreamExtraMut};
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct VmessProfile {
    pub stream: StandardTransport,
    pub alter_id: i32,
    pub authenticated_length: bool,
    pub no_termination_signal: bool,
}

impl ProfileRecord for VmessProfile {
    fn base(&self) -> &BaseProfile {
        &self.stream.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.stream.base
    }

    fn apply_defaults(&mut self) {
        self.stream.apply_defaults();
        if self.stream.encryption.trim().is_empty() {
            self.stream.encryption = "auto".to_string();
        }
    }

    fn serialize(&self, w: &mut RecordWriter) {
        self.stream.serialize_with(
            w,
            StreamExtra::Vmess {
                alter_id: self.alter_id,
                authenticated_length: self.authenticated_length,
                no_termination_signal: self.no_termination_signal,
            },
        );
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        self.stream.deserialize_with(
            r,
            StreamExtraMut::Vmess {
                alter_id: &mut self.alter_id,
                authenticated_length: &mut self.authenticated_length,
                no_termination_signal: &mut self.no_termination_signal,
            },
        )
    }

    fn can_tcping(&self) -> bool {
        self.stream.stream_can_tcping()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        self.stream.merge_features(&mut dest.stream);
    }
}
