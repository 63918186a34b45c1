//! VLESS profile record.

use crate::profile::base::BaseProfile;
use crate::profile::standard::{StandardTransport, StreamExtra, StreamExtraMut};
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct VlessProfile {
    pub stream: StandardTransport,
    /// XTLS flow control mode, e.g. `xtls-rprx-vision`.
    pub flow: String,
}

impl ProfileRecord for VlessProfile {
    fn base(&self) -> &BaseProfile {
        &self.stream.base
    }

    fn base_mut(&mut self) -> &mut BaseProfile {
        &mut self.stream.base
    }

    fn apply_defaults(&mut self) {
        self.stream.apply_defaults();
        if self.stream.encryption.trim().is_empty() {
            self.stream.encryption = "none".to_string();
        }
    }

    fn serialize(&self, w: &mut RecordWriter) {
        self.stream
            .serialize_with(w, StreamExtra::Vless { flow: &self.flow });
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        self.stream
            .deserialize_with(r, StreamExtraMut::Vless { flow: &mut self.flow })
    }

    fn can_tcping(&self) -> bool {
        self.stream.stream_can_tcping()
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        self.stream.merge_features(&mut dest.stream);
        // The -udp443 suffix opts the destination into proxying QUIC 443;
        // keep it when the destination already uses some flow of its own.
        if self.flow.ends_with("-udp443")
            && !dest.flow.trim().is_empty()
            && !dest.flow.ends_with("-udp443")
        {
            dest.flow = self.flow.clone();
        }
    }
}
