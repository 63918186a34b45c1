//! Mieru profile record.

use crate::profile::base::BaseProfile;
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 1;

pub const PROTOCOL_TCP: i32 = 0;
pub const PROTOCOL_UDP: i32 = 1;

pub const MULTIPLEXING_OFF: i32 = 1;
pub const MULTIPLEXING_LOW: i32 = 0;
pub const MULTIPLEXING_MIDDLE: i32 = 2;
pub const MULTIPLEXING_HIGH: i32 = 3;

#[derive(Debug, PartialEq, Eq)]
pub struct MieruProfile {
    pub base: BaseProfile,
    /// [`PROTOCOL_TCP`] or [`PROTOCOL_UDP`]; MTU is only meaningful (and
    /// only on the wire) for UDP.
    pub protocol: i32,
    pub username: String,
    pub password: String,
    pub mtu: i32,
    pub mux_level: i32,
}

impl Default for MieruProfile {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            protocol: PROTOCOL_TCP,
            username: String::new(),
            password: String::new(),
            mtu: 1400,
            mux_level: MULTIPLEXING_LOW,
        }
    }
}

impl ProfileRecord for MieruProfile {
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
        w.write_i32(self.protocol);
        w.write_str(&self.username);
        w.write_str(&self.password);
        if self.protocol == PROTOCOL_UDP {
            w.write_i32(self.mtu);
        }
        w.write_i32(self.mux_level);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.protocol = r.read_i32()?;
        self.username = r.read_str()?;
        self.password = r.read_str()?;
        if self.protocol == PROTOCOL_UDP {
            self.mtu = r.read_i32()?;
        }
        if version >= 1 {
            self.mux_level = r.read_i32()?;
        }
        Ok(())
    }
}
