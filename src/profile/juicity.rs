//! Juicity profile record.

use crate::profile::base::BaseProfile;
use crate::profile::ProfileRecord;
use crate::wire::{RecordReader, RecordWriter, WireError};

const VERSION: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
pub struct JuicityProfile {
    pub base: BaseProfile,
    pub uuid: String,
    pub password: String,
    pub sni: String,
    pub allow_insecure: bool,
    pub congestion_control: String,
    pub pinned_certchain_sha256: String,
}

impl Default for JuicityProfile {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            uuid: String::new(),
            password: String::new(),
            sni: String::new(),
            allow_insecure: false,
            congestion_control: "bbr".to_string(),
            pinned_certchain_sha256: String::new(),
        }
    }
}

impl ProfileRecord for JuicityProfile {
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
        w.write_str(&self.uuid);
        w.write_str(&self.password);
        w.write_str(&self.sni);
        w.write_bool(self.allow_insecure);
        w.write_str(&self.congestion_control);
        w.write_str(&self.pinned_certchain_sha256);
    }

    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;
        self.uuid = r.read_str()?;
        self.password = r.read_str()?;
        self.sni = r.read_str()?;
        self.allow_insecure = r.read_bool()?;
        self.congestion_control = r.read_str()?;
        if version >= 2 {
            self.pinned_certchain_sha256 = r.read_str()?;
        }
        Ok(())
    }

    fn can_tcping(&self) -> bool {
        false
    }

    fn apply_feature_settings(&self, dest: &mut Self) {
        if self.allow_insecure {
            dest.allow_insecure = true;
        }
    }
}
