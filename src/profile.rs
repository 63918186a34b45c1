//! Proxy profile records
//!
//! One module per protocol. Every record owns its user-entered connection
//! parameters, knows its canonical defaults, and serializes itself to the
//! versioned binary layout in [`crate::wire`]. Decoding accepts every
//! historical version of a record's layout and always produces a
//! fully-defaulted, current-shape record.

use tracing::trace;

use crate::net::join_host_port;
use crate::wire::{RecordReader, RecordWriter, WireError};

pub mod base;
pub mod brook;
pub mod hysteria2;
pub mod juicity;
pub mod mieru;
pub mod naive;
pub mod shadowsocks;
pub mod shadowtls;
pub mod standard;
pub mod trojan;
pub mod trojan_go;
pub mod tuic;
pub mod tuic5;
pub mod vless;
pub mod vmess;

pub use base::BaseProfile;
pub use brook::BrookProfile;
pub use hysteria2::Hysteria2Profile;
pub use juicity::JuicityProfile;
pub use mieru::MieruProfile;
pub use naive::NaiveProfile;
pub use shadowsocks::ShadowsocksProfile;
pub use shadowtls::ShadowTlsProfile;
pub use standard::StandardTransport;
pub use trojan::TrojanProfile;
pub use trojan_go::TrojanGoProfile;
pub use tuic::TuicProfile;
pub use tuic5::Tuic5Profile;
pub use vless::VlessProfile;
pub use vmess::VmessProfile;

// ============================================================================
// Feature flags
// ============================================================================

/// Application-level preferences some predicates depend on.
///
/// Passed in explicitly so records never read ambient settings state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFlags {
    /// Whether the user enabled Hysteria port hopping.
    pub hysteria_port_hopping: bool,
}

// ============================================================================
// Record trait
// ============================================================================

/// Common contract of every profile record.
///
/// `Default` yields a record with every field at its canonical default, so a
/// decoder branch that never reaches a field leaves the canonical default in
/// place. [`ProfileRecord::apply_defaults`] then normalizes the handful of
/// fields where a blank value also means "unset" (discriminators, method
/// names and the like).
pub trait ProfileRecord: Default {
    /// Base fields shared by every variant.
    fn base(&self) -> &BaseProfile;
    fn base_mut(&mut self) -> &mut BaseProfile;

    /// Normalizes unset fields to their canonical defaults.
    fn apply_defaults(&mut self);

    /// Writes the current layout at the current schema version.
    ///
    /// There is no "encode as old version" mode; historical layouts exist
    /// only on the decode side.
    fn serialize(&self, w: &mut RecordWriter);

    /// Reads any historical layout into the current shape.
    fn deserialize(&mut self, r: &mut RecordReader) -> Result<(), WireError>;

    /// Serializes the record to its storage blob.
    fn encode(&self) -> Vec<u8> {
        let mut w = RecordWriter::new();
        self.serialize(&mut w);
        w.into_bytes()
    }

    /// Decodes a storage blob of any supported version and fills defaults
    /// for every field the source version did not carry.
    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut record = Self::default();
        let mut r = RecordReader::new(bytes);
        record.deserialize(&mut r)?;
        record.apply_defaults();
        Ok(record)
    }

    /// Applies defaults in place and returns the record, for builder-style
    /// construction.
    fn defaulted(mut self) -> Self {
        self.apply_defaults();
        self
    }

    /// Duplicates the record through the codec, guaranteeing the copy shares
    /// no storage with the original.
    fn deep_clone(&self) -> Self {
        Self::decode(&self.encode()).expect("a freshly encoded record always decodes")
    }

    /// Whether latency can be probed with a plain TCP connect.
    fn can_tcping(&self) -> bool {
        true
    }

    /// Whether remote port mapping is meaningful for this configuration.
    fn can_mapping(&self, flags: &FeatureFlags) -> bool {
        let _ = flags;
        true
    }

    /// Networks the protocol carries.
    fn network(&self) -> &'static str {
        "tcp,udp"
    }

    /// Address string shown in profile lists.
    fn display_address(&self) -> String {
        join_host_port(&self.base().server_address, self.base().server_port)
    }

    /// One-way merge of the variant's shareable settings into `dest`.
    ///
    /// Only an allow-listed subset of fields is touched. Safety flags such
    /// as `allow_insecure` use OR semantics: a `true` source forces the
    /// destination to `true`, a `false` source never clears it.
    fn apply_feature_settings(&self, dest: &mut Self) {
        let _ = dest;
    }
}

// ============================================================================
// Kind registry
// ============================================================================

/// Stable numeric ids the storage layer files record blobs under.
///
/// These come from the settings database schema and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Shadowsocks,
    Vmess,
    Vless,
    Trojan,
    TrojanGo,
    Naive,
    Brook,
    Mieru,
    Tuic,
    Hysteria2,
    Tuic5,
    ShadowTls,
    Juicity,
}

impl ProfileKind {
    pub fn id(self) -> i32 {
        match self {
            ProfileKind::Shadowsocks => 2,
            ProfileKind::Vmess => 4,
            ProfileKind::Vless => 5,
            ProfileKind::Trojan => 6,
            ProfileKind::TrojanGo => 7,
            ProfileKind::Naive => 9,
            ProfileKind::Brook => 12,
            ProfileKind::Mieru => 19,
            ProfileKind::Tuic => 20,
            ProfileKind::Hysteria2 => 21,
            ProfileKind::Tuic5 => 23,
            ProfileKind::ShadowTls => 24,
            ProfileKind::Juicity => 25,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Some(match id {
            2 => ProfileKind::Shadowsocks,
            4 => ProfileKind::Vmess,
            5 => ProfileKind::Vless,
            6 => ProfileKind::Trojan,
            7 => ProfileKind::TrojanGo,
            9 => ProfileKind::Naive,
            12 => ProfileKind::Brook,
            19 => ProfileKind::Mieru,
            20 => ProfileKind::Tuic,
            21 => ProfileKind::Hysteria2,
            23 => ProfileKind::Tuic5,
            24 => ProfileKind::ShadowTls,
            25 => ProfileKind::Juicity,
            _ => return None,
        })
    }
}

// ============================================================================
// Closed profile set
// ============================================================================

/// A record of any supported variant, for callers that route opaque blobs.
#[derive(Debug, PartialEq)]
pub enum Profile {
    Shadowsocks(ShadowsocksProfile),
    Vmess(VmessProfile),
    Vless(VlessProfile),
    Trojan(TrojanProfile),
    TrojanGo(TrojanGoProfile),
    Naive(NaiveProfile),
    Brook(BrookProfile),
    Mieru(MieruProfile),
    Tuic(TuicProfile),
    Hysteria2(Hysteria2Profile),
    Tuic5(Tuic5Profile),
    ShadowTls(ShadowTlsProfile),
    Juicity(JuicityProfile),
}

macro_rules! each_profile {
    ($self:expr, $p:pat => $body:expr) => {
        match $self {
            Profile::Shadowsocks($p) => $body,
            Profile::Vmess($p) => $body,
            Profile::Vless($p) => $body,
            Profile::Trojan($p) => $body,
            Profile::TrojanGo($p) => $body,
            Profile::Naive($p) => $body,
            Profile::Brook($p) => $body,
            Profile::Mieru($p) => $body,
            Profile::Tuic($p) => $body,
            Profile::Hysteria2($p) => $body,
            Profile::Tuic5($p) => $body,
            Profile::ShadowTls($p) => $body,
            Profile::Juicity($p) => $body,
        }
    };
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Shadowsocks(_) => ProfileKind::Shadowsocks,
            Profile::Vmess(_) => ProfileKind::Vmess,
            Profile::Vless(_) => ProfileKind::Vless,
            Profile::Trojan(_) => ProfileKind::Trojan,
            Profile::TrojanGo(_) => ProfileKind::TrojanGo,
            Profile::Naive(_) => ProfileKind::Naive,
            Profile::Brook(_) => ProfileKind::Brook,
            Profile::Mieru(_) => ProfileKind::Mieru,
            Profile::Tuic(_) => ProfileKind::Tuic,
            Profile::Hysteria2(_) => ProfileKind::Hysteria2,
            Profile::Tuic5(_) => ProfileKind::Tuic5,
            Profile::ShadowTls(_) => ProfileKind::ShadowTls,
            Profile::Juicity(_) => ProfileKind::Juicity,
        }
    }

    /// Decodes a storage blob filed under `kind`.
    pub fn decode(kind: ProfileKind, bytes: &[u8]) -> Result<Self, WireError> {
        trace!(kind = ?kind, len = bytes.len(), "decoding profile blob");
        Ok(match kind {
            ProfileKind::Shadowsocks => Profile::Shadowsocks(ShadowsocksProfile::decode(bytes)?),
            ProfileKind::Vmess => Profile::Vmess(VmessProfile::decode(bytes)?),
            ProfileKind::Vless => Profile::Vless(VlessProfile::decode(bytes)?),
            ProfileKind::Trojan => Profile::Trojan(TrojanProfile::decode(bytes)?),
            ProfileKind::TrojanGo => Profile::TrojanGo(TrojanGoProfile::decode(bytes)?),
            ProfileKind::Naive => Profile::Naive(NaiveProfile::decode(bytes)?),
            ProfileKind::Brook => Profile::Brook(BrookProfile::decode(bytes)?),
            ProfileKind::Mieru => Profile::Mieru(MieruProfile::decode(bytes)?),
            ProfileKind::Tuic => Profile::Tuic(TuicProfile::decode(bytes)?),
            ProfileKind::Hysteria2 => Profile::Hysteria2(Hysteria2Profile::decode(bytes)?),
            ProfileKind::Tuic5 => Profile::Tuic5(Tuic5Profile::decode(bytes)?),
            ProfileKind::ShadowTls => Profile::ShadowTls(ShadowTlsProfile::decode(bytes)?),
            ProfileKind::Juicity => Profile::Juicity(JuicityProfile::decode(bytes)?),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        each_profile!(self, p => p.encode())
    }

    pub fn apply_defaults(&mut self) {
        each_profile!(self, p => p.apply_defaults());
    }

    pub fn base(&self) -> &BaseProfile {
        each_profile!(self, p => p.base())
    }

    pub fn base_mut(&mut self) -> &mut BaseProfile {
        each_profile!(self, p => p.base_mut())
    }

    pub fn can_tcping(&self) -> bool {
        each_profile!(self, p => p.can_tcping())
    }

    pub fn can_mapping(&self, flags: &FeatureFlags) -> bool {
        each_profile!(self, p => p.can_mapping(flags))
    }

    pub fn network(&self) -> &'static str {
        each_profile!(self, p => p.network())
    }

    pub fn display_address(&self) -> String {
        each_profile!(self, p => p.display_address())
    }
}
