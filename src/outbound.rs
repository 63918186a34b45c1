//! Engine outbound document
//!
//! The JSON shapes the external proxy engine consumes, one struct per
//! outbound type this crate's records can produce. All fields are optional
//! and omitted from serialization when unset, so a generated outbound only
//! contains what its discriminator actually selected.

use serde::{Deserialize, Serialize};

use crate::outbound::shared::{OutboundMultiplex, OutboundTlsConfig, V2RayTransport};
use crate::outbound::util::{is_false, is_zero_u32};

pub mod shared;
pub mod util;

// ============================================================================
// Outbound Enum
// ============================================================================

/// Outbound configuration enum
///
/// Represents the outbound types the engine accepts from this crate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outbound {
    /// Shadowsocks outbound
    Shadowsocks(ShadowsocksOutbound),
    /// VMess outbound
    #[serde(rename = "vmess")]
    VMess(VMessOutbound),
    /// VLESS outbound
    #[serde(rename = "vless")]
    VLess(VLessOutbound),
    /// Trojan outbound
    Trojan(TrojanOutbound),
    /// TUIC outbound
    #[serde(rename = "tuic")]
    Tuic(TuicOutbound),
    /// Hysteria2 outbound
    Hysteria2(Hysteria2Outbound),
    /// ShadowTLS outbound
    #[serde(rename = "shadowtls")]
    ShadowTls(ShadowTlsOutbound),
    /// NaiveProxy outbound
    Naive(NaiveOutbound),
}

impl Outbound {
    /// Tag of the outbound, if set.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Outbound::Shadowsocks(o) => o.tag.as_deref(),
            Outbound::VMess(o) => o.tag.as_deref(),
            Outbound::VLess(o) => o.tag.as_deref(),
            Outbound::Trojan(o) => o.tag.as_deref(),
            Outbound::Tuic(o) => o.tag.as_deref(),
            Outbound::Hysteria2(o) => o.tag.as_deref(),
            Outbound::ShadowTls(o) => o.tag.as_deref(),
            Outbound::Naive(o) => o.tag.as_deref(),
        }
    }
}

// ============================================================================
// Outbound Types
// ============================================================================

/// Shadowsocks outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShadowsocksOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// Encryption method (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Password (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// SIP003 plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,

    /// SIP003 plugin options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_opts: Option<String>,

    /// Multiplex configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplex: Option<OutboundMultiplex>,
}

/// VMess outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VMessOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// VMess user UUID (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Security: auto, none, zero, aes-128-gcm, chacha20-poly1305
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,

    /// Alter ID (0 = AEAD, 1 = legacy)
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub alter_id: u32,

    /// Enable authenticated length
    #[serde(default, skip_serializing_if = "is_false")]
    pub authenticated_length: bool,

    /// UDP packet encoding: packetaddr, xudp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_encoding: Option<String>,

    /// TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,

    /// Multiplex configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplex: Option<OutboundMultiplex>,

    /// V2Ray transport configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

/// VLESS outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VLessOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// VLESS user UUID (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Flow control mode, e.g. xtls-rprx-vision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    /// UDP packet encoding: packetaddr, xudp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_encoding: Option<String>,

    /// TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,

    /// Multiplex configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplex: Option<OutboundMultiplex>,

    /// V2Ray transport configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

/// Trojan outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TrojanOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// Trojan password (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,

    /// Multiplex configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplex: Option<OutboundMultiplex>,

    /// V2Ray transport configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

/// TUIC outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TuicOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// TUIC UUID (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// TUIC password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Congestion control: cubic, new_reno, bbr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion_control: Option<String>,

    /// UDP relay mode: native, quic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay_mode: Option<String>,

    /// Zero RTT handshake
    #[serde(default, skip_serializing_if = "is_false")]
    pub zero_rtt_handshake: bool,

    /// TLS configuration (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,
}

/// Hysteria2 outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Hysteria2Outbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// Server port range list, `start:end` entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server_ports: Vec<String>,

    /// Port hopping interval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hop_interval: Option<String>,

    /// Upload bandwidth in Mbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_mbps: Option<u32>,

    /// Download bandwidth in Mbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_mbps: Option<u32>,

    /// Obfuscation configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs: Option<Hysteria2Obfs>,

    /// Authentication password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// TLS configuration (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,
}

/// Hysteria2 obfuscation configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Hysteria2Obfs {
    /// Obfuscation type (only "salamander")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub obfs_type: Option<String>,

    /// Obfuscation password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// ShadowTLS outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShadowTlsOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// ShadowTLS protocol version: 1, 2, or 3 (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,

    /// ShadowTLS password (for v2/v3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,
}

/// NaiveProxy outbound configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NaiveOutbound {
    /// Tag of the outbound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Server address (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Server port (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,

    /// Username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Enabled network: tcp or udp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTlsConfig>,
}
