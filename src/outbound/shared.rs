//! Shared engine document types: TLS, transports and multiplex settings
//! referenced by several outbound types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::outbound::util::{is_false, is_zero_u32};

// ============================================================================
// TLS
// ============================================================================

/// Outbound TLS configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OutboundTlsConfig {
    /// Enable TLS
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Do not send server name in ClientHello
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_sni: bool,

    /// Server name for verification and SNI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    /// Accept any server certificate (insecure)
    #[serde(default, skip_serializing_if = "is_false")]
    pub insecure: bool,

    /// List of supported ALPN protocols
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,

    /// Server certificate in PEM format (for pinning)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,

    /// SHA-256 hashes of pinned server certificate chains
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificate_public_key_sha256: Vec<String>,

    /// ECH (Encrypted Client Hello) configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ech: Option<OutboundEchConfig>,

    /// uTLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utls: Option<UtlsConfig>,

    /// Reality configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality: Option<OutboundRealityConfig>,
}

/// ECH configuration for outbound TLS
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OutboundEchConfig {
    /// Enable ECH
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// ECH configuration in PEM format
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<String>,

    /// Override domain for ECH HTTPS record queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_server_name: Option<String>,
}

/// uTLS configuration for TLS fingerprint resistance.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UtlsConfig {
    /// Enable uTLS
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Fingerprint to mimic: chrome, firefox, edge, safari, ios, random
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Reality configuration for outbound TLS
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OutboundRealityConfig {
    /// Enable Reality
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Server public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Short ID (hex string, 0-8 digits)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}

// ============================================================================
// Multiplex
// ============================================================================

/// Multiplex configuration for outbound
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OutboundMultiplex {
    /// Enable multiplex
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Multiplex protocol: smux, yamux, h2mux
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Maximum streams per connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_streams: Option<u32>,

    /// Enable padding
    #[serde(default, skip_serializing_if = "is_false")]
    pub padding: bool,
}

// ============================================================================
// V2Ray transports
// ============================================================================

/// V2Ray transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum V2RayTransport {
    /// HTTP transport
    Http(HttpTransport),
    /// WebSocket transport
    #[serde(rename = "ws")]
    WebSocket(WebSocketTransport),
    /// QUIC transport
    Quic(QuicTransport),
    /// gRPC transport
    #[serde(rename = "grpc")]
    Grpc(GrpcTransport),
    /// HTTPUpgrade transport
    #[serde(rename = "httpupgrade")]
    HttpUpgrade(HttpUpgradeTransport),
}

/// HTTP transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HttpTransport {
    /// Host domains
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,

    /// HTTP request path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// WebSocket transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WebSocketTransport {
    /// HTTP request path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Extra headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Max early data size
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub max_early_data: u32,

    /// Early data header name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_data_header_name: Option<String>,
}

/// QUIC transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct QuicTransport {}

/// gRPC transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GrpcTransport {
    /// gRPC service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

/// HTTPUpgrade transport configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HttpUpgradeTransport {
    /// Host domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// HTTP request path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tls_serializes_empty() {
        let tls = OutboundTlsConfig::default();
        assert_eq!(serde_json::to_string(&tls).unwrap(), "{}");
    }

    #[test]
    fn test_transport_tagging() {
        let transport = V2RayTransport::WebSocket(WebSocketTransport {
            path: Some("/ws".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_string(&transport).unwrap();
        assert!(json.contains(r#""type":"ws""#));
        assert!(json.contains(r#""path":"/ws""#));
    }

    #[test]
    fn test_grpc_transport_tagging() {
        let transport = V2RayTransport::Grpc(GrpcTransport {
            service_name: Some("Tun".to_string()),
        });
        let json = serde_json::to_string(&transport).unwrap();
        assert!(json.contains(r#""type":"grpc""#));
        assert!(json.contains(r#""service_name":"Tun""#));
    }

    #[test]
    fn test_reality_roundtrip() {
        let tls = OutboundTlsConfig {
            enabled: true,
            server_name: Some("apple.com".to_string()),
            reality: Some(OutboundRealityConfig {
                enabled: true,
                public_key: Some("pk".to_string()),
                short_id: Some("01ab".to_string()),
            }),
            utls: Some(UtlsConfig {
                enabled: true,
                fingerprint: Some("chrome".to_string()),
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&tls).unwrap();
        let parsed: OutboundTlsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tls);
    }
}
