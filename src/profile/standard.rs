//! Shared transport/TLS/mux schema embedded by the VMess, VLESS, Trojan and
//! Shadowsocks records.
//!
//! This is the oldest and most-evolved layout in the store. The decoder
//! carries every historical branch since version 0; writers that fell
//! through neighbouring discriminator cases before version 16 (and the
//! removed `xtls` security type) are reproduced as explicit `*_chain`
//! helpers so the branch table stays auditable. New fields get a plain
//! `version >= N` guard and nothing else.

use tracing::debug;

use crate::net::list_by_line_or_comma;
use crate::profile::base::BaseProfile;
use crate::wire::{RecordReader, RecordWriter, WireError};

/// Current schema version of the shared layout.
pub const STANDARD_VERSION: i32 = 22;

/// Variant-specific fields spliced into the shared layout between the
/// security section and the packet-encoding tail.
pub(crate) enum StreamExtra<'a> {
    None,
    Vmess {
        alter_id: i32,
        authenticated_length: bool,
        no_termination_signal: bool,
    },
    Vless {
        flow: &'a str,
    },
}

pub(crate) enum StreamExtraMut<'a> {
    None,
    Vmess {
        alter_id: &'a mut i32,
        authenticated_length: &'a mut bool,
        no_termination_signal: &'a mut bool,
    },
    Vless {
        flow: &'a mut String,
    },
}

/// Transport, TLS and multiplex settings shared by the V2Ray-style records.
///
/// `transport` and `security` are discriminators: their values decide which
/// of the remaining fields exist on the wire.
#[derive(Debug, PartialEq, Eq)]
pub struct StandardTransport {
    pub base: BaseProfile,

    pub uuid: String,
    pub encryption: String,

    /// Transport discriminator: tcp, kcp, ws, http, httpupgrade, splithttp,
    /// quic, grpc, meek, hysteria2, mekya.
    pub transport: String,
    pub host: String,
    pub path: String,
    pub header_type: String,
    pub kcp_seed: String,
    pub quic_security: String,
    pub quic_key: String,
    pub grpc_service_name: String,
    pub ws_max_early_data: i32,
    pub early_data_header_name: String,
    pub ws_use_browser_forwarder: bool,
    pub sh_use_browser_forwarder: bool,
    pub meek_url: String,
    pub hy2_down_mbps: i32,
    pub hy2_up_mbps: i32,
    pub hy2_password: String,
    pub hy2_obfs_password: String,
    pub mekya_kcp_seed: String,
    pub mekya_kcp_header_type: String,
    pub mekya_url: String,

    /// Security discriminator: none, tls, reality.
    pub security: String,
    pub sni: String,
    pub alpn: String,
    pub certificates: String,
    pub pinned_peer_certificate_chain_sha256: String,
    pub allow_insecure: bool,
    pub utls_fingerprint: String,
    pub ech_config: String,
    pub ech_doh_server: String,
    pub reality_public_key: String,
    pub reality_short_id: String,
    pub reality_spider_x: String,
    pub reality_fingerprint: String,

    pub packet_encoding: String,
    pub mux: bool,
    pub mux_concurrency: i32,
    pub mux_packet_encoding: String,
}

impl Default for StandardTransport {
    fn default() -> Self {
        Self {
            base: BaseProfile::default(),
            uuid: String::new(),
            encryption: String::new(),
            transport: "tcp".to_string(),
            host: String::new(),
            path: String::new(),
            header_type: "none".to_string(),
            kcp_seed: String::new(),
            quic_security: "none".to_string(),
            quic_key: String::new(),
            grpc_service_name: String::new(),
            ws_max_early_data: 0,
            early_data_header_name: String::new(),
            ws_use_browser_forwarder: false,
            sh_use_browser_forwarder: false,
            meek_url: String::new(),
            hy2_down_mbps: 0,
            hy2_up_mbps: 0,
            hy2_password: String::new(),
            hy2_obfs_password: String::new(),
            mekya_kcp_seed: String::new(),
            mekya_kcp_header_type: "none".to_string(),
            mekya_url: String::new(),
            security: "none".to_string(),
            sni: String::new(),
            alpn: String::new(),
            certificates: String::new(),
            pinned_peer_certificate_chain_sha256: String::new(),
            allow_insecure: false,
            utls_fingerprint: String::new(),
            ech_config: String::new(),
            ech_doh_server: String::new(),
            reality_public_key: String::new(),
            reality_short_id: String::new(),
            reality_spider_x: String::new(),
            reality_fingerprint: "chrome".to_string(),
            packet_encoding: "none".to_string(),
            mux: false,
            mux_concurrency: 8,
            mux_packet_encoding: "none".to_string(),
        }
    }
}

fn default_if_blank(field: &mut String, default: &str) {
    if field.trim().is_empty() {
        *field = default.to_string();
    }
}

impl StandardTransport {
    pub(crate) fn apply_defaults(&mut self) {
        self.base.apply_defaults();

        default_if_blank(&mut self.transport, "tcp");
        if self.transport == "h2" {
            // renamed alias kept for records written by old importers
            self.transport = "http".to_string();
        }
        default_if_blank(&mut self.header_type, "none");
        default_if_blank(&mut self.quic_security, "none");
        default_if_blank(&mut self.mekya_kcp_header_type, "none");
        default_if_blank(&mut self.security, "none");
        default_if_blank(&mut self.packet_encoding, "none");
        default_if_blank(&mut self.reality_fingerprint, "chrome");
        default_if_blank(&mut self.mux_packet_encoding, "none");
    }

    // ------------------------------------------------------------------
    // Encode
    // ------------------------------------------------------------------

    pub(crate) fn serialize_with(&self, w: &mut RecordWriter, extra: StreamExtra<'_>) {
        w.write_i32(STANDARD_VERSION);
        self.base.serialize(w);

        w.write_str(&self.uuid);
        w.write_str(&self.encryption);
        w.write_str(&self.transport);

        match self.transport.as_str() {
            "tcp" => {
                w.write_str(&self.header_type);
                w.write_str(&self.host);
                w.write_str(&self.path);
            }
            "kcp" => {
                w.write_str(&self.header_type);
                w.write_str(&self.kcp_seed);
            }
            "ws" => {
                w.write_str(&self.host);
                w.write_str(&self.path);
                w.write_i32(self.ws_max_early_data);
                w.write_bool(self.ws_use_browser_forwarder);
                w.write_str(&self.early_data_header_name);
            }
            "http" | "httpupgrade" => {
                w.write_str(&self.host);
                w.write_str(&self.path);
            }
            "splithttp" => {
                w.write_str(&self.host);
                w.write_str(&self.path);
                w.write_bool(self.sh_use_browser_forwarder);
            }
            "quic" => {
                w.write_str(&self.header_type);
                w.write_str(&self.quic_security);
                w.write_str(&self.quic_key);
            }
            "grpc" => {
                w.write_str(&self.grpc_service_name);
            }
            "meek" => {
                w.write_str(&self.meek_url);
            }
            "hysteria2" => {
                w.write_i32(self.hy2_down_mbps);
                w.write_i32(self.hy2_up_mbps);
                w.write_str(&self.hy2_obfs_password);
                w.write_str(&self.hy2_password);
            }
            "mekya" => {
                w.write_str(&self.mekya_kcp_header_type);
                w.write_str(&self.mekya_kcp_seed);
                w.write_str(&self.mekya_url);
            }
            _ => {}
        }

        w.write_str(&self.security);
        match self.security.as_str() {
            "tls" => {
                w.write_str(&self.sni);
                w.write_str(&self.alpn);
                w.write_str(&self.certificates);
                w.write_str(&self.pinned_peer_certificate_chain_sha256);
                w.write_bool(self.allow_insecure);
                w.write_str(&self.utls_fingerprint);
                w.write_str(&self.ech_config);
                w.write_str(&self.ech_doh_server);
            }
            "reality" => {
                w.write_str(&self.sni);
                w.write_str(&self.reality_public_key);
                w.write_str(&self.reality_short_id);
                w.write_str(&self.reality_spider_x);
                w.write_str(&self.reality_fingerprint);
            }
            _ => {}
        }

        match extra {
            StreamExtra::None => {}
            StreamExtra::Vmess {
                alter_id,
                authenticated_length,
                no_termination_signal,
            } => {
                w.write_i32(alter_id);
                w.write_bool(authenticated_length);
                w.write_bool(no_termination_signal);
            }
            StreamExtra::Vless { flow } => {
                w.write_str(flow);
            }
        }

        w.write_str(&self.packet_encoding);
        w.write_bool(self.mux);
        w.write_i32(self.mux_concurrency);
        w.write_str(&self.mux_packet_encoding);
    }

    // ------------------------------------------------------------------
    // Decode
    // ------------------------------------------------------------------

    pub(crate) fn deserialize_with(
        &mut self,
        r: &mut RecordReader,
        extra: StreamExtraMut<'_>,
    ) -> Result<(), WireError> {
        let version = r.read_i32()?;
        self.base.deserialize(r)?;

        self.uuid = r.read_str()?;
        self.encryption = r.read_str()?;
        self.transport = r.read_str()?;

        match self.transport.as_str() {
            "tcp" => {
                self.header_type = r.read_str()?;
                self.host = r.read_str()?;
                self.path = r.read_str()?;
            }
            "kcp" => {
                self.header_type = r.read_str()?;
                self.kcp_seed = r.read_str()?;
            }
            "ws" => {
                self.host = r.read_str()?;
                self.path = r.read_str()?;
                self.ws_max_early_data = r.read_i32()?;
                self.ws_use_browser_forwarder = r.read_bool()?;
                if version >= 2 {
                    self.early_data_header_name = r.read_str()?;
                }
            }
            "http" => {
                self.host = r.read_str()?;
                self.path = r.read_str()?;
            }
            "quic" => {
                self.header_type = r.read_str()?;
                self.quic_security = r.read_str()?;
                self.quic_key = r.read_str()?;
                if version < 16 {
                    self.read_grpc_chain(r, version)?;
                }
            }
            "grpc" => self.read_grpc_chain(r, version)?,
            "meek" => self.read_meek_chain(r, version)?,
            "httpupgrade" => self.read_httpupgrade_chain(r, version)?,
            "hysteria2" => self.read_hysteria2_tail(r, version)?,
            "splithttp" => {
                if version >= 18 {
                    self.host = r.read_str()?;
                    self.path = r.read_str()?;
                }
                if version >= 20 {
                    self.sh_use_browser_forwarder = r.read_bool()?;
                }
            }
            "mekya" => {
                if version >= 22 {
                    self.mekya_kcp_header_type = r.read_str()?;
                    self.mekya_kcp_seed = r.read_str()?;
                    self.mekya_url = r.read_str()?;
                }
            }
            other => {
                debug!(transport = other, "unknown transport type, no variant fields");
            }
        }

        self.security = r.read_str()?;
        match self.security.as_str() {
            "tls" => {
                self.sni = r.read_str()?;
                self.alpn = r.read_str()?;
                if version >= 1 {
                    self.certificates = r.read_str()?;
                    self.pinned_peer_certificate_chain_sha256 = r.read_str()?;
                }
                if version >= 3 {
                    self.allow_insecure = r.read_bool()?;
                }
                if version >= 9 {
                    self.utls_fingerprint = r.read_str()?;
                }
                if version >= 21 {
                    self.ech_config = r.read_str()?;
                    self.ech_doh_server = r.read_str()?;
                }
            }
            "xtls" => {
                // removed security type, rewritten to plain TLS
                if version <= 8 {
                    self.security = "tls".to_string();
                    self.sni = r.read_str()?;
                    self.alpn = r.read_str()?;
                    r.read_str()?; // flow, removed
                }
                if version < 16 {
                    self.read_reality_tail(r, version)?;
                }
            }
            "reality" => self.read_reality_tail(r, version)?,
            other => {
                debug!(security = other, "unknown security type, no variant fields");
            }
        }

        match extra {
            StreamExtraMut::None => {}
            StreamExtraMut::Vmess {
                alter_id,
                authenticated_length,
                no_termination_signal,
            } => {
                if version != 4 && version < 6 {
                    *alter_id = r.read_i32()?;
                }
                if version >= 4 {
                    if version >= 17 {
                        *alter_id = r.read_i32()?;
                    }
                    *authenticated_length = r.read_bool()?;
                    *no_termination_signal = r.read_bool()?;
                }
            }
            StreamExtraMut::Vless { flow } => {
                if version >= 11 {
                    *flow = r.read_str()?;
                }
            }
        }

        if (7..=15).contains(&version) {
            self.packet_encoding = match r.read_i32()? {
                0 => "none".to_string(),
                1 => "packet".to_string(),
                2 => "xudp".to_string(),
                _ => self.packet_encoding.clone(),
            };
        }
        if version >= 16 {
            self.packet_encoding = r.read_str()?;
        }
        if version >= 19 {
            self.mux = r.read_bool()?;
            self.mux_concurrency = r.read_i32()?;
            self.mux_packet_encoding = r.read_str()?;
        }

        Ok(())
    }

    // Writers before version 16 ran the quic/grpc/meek/httpupgrade branches
    // into each other, so those records carry the whole suffix. Each helper
    // reads its own fields and hands off to the next layout in the chain.

    fn read_grpc_chain(&mut self, r: &mut RecordReader, version: i32) -> Result<(), WireError> {
        self.grpc_service_name = r.read_str()?;
        if (8..=12).contains(&version) {
            r.read_str()?; // grpcMode, removed
        }
        if version < 16 {
            self.read_meek_chain(r, version)?;
        }
        Ok(())
    }

    fn read_meek_chain(&mut self, r: &mut RecordReader, version: i32) -> Result<(), WireError> {
        if version >= 10 {
            self.meek_url = r.read_str()?;
        }
        if version < 16 {
            self.read_httpupgrade_chain(r, version)?;
        }
        Ok(())
    }

    fn read_httpupgrade_chain(
        &mut self,
        r: &mut RecordReader,
        version: i32,
    ) -> Result<(), WireError> {
        if version >= 12 {
            self.host = r.read_str()?;
            self.path = r.read_str()?;
        }
        if version < 16 {
            self.read_hysteria2_tail(r, version)?;
        }
        Ok(())
    }

    fn read_hysteria2_tail(
        &mut self,
        r: &mut RecordReader,
        version: i32,
    ) -> Result<(), WireError> {
        if version >= 14 {
            self.hy2_down_mbps = r.read_i32()?;
            self.hy2_up_mbps = r.read_i32()?;
            self.hy2_obfs_password = r.read_str()?;
        }
        if version >= 15 {
            self.hy2_password = r.read_str()?;
        }
        Ok(())
    }

    fn read_reality_tail(&mut self, r: &mut RecordReader, version: i32) -> Result<(), WireError> {
        if version >= 11 {
            self.sni = r.read_str()?;
            self.reality_public_key = r.read_str()?;
            self.reality_short_id = r.read_str()?;
            self.reality_spider_x = r.read_str()?;
            self.reality_fingerprint = r.read_str()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Predicates and merge
    // ------------------------------------------------------------------

    /// TCP probing makes no sense for the UDP-carried transports, nor for
    /// split-HTTP pinned to h3.
    pub(crate) fn stream_can_tcping(&self) -> bool {
        if matches!(self.transport.as_str(), "kcp" | "quic" | "hysteria2") {
            return false;
        }
        let alpns = list_by_line_or_comma(&self.alpn);
        !(self.transport == "splithttp" && alpns.len() == 1 && alpns[0] == "h3")
    }

    pub(crate) fn merge_features(&self, dest: &mut StandardTransport) {
        if self.allow_insecure {
            dest.allow_insecure = true;
        }
        dest.ws_max_early_data = self.ws_max_early_data;
        dest.early_data_header_name = self.early_data_header_name.clone();
        dest.ws_use_browser_forwarder = self.ws_use_browser_forwarder;
        dest.sh_use_browser_forwarder = self.sh_use_browser_forwarder;
        dest.certificates = self.certificates.clone();
        dest.pinned_peer_certificate_chain_sha256 =
            self.pinned_peer_certificate_chain_sha256.clone();
        dest.packet_encoding = self.packet_encoding.clone();
        dest.utls_fingerprint = self.utls_fingerprint.clone();
        dest.ech_config = self.ech_config.clone();
        dest.ech_doh_server = self.ech_doh_server.clone();
        // reality_fingerprint is per-profile, not propagated
        dest.hy2_down_mbps = self.hy2_down_mbps;
        dest.hy2_up_mbps = self.hy2_up_mbps;
        dest.mux = self.mux;
        dest.mux_concurrency = self.mux_concurrency;
        dest.mux_packet_encoding = self.mux_packet_encoding.clone();
    }
}
