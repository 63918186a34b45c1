//! Trojan share links
//!
//! Format: `trojan://password@host:port?params#tag`

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use tracing::trace;
use url::Url;

use crate::link::{decode_component, fragment_name, push_fragment, LinkCodec};
use crate::net::{join_host_port, list_by_line_or_comma};
use crate::profile::{Profile, ProfileRecord, TrojanProfile};

/// Codec for Trojan (trojan://) share links
pub struct TrojanLink;

impl LinkCodec for TrojanLink {
    fn scheme(&self) -> &str {
        "trojan"
    }

    fn parse(&self, uri: &str) -> Result<Profile> {
        trace!("parsing Trojan link");
        let url = Url::parse(uri).map_err(|e| anyhow!("Failed to parse Trojan URI: {}", e))?;

        let password = decode_component(url.username());
        if password.is_empty() {
            bail!("Trojan URI missing password");
        }

        let server = url
            .host_str()
            .ok_or_else(|| anyhow!("Trojan URI missing host"))?
            .to_string();
        let server_port = url.port().ok_or_else(|| anyhow!("Trojan URI missing port"))?;

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        let mut record = TrojanProfile::default();
        record.stream.base.server_address = server;
        record.stream.base.server_port = server_port;
        record.stream.base.name = fragment_name(&url);
        record.password = password;

        // Trojan defaults to TLS
        let security = params.get("security").map(String::as_str).unwrap_or("tls");
        if security != "none" {
            record.stream.security = "tls".to_string();
            if let Some(sni) = params.get("sni") {
                record.stream.sni = sni.clone();
            }
            if let Some(alpn) = params.get("alpn") {
                record.stream.alpn = list_by_line_or_comma(alpn).join("\n");
            }
            if let Some(fp) = params.get("fp") {
                record.stream.utls_fingerprint = fp.clone();
            }
            if let Some(insecure) = params.get("allowInsecure").or_else(|| params.get("insecure"))
            {
                record.stream.allow_insecure = insecure == "1" || insecure == "true";
            }
        }

        match params.get("type").map(String::as_str) {
            Some("ws") | Some("websocket") => {
                record.stream.transport = "ws".to_string();
                if let Some(host) = params.get("host") {
                    record.stream.host = host.clone();
                }
                if let Some(path) = params.get("path") {
                    record.stream.path = path.clone();
                }
            }
            Some("grpc") => {
                record.stream.transport = "grpc".to_string();
                if let Some(service) = params.get("serviceName") {
                    record.stream.grpc_service_name = service.clone();
                }
            }
            _ => {}
        }

        Ok(Profile::Trojan(record.defaulted()))
    }
}

/// Formats a record as a trojan:// link, omitting defaulted parameters.
pub fn format_trojan(record: &TrojanProfile) -> String {
    let mut uri = format!(
        "trojan://{}@{}",
        urlencoding::encode(&record.password),
        join_host_port(
            &record.stream.base.server_address,
            record.stream.base.server_port
        ),
    );

    let mut params: Vec<(&str, String)> = Vec::new();
    if record.stream.security == "none" {
        params.push(("security", "none".to_string()));
    } else {
        if !record.stream.sni.is_empty() {
            params.push(("sni", record.stream.sni.clone()));
        }
        if !record.stream.alpn.is_empty() {
            params.push((
                "alpn",
                list_by_line_or_comma(&record.stream.alpn).join(","),
            ));
        }
        if !record.stream.utls_fingerprint.is_empty() {
            params.push(("fp", record.stream.utls_fingerprint.clone()));
        }
        if record.stream.allow_insecure {
            params.push(("allowInsecure", "1".to_string()));
        }
    }
    match record.stream.transport.as_str() {
        "ws" => {
            params.push(("type", "ws".to_string()));
            if !record.stream.host.is_empty() {
                params.push(("host", record.stream.host.clone()));
            }
            if !record.stream.path.is_empty() {
                params.push(("path", record.stream.path.clone()));
            }
        }
        "grpc" => {
            params.push(("type", "grpc".to_string()));
            if !record.stream.grpc_service_name.is_empty() {
                params.push(("serviceName", record.stream.grpc_service_name.clone()));
            }
        }
        _ => {}
    }

    for (i, (key, value)) in params.iter().enumerate() {
        uri.push(if i == 0 { '?' } else { '&' });
        uri.push_str(key);
        uri.push('=');
        uri.push_str(&urlencoding::encode(value));
    }
    push_fragment(&mut uri, &record.stream.base.name);
    uri
}
