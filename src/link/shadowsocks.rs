//! Shadowsocks share links
//!
//! Supports SIP002 (`ss://BASE64(method:password)@host:port/?plugin=...#tag`,
//! plain userinfo included) and the legacy whole-link Base64 form.

use anyhow::{anyhow, bail, Result};
use tracing::trace;

use crate::link::base64::{decode_base64_text, encode_base64_url};
use crate::link::{decode_component, parse_host_port, push_fragment, LinkCodec};
use crate::net::join_host_port;
use crate::profile::{Profile, ProfileRecord, ShadowsocksProfile};

/// Codec for Shadowsocks (ss://) share links
pub struct ShadowsocksLink;

impl LinkCodec for ShadowsocksLink {
    fn scheme(&self) -> &str {
        "ss"
    }

    fn parse(&self, uri: &str) -> Result<Profile> {
        let uri = uri.trim();
        trace!("parsing Shadowsocks link");

        let without_scheme = uri
            .strip_prefix("ss://")
            .ok_or_else(|| anyhow!("Invalid Shadowsocks URI: missing ss:// prefix"))?;

        let (main_part, name) = match without_scheme.rfind('#') {
            Some(pos) => (
                &without_scheme[..pos],
                decode_component(&without_scheme[pos + 1..]),
            ),
            None => (without_scheme, String::new()),
        };

        let mut record = if let Some(at_pos) = main_part.rfind('@') {
            parse_sip002(main_part, at_pos)?
        } else {
            parse_legacy(main_part)?
        };
        record.stream.base.name = name;
        Ok(Profile::Shadowsocks(record.defaulted()))
    }
}

/// SIP002: `userinfo@host:port[/?plugin=...]`, userinfo Base64 or plain.
fn parse_sip002(main_part: &str, at_pos: usize) -> Result<ShadowsocksProfile> {
    let userinfo = &main_part[..at_pos];
    let rest = &main_part[at_pos + 1..];

    let (hostport_raw, query) = match rest.find('?') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let (host, port) = parse_host_port(hostport_raw.trim_end_matches('/'))?;

    let (method, password) = parse_userinfo(userinfo)?;

    let mut record = ShadowsocksProfile::default();
    record.stream.base.server_address = host;
    record.stream.base.server_port = port;
    record.method = method;
    record.password = password;
    if let Some(query) = query {
        record.plugin = parse_plugin_query(query);
    }
    Ok(record)
}

/// Legacy: the whole `method:password@host:port` is one Base64 blob.
fn parse_legacy(main_part: &str) -> Result<ShadowsocksProfile> {
    let decoded = decode_base64_text(main_part)?;
    let at_pos = decoded
        .rfind('@')
        .ok_or_else(|| anyhow!("Invalid legacy Shadowsocks URI: missing @"))?;
    parse_sip002(&decoded, at_pos)
}

fn parse_userinfo(userinfo: &str) -> Result<(String, String)> {
    // plain `method:password` userinfo is also allowed by SIP002
    let decoded = decode_base64_text(userinfo)
        .unwrap_or_else(|_| decode_component(userinfo));
    match decoded.split_once(':') {
        Some((method, password)) => Ok((method.to_string(), password.to_string())),
        None => bail!("Invalid Shadowsocks userinfo: missing method separator"),
    }
}

/// The SIP003 `plugin` query parameter, stored verbatim as
/// `name;opt=value;...`.
fn parse_plugin_query(query: &str) -> String {
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("plugin=") {
            return decode_component(value);
        }
    }
    String::new()
}

/// Formats a record as a SIP002 link.
pub fn format_shadowsocks(record: &ShadowsocksProfile) -> String {
    let mut uri = format!(
        "ss://{}@{}",
        encode_base64_url(&format!("{}:{}", record.method, record.password)),
        join_host_port(
            &record.stream.base.server_address,
            record.stream.base.server_port
        ),
    );
    if !record.plugin.trim().is_empty() {
        uri.push_str("/?plugin=");
        uri.push_str(&urlencoding::encode(&record.plugin));
    }
    push_fragment(&mut uri, &record.stream.base.name);
    uri
}
