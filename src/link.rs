//! Share-link codecs
//!
//! Parsers and formatters for the URI forms users exchange. Each codec
//! implements the [`LinkCodec`] trait and produces a fully-defaulted
//! [`Profile`]; formatting is the inverse, omitting parameters that sit at
//! their defaults.

pub mod base64;
pub mod hysteria2;
pub mod juicity;
pub mod naive;
pub mod shadowsocks;
pub mod trojan;
pub mod tuic;

pub use hysteria2::Hysteria2Link;
pub use juicity::JuicityLink;
pub use naive::NaiveLink;
pub use shadowsocks::ShadowsocksLink;
pub use trojan::TrojanLink;
pub use tuic::TuicLink;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::profile::Profile;

// ============================================================================
// Link Codec Trait
// ============================================================================

/// Trait for parsing individual share-link schemes
pub trait LinkCodec: Send + Sync {
    /// Returns the URI scheme this codec handles (e.g. "ss", "trojan")
    fn scheme(&self) -> &str;

    /// Parses a URI string into a profile record
    fn parse(&self, uri: &str) -> Result<Profile>;

    /// Checks if this codec can handle the given URI
    fn can_parse(&self, uri: &str) -> bool {
        uri.starts_with(&format!("{}://", self.scheme()))
    }
}

// ============================================================================
// Link Registry
// ============================================================================

/// Registry for link codecs with dynamic dispatch
#[derive(Default)]
pub struct LinkRegistry {
    codecs: HashMap<String, Arc<dyn LinkCodec>>,
}

impl LinkRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Creates a registry with all built-in codecs registered
    pub fn with_builtin_codecs() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ShadowsocksLink));
        registry.register(Arc::new(TrojanLink));
        registry.register(Arc::new(Hysteria2Link::new("hysteria2")));
        registry.register(Arc::new(Hysteria2Link::new("hy2")));
        registry.register(Arc::new(TuicLink));
        registry.register(Arc::new(JuicityLink));
        registry.register(Arc::new(NaiveLink::new("naive+https")));
        registry.register(Arc::new(NaiveLink::new("naive+quic")));
        registry
    }

    /// Registers a link codec
    pub fn register(&mut self, codec: Arc<dyn LinkCodec>) {
        self.codecs.insert(codec.scheme().to_string(), codec);
    }

    /// Gets a codec for the given scheme
    pub fn get(&self, scheme: &str) -> Option<&Arc<dyn LinkCodec>> {
        self.codecs.get(scheme)
    }

    /// Parses a URI using the appropriate codec
    pub fn parse_uri(&self, uri: &str) -> Result<Profile> {
        let scheme = extract_scheme(uri)?;
        debug!(scheme, "parsing share link");

        let codec = self
            .codecs
            .get(scheme)
            .ok_or_else(|| anyhow!("No codec registered for scheme: {}", scheme))?;

        let result = codec.parse(uri);
        if let Err(e) = &result {
            debug!(scheme, error = %e, "failed to parse share link");
        }
        result
    }
}

/// Extracts the scheme from a URI
fn extract_scheme(uri: &str) -> Result<&str> {
    uri.split_once("://")
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| anyhow!("Invalid URI: no scheme separator"))
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Parses `host:port`, bracketed IPv6 included.
pub(crate) fn parse_host_port(hostport: &str) -> Result<(String, u16)> {
    let (host, port) = if let Some(rest) = hostport.strip_prefix('[') {
        let (host, rest) = rest
            .split_once(']')
            .ok_or_else(|| anyhow!("Invalid host: unterminated IPv6 bracket"))?;
        let port = rest
            .strip_prefix(':')
            .ok_or_else(|| anyhow!("Missing port in {hostport}"))?;
        (host.to_string(), port)
    } else {
        let (host, port) = hostport
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("Missing port in {hostport}"))?;
        (host.to_string(), port)
    };
    let port = port
        .parse::<u16>()
        .map_err(|_| anyhow!("Invalid port: {port}"))?;
    Ok((host, port))
}

/// Percent-decodes a URI component, falling back to the raw text.
pub(crate) fn decode_component(component: &str) -> String {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}

/// The fragment used as profile name, if present.
pub(crate) fn fragment_name(url: &url::Url) -> String {
    url.fragment().map(decode_component).unwrap_or_default()
}

/// Appends `#name` when the profile has one.
pub(crate) fn push_fragment(uri: &mut String, name: &str) {
    if !name.trim().is_empty() {
        uri.push('#');
        uri.push_str(&urlencoding::encode(name));
    }
}
