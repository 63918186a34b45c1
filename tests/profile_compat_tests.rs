//! Cross-version compatibility and record-law tests.
//!
//! Historical byte streams are built by hand with `RecordWriter`, mirroring
//! what old writers produced, and must decode into current-shape records
//! with canonical defaults for everything the old layout never carried.

use platter::link::LinkRegistry;
use platter::profile::{
    FeatureFlags, Hysteria2Profile, NaiveProfile, Profile, ProfileKind, ProfileRecord,
    ShadowsocksProfile, TrojanProfile, Tuic5Profile, VlessProfile, VmessProfile,
};
use platter::transform::to_outbound;
use platter::wire::RecordWriter;

/// Writes the base layout the way every version of the store has.
fn write_base(w: &mut RecordWriter, address: &str, port: u16, name: &str) {
    w.write_i32(0);
    w.write_str(address);
    w.write_i32(i32::from(port));
    w.write_str(name);
}

// ============================================================================
// Round-trip law
// ============================================================================

fn sample_profiles() -> Vec<Profile> {
    let mut ss = ShadowsocksProfile::default();
    ss.stream.base.server_address = "ss.example.com".to_string();
    ss.password = "pw".to_string();

    let mut vmess = VmessProfile::default();
    vmess.stream.uuid = "b831381d-6324-4d53-ad4f-8cda48b30811".to_string();
    vmess.stream.transport = "ws".to_string();
    vmess.stream.path = "/v".to_string();
    vmess.alter_id = 1;

    let mut vless = VlessProfile::default();
    vless.stream.uuid = "uuid".to_string();
    vless.stream.security = "reality".to_string();
    vless.stream.reality_public_key = "pk".to_string();
    vless.flow = "xtls-rprx-vision".to_string();

    let mut trojan = TrojanProfile::default();
    trojan.password = "pw".to_string();
    trojan.stream.security = "tls".to_string();

    let mut trojan_go = platter::profile::TrojanGoProfile::default();
    trojan_go.password = "pw".to_string();
    trojan_go.transport = "ws".to_string();
    trojan_go.host = "cdn.example.com".to_string();

    let mut naive = NaiveProfile::default();
    naive.username = "alice".to_string();

    let mut brook = platter::profile::BrookProfile::default();
    brook.protocol = "wss".to_string();
    brook.ws_path = "/b".to_string();

    let mut mieru = platter::profile::MieruProfile::default();
    mieru.protocol = platter::profile::mieru::PROTOCOL_UDP;
    mieru.mtu = 1320;

    let mut tuic = platter::profile::TuicProfile::default();
    tuic.password = "token".to_string();

    let mut hysteria2 = Hysteria2Profile::default();
    hysteria2.auth = "auth".to_string();
    hysteria2.server_ports = "443,5000-6000".to_string();

    let mut tuic5 = Tuic5Profile::default();
    tuic5.uuid = "uuid".to_string();

    let mut shadowtls = platter::profile::ShadowTlsProfile::default();
    shadowtls.sni = "cloud.example.com".to_string();
    shadowtls.v3 = true;

    let mut juicity = platter::profile::JuicityProfile::default();
    juicity.uuid = "uuid".to_string();

    let mut profiles = vec![
        Profile::Shadowsocks(ss),
        Profile::Vmess(vmess),
        Profile::Vless(vless),
        Profile::Trojan(trojan),
        Profile::TrojanGo(trojan_go),
        Profile::Naive(naive),
        Profile::Brook(brook),
        Profile::Mieru(mieru),
        Profile::Tuic(tuic),
        Profile::Hysteria2(hysteria2),
        Profile::Tuic5(tuic5),
        Profile::ShadowTls(shadowtls),
        Profile::Juicity(juicity),
    ];
    for profile in &mut profiles {
        profile.apply_defaults();
    }
    profiles
}

#[test]
fn roundtrip_law_for_every_variant() {
    for profile in sample_profiles() {
        let blob = profile.encode();
        let decoded = Profile::decode(profile.kind(), &blob).unwrap();
        assert_eq!(decoded, profile, "round-trip mismatch for {:?}", profile.kind());
    }
}

#[test]
fn truncation_is_fatal_for_every_variant() {
    for profile in sample_profiles() {
        let blob = profile.encode();
        assert!(
            Profile::decode(profile.kind(), &blob[..blob.len() - 1]).is_err(),
            "truncated decode must fail for {:?}",
            profile.kind()
        );
    }
}

#[test]
fn kind_ids_route_storage_blobs() {
    for profile in sample_profiles() {
        let id = profile.kind().id();
        let kind = ProfileKind::from_id(id).unwrap();
        assert_eq!(kind, profile.kind());
    }
}

// ============================================================================
// Historical vectors
// ============================================================================

/// The pre-refactor Trojan layout: address, port, password, security, sni,
/// alpn, nothing else. Current-shape fields must come back defaulted.
#[test]
fn legacy_trojan_record_decodes_with_defaults() {
    let mut w = RecordWriter::new();
    w.write_i32(0);
    w.write_str("legacy.example.com");
    w.write_i32(443);
    w.write_str("secret");
    w.write_str("tls");
    w.write_str("sni.example.com");
    w.write_str("h2");

    let record = TrojanProfile::decode(&w.into_bytes()).unwrap();
    assert_eq!(record.stream.base.server_address, "legacy.example.com");
    assert_eq!(record.password, "secret");
    assert_eq!(record.stream.sni, "sni.example.com");
    // transport and mux never existed in that layout
    assert_eq!(record.stream.transport, "tcp");
    assert!(!record.stream.mux);
    assert_eq!(record.stream.mux_concurrency, 8);
    assert_eq!(record.stream.packet_encoding, "none");
    assert_eq!(record.stream.reality_fingerprint, "chrome");
}

/// A version-5 VMess stream: alter id written twice (legacy slot plus the
/// experiment block), no packet encoding, no mux.
#[test]
fn v5_vmess_stream_decodes() {
    let mut w = RecordWriter::new();
    w.write_i32(5);
    write_base(&mut w, "vm.example.com", 443, "old vmess");
    w.write_str("uuid-v5");
    w.write_str("auto");
    w.write_str("tcp");
    w.write_str("http"); // header type
    w.write_str("vm.example.com"); // host
    w.write_str("/"); // path
    w.write_str("tls");
    w.write_str("sni.example.com");
    w.write_str(""); // alpn
    w.write_str(""); // certificates (v1+)
    w.write_str(""); // pinned chain (v1+)
    w.write_bool(true); // allow insecure (v3+)
    w.write_i32(1); // alter id, legacy slot (v != 4 && v < 6)
    w.write_bool(true); // authenticated length (v4+)
    w.write_bool(false); // no termination signal (v4+)

    let record = VmessProfile::decode(&w.into_bytes()).unwrap();
    assert_eq!(record.stream.base.name, "old vmess");
    assert_eq!(record.stream.uuid, "uuid-v5");
    assert_eq!(record.stream.header_type, "http");
    assert!(record.stream.allow_insecure);
    assert_eq!(record.alter_id, 1);
    assert!(record.authenticated_length);
    // never carried by version 5
    assert_eq!(record.stream.utls_fingerprint, "");
    assert_eq!(record.stream.packet_encoding, "none");
    assert!(!record.stream.mux);
}

/// A version-12 VLESS grpc stream runs the removed-mode discard plus the
/// meek/httpupgrade chain, then still finds the flow field.
#[test]
fn v12_vless_grpc_chain_decodes() {
    let mut w = RecordWriter::new();
    w.write_i32(12);
    write_base(&mut w, "vl.example.com", 443, "");
    w.write_str("uuid-v12");
    w.write_str("none");
    w.write_str("grpc");
    w.write_str("GunService"); // grpc service name
    w.write_str("gun"); // grpcMode, removed (8..=12)
    w.write_str(""); // meek url (v10+)
    w.write_str("upgrade.example.com"); // httpupgrade host (v12+)
    w.write_str("/up"); // httpupgrade path
    w.write_str("none"); // security
    w.write_str("xtls-rprx-vision"); // flow (v11+)
    w.write_i32(2); // packet encoding integer (7..=15): xudp

    let record = VlessProfile::decode(&w.into_bytes()).unwrap();
    assert_eq!(record.stream.grpc_service_name, "GunService");
    // the chain writes shared host/path slots; the grpc outbound ignores them
    assert_eq!(record.stream.host, "upgrade.example.com");
    assert_eq!(record.flow, "xtls-rprx-vision");
    assert_eq!(record.stream.packet_encoding, "xudp");
}

/// Removed boolean at the documented version-2 position decodes and is
/// discarded without disturbing any other field.
#[test]
fn removed_uot_flag_is_tolerated() {
    let mut w = RecordWriter::new();
    w.write_i32(2);
    write_base(&mut w, "naive.example.com", 443, "n");
    w.write_str("https");
    w.write_str("alice");
    w.write_str("secret");
    w.write_str("X-H: 1");
    w.write_i32(3); // insecure concurrency (v1+)
    w.write_bool(true); // uot, removed (v == 2)

    let record = NaiveProfile::decode(&w.into_bytes()).unwrap();
    assert_eq!(record.username, "alice");
    assert_eq!(record.password, "secret");
    assert_eq!(record.extra_headers, "X-H: 1");
    assert_eq!(record.insecure_concurrency, 3);
    assert!(!record.no_post_quantum);
    assert_eq!(record.sni, "");
}

/// Unknown discriminator values read no variant fields and default-fill.
#[test]
fn unknown_security_from_newer_writer_is_tolerated() {
    let mut w = RecordWriter::new();
    w.write_i32(22);
    write_base(&mut w, "vm.example.com", 443, "");
    w.write_str("uuid");
    w.write_str("none");
    w.write_str("tcp");
    w.write_str("none"); // header type
    w.write_str(""); // host
    w.write_str(""); // path
    w.write_str("post-quantum-tls"); // security this build has never heard of
    w.write_str(""); // vless flow
    w.write_str("none"); // packet encoding
    w.write_bool(false); // mux
    w.write_i32(8);
    w.write_str("none");

    let record = VlessProfile::decode(&w.into_bytes()).unwrap();
    assert_eq!(record.stream.security, "post-quantum-tls");
    assert_eq!(record.stream.sni, "");
    assert!(!record.stream.allow_insecure);
}

// ============================================================================
// Clone, predicates, merge
// ============================================================================

#[test]
fn clone_is_equal_but_independent() {
    let mut record = TrojanProfile::default();
    record.stream.base.server_address = "example.com".to_string();
    record.password = "pw".to_string();
    let record = record.defaulted();

    let mut copy = record.deep_clone();
    assert_eq!(copy, record);
    copy.password.push_str("-changed");
    copy.stream.base.server_address.clear();
    assert_eq!(record.password, "pw");
    assert_eq!(record.stream.base.server_address, "example.com");
}

#[test]
fn hysteria2_mapping_predicate_follows_sni() {
    let flags = FeatureFlags::default();
    let mut record = Hysteria2Profile::default();
    record.base.server_address = "203.0.113.1".to_string();
    let mut record = record.defaulted();
    assert!(!record.can_mapping(&flags));

    record.sni = "hy2.example.com".to_string();
    assert!(record.can_mapping(&flags));

    // the predicate must derive identically after a codec round-trip
    let decoded = Hysteria2Profile::decode(&record.encode()).unwrap();
    assert!(decoded.can_mapping(&flags));
}

#[test]
fn insecure_flag_merge_is_monotonic() {
    let mut source = TrojanProfile::default();
    source.stream.allow_insecure = true;
    let source = source.defaulted();

    let mut dest = TrojanProfile::default().defaulted();
    assert!(!dest.stream.allow_insecure);
    source.apply_feature_settings(&mut dest);
    assert!(dest.stream.allow_insecure);

    let safe_source = TrojanProfile::default().defaulted();
    safe_source.apply_feature_settings(&mut dest);
    assert!(dest.stream.allow_insecure, "false must never clear true");
}

// ============================================================================
// End to end: link -> record -> blob -> outbound
// ============================================================================

#[test]
fn share_link_to_outbound_pipeline() {
    let registry = LinkRegistry::with_builtin_codecs();
    let profile = registry
        .parse_uri("trojan://pw@example.com:443?sni=example.com&type=grpc&serviceName=svc#node")
        .unwrap();
    assert_eq!(profile.kind(), ProfileKind::Trojan);

    // persist and reload through the codec
    let blob = profile.encode();
    let reloaded = Profile::decode(ProfileKind::Trojan, &blob).unwrap();
    assert_eq!(reloaded, profile);

    let outbound = to_outbound(&reloaded).unwrap();
    let json = serde_json::to_value(&outbound).unwrap();
    assert_eq!(json["type"], "trojan");
    assert_eq!(json["tag"], "node");
    assert_eq!(json["tls"]["server_name"], "example.com");
    assert_eq!(json["transport"]["type"], "grpc");
    assert_eq!(json["transport"]["service_name"], "svc");
    assert!(json.get("flow").is_none());
}
