//! Exercises the public decoders the way a BGP message parser would call them: one raw attribute
//! or NLRI buffer at a time.
use bgpkit_srte::models::*;
use bgpkit_srte::*;
use bytes::{BufMut, Bytes, BytesMut};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn put_tlv(data: &mut BytesMut, tlv_type: u16, value: &[u8]) {
    data.put_u16(tlv_type);
    data.put_u16(value.len() as u16);
    data.put_slice(value);
}

#[test]
fn rtc_nlri_lengths() -> anyhow::Result<()> {
    init_logger();

    let default = parse_rtc_nlri_list(Bytes::from_static(&[0x00]), false)?;
    assert_eq!(default[0].length, 0);
    assert_eq!(default[0].origin_as, None);

    let origin_only = parse_rtc_nlri_list(Bytes::from_static(&[0x20, 0, 0, 0xfd, 0xe8]), false)?;
    assert_eq!(origin_only[0].length, 32);
    assert_eq!(origin_only[0].origin_as, Some(65000));

    let full = parse_rtc_nlri_list(
        Bytes::from(hex::decode("600000fde80102c0000201000a")?),
        false,
    )?;
    let rt = full[0].route_target.expect("route target present");
    assert_eq!(rt.to_string(), "rt:192.0.2.1:10");
    Ok(())
}

#[test]
fn rtc_nlri_concatenation_keeps_order() -> anyhow::Result<()> {
    let entries: Vec<RtcNlri> = (0..5u32)
        .map(|i| RtcNlri {
            path_id: None,
            length: 32,
            origin_as: Some(64512 + i),
            route_target: None,
        })
        .collect();

    let mut data = BytesMut::new();
    for entry in &entries {
        data.extend_from_slice(&encode_rtc_nlri(entry, false));
    }

    assert_eq!(parse_rtc_nlri_list(data.freeze(), false)?, entries);
    Ok(())
}

#[test]
fn rtc_nlri_rejects_bad_input() {
    for length in [24u8, 64] {
        let mut data = vec![length];
        data.extend_from_slice(&[0; 12]);
        assert!(matches!(
            parse_rtc_nlri_list(Bytes::from(data), false),
            Err(ParserError::InvalidLength { .. })
        ));
    }

    assert!(matches!(
        parse_rtc_nlri_list(Bytes::from_static(&[0x20, 0x00, 0x00]), false),
        Err(ParserError::TruncatedInput { .. })
    ));

    let route_target = |ec_type: u8, sub_type: u8| {
        let mut data = vec![0x60, 0, 0, 0xfd, 0xe8, ec_type, sub_type];
        data.extend_from_slice(&[0, 1, 0, 0, 0, 1]);
        parse_rtc_nlri_list(Bytes::from(data), false)
    };
    assert!(route_target(0x00, 0x02).is_ok());
    assert!(route_target(0x01, 0x02).is_ok());
    assert!(route_target(0x02, 0x02).is_ok());
    assert_eq!(
        route_target(0x00, 0x03),
        Err(ParserError::InvalidRouteTarget {
            ec_type: 0x00,
            sub_type: 0x03
        })
    );
    assert!(matches!(
        route_target(0x06, 0x02),
        Err(ParserError::InvalidRouteTarget { .. })
    ));
}

#[test]
fn pmsi_label_bit_packing() -> anyhow::Result<()> {
    // 12345 << 4 == 0x030390
    let pmsi = parse_pmsi_tunnel(Bytes::from_static(&[
        0x00, 0x06, 0x03, 0x03, 0x90, 10, 0, 0, 1,
    ]))?;
    assert_eq!(pmsi.mpls_label, 12345);
    assert_eq!(pmsi.tunnel_identifier, vec![10, 0, 0, 1]);
    assert_eq!(
        pmsi.ingress_replication_endpoint(),
        Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
    );
    Ok(())
}

#[test]
fn sr_policy_nlri_endpoint_family() -> anyhow::Result<()> {
    let mut v4 = vec![96, 0, 0, 0, 0, 0, 0, 0, 10];
    v4.extend_from_slice(&[10, 0, 0, 1]);
    assert_eq!(v4.len(), 13);
    let nlri = parse_sr_policy_nlri(Bytes::from(v4))?;
    assert!(nlri.endpoint.is_ipv4());
    assert_eq!(nlri.length, 12);

    let mut v6 = vec![192, 0, 0, 0, 0, 0, 0, 0, 10];
    v6.extend_from_slice(&Ipv6Addr::LOCALHOST.octets());
    assert_eq!(v6.len(), 25);
    let nlri = parse_sr_policy_nlri(Bytes::from(v6))?;
    assert!(nlri.endpoint.is_ipv6());
    assert_eq!(nlri.length, 24);

    for len in [12usize, 14, 20, 26] {
        assert!(parse_sr_policy_nlri(Bytes::from(vec![96u8; len])).is_err());
    }
    Ok(())
}

#[test]
fn decoding_is_idempotent() -> anyhow::Result<()> {
    let mut data = BytesMut::new();
    data.put_slice(&[12, 6, 0, 0, 0, 0, 0, 10]);
    data.put_u8(128);
    data.put_u16(9);
    data.put_slice(&[0, 1, 6, 0, 0]);
    data.put_u32(16001 << 12);
    let data = data.freeze();

    assert_eq!(
        parse_sr_policy_tlv(data.clone())?,
        parse_sr_policy_tlv(data.clone())?
    );

    let rtc = Bytes::from_static(&[0x20, 0, 0, 0xfd, 0xe8, 0x00]);
    assert_eq!(
        parse_rtc_nlri_list(rtc.clone(), false)?,
        parse_rtc_nlri_list(rtc, false)?
    );
    Ok(())
}

#[test]
fn segment_list_with_two_weights_fails() {
    let mut segment_list = BytesMut::new();
    segment_list.put_u8(0);
    for weight in [10u32, 20] {
        segment_list.put_slice(&[9, 6, 0, 0]);
        segment_list.put_u32(weight);
    }

    let mut data = BytesMut::new();
    data.put_u8(128);
    data.put_u16(segment_list.len() as u16);
    data.extend_from_slice(&segment_list);

    assert!(matches!(
        parse_sr_policy_tlv(data.freeze()),
        Err(ParserError::DuplicateField { field_type: 9, .. })
    ));
}

#[test]
fn segment_types_d_to_k_are_kept_raw() -> anyhow::Result<()> {
    let mut data = BytesMut::new();
    data.put_u8(0);
    // Type D: flags, algorithm, IPv6 node address
    data.put_slice(&[4, 18, 0, 0]);
    data.put_slice(&Ipv6Addr::LOCALHOST.octets());
    // Type I: flags, reserved, IPv6 node address
    data.put_slice(&[14, 18, 0, 0]);
    data.put_slice(&Ipv6Addr::LOCALHOST.octets());

    let list = parse_segment_list(data.freeze())?;
    let types: Vec<_> = list.segments.iter().map(Segment::segment_type).collect();
    assert_eq!(
        types,
        vec![SegmentListSubTlvType::TypeD, SegmentListSubTlvType::TypeI]
    );
    assert!(list
        .segments
        .iter()
        .all(|s| matches!(s, Segment::Unsupported { value, .. } if value.len() == 18)));

    assert!(matches!(
        parse_segment_list(Bytes::from_static(&[0, 42, 0])),
        Err(ParserError::InvalidEnumValue { value: 42, .. })
    ));
    Ok(())
}

#[test]
fn sr_capability_range_and_sid_rules() -> anyhow::Result<()> {
    let mut data = BytesMut::new();
    data.put_u16(0x8000);
    data.put_uint(0xabcdef, 3);
    put_tlv(&mut data, 1161, &[0xff, 0xff, 0xff]);

    let tlvs = parse_link_state_sr_tlvs(
        {
            let mut attr = BytesMut::new();
            put_tlv(&mut attr, 1034, &data);
            attr.freeze()
        },
        ProtocolId::IsisL2,
    )?;
    let LinkStateSrTlv::SrCapabilities(cap) = &tlvs[0] else {
        panic!("expected SR Capabilities, got {:?}", tlvs[0]);
    };
    assert_eq!(cap.ranges[0].range_size, 0xabcdef);
    assert_eq!(cap.ranges[0].sid, SidLabel::Label(0x0fffff));
    Ok(())
}

#[test]
fn unknown_sub_tlv_policies() {
    // SRv6 sub-TLVs: unknown kept
    let mut locator = BytesMut::new();
    locator.put_slice(&[0, 0, 0, 0]);
    locator.put_u32(10);
    put_tlv(&mut locator, 4000, &[1, 2, 3]);
    let locator = parse_srv6_locator(locator.freeze()).unwrap();
    assert_eq!(
        locator.sub_tlvs,
        vec![Srv6SubTlv::Unknown(Tlv::new(4000, vec![1, 2, 3]))]
    );

    // SR Capability sub-TLV: unknown rejected
    let mut cap = BytesMut::new();
    cap.put_u16(0);
    cap.put_uint(100, 3);
    put_tlv(&mut cap, 1162, &[0, 0, 1]);
    assert_eq!(
        parse_sr_capability(cap.freeze()),
        Err(ParserError::UnknownType {
            what: "SID/Label sub-TLV",
            tlv_type: 1162
        })
    );
}

fn te_policy_nlri(node_sub_tlvs: &[(u16, &[u8])], descriptors: &[(u16, &[u8])]) -> Bytes {
    let mut node = BytesMut::new();
    for (tlv_type, value) in node_sub_tlvs {
        put_tlv(&mut node, *tlv_type, value);
    }

    let mut data = BytesMut::new();
    data.put_u8(8);
    data.put_u64(1);
    put_tlv(&mut data, 256, &node);
    for (tlv_type, value) in descriptors {
        put_tlv(&mut data, *tlv_type, value);
    }
    data.freeze()
}

#[test]
fn te_policy_mandatory_tlvs_and_hash() -> anyhow::Result<()> {
    let asn = 65001u32.to_be_bytes();
    let router_id: [u8; 4] = [10, 0, 0, 1];

    let missing_as = te_policy_nlri(&[(516, &router_id[..])], &[]);
    assert!(matches!(
        parse_te_policy_nlri(missing_as),
        Err(ParserError::MissingMandatoryTlv { tlv_type: 512, .. })
    ));

    let missing_router_id = te_policy_nlri(&[(512, &asn[..])], &[]);
    assert!(matches!(
        parse_te_policy_nlri(missing_router_id),
        Err(ParserError::MissingMandatoryTlv { tlv_type: 516, .. })
    ));

    let node = [(512, &asn[..]), (516, &router_id[..])];
    let first = parse_te_policy_nlri(te_policy_nlri(&node, &[(550, &[0u8, 1][..])]))?;
    let second = parse_te_policy_nlri(te_policy_nlri(&node, &[(551, &[0u8, 9][..])]))?;
    assert_eq!(first.head_end_hash, second.head_end_hash);
    assert_eq!(first.tunnel_id(), Some(1));
    assert_eq!(second.lsp_id(), Some(9));
    Ok(())
}

#[test]
fn prefix_sid_srv6_service() -> anyhow::Result<()> {
    let attr = parse_prefix_sid_attribute(Bytes::from(hex::decode(
        "0500220001001e002001000000000000000000000000000000001300010006282018001010",
    )?))?;
    assert_eq!(attr.srv6_sids(), vec!["2001::".parse::<Ipv6Addr>()?]);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn models_serialize() -> anyhow::Result<()> {
    let nlri = parse_sr_policy_nlri(Bytes::from_static(&[
        96, 0, 0, 0, 1, 0, 0, 0, 100, 192, 0, 2, 1,
    ]))?;
    let json = serde_json::to_value(nlri)?;
    assert_eq!(json["color"], 100);
    assert_eq!(json["endpoint"], "192.0.2.1");

    let back: SrPolicyNlri = serde_json::from_value(json)?;
    assert_eq!(back, nlri);
    Ok(())
}
