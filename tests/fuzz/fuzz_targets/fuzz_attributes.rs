#![no_main]
use bgpkit_srte::models::ProtocolId;
use bgpkit_srte::parser::bgp::attributes::*;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = parse_pmsi_tunnel(bytes.clone());
    let _ = parse_prefix_sid_attribute(bytes.clone());
    let _ = parse_sr_policy_tunnel_encapsulation(bytes.clone());
    let _ = parse_sr_policy_tlv(bytes.clone());
    // SID layouts differ between IS-IS and OSPF
    let _ = parse_link_state_sr_tlvs(bytes.clone(), ProtocolId::IsisL2);
    let _ = parse_link_state_sr_tlvs(bytes, ProtocolId::Ospfv3);
});
