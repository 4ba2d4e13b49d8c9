#![no_main]
use bgpkit_srte::parser::bgp::nlri::*;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = parse_rtc_nlri_list(bytes.clone(), false);
    let _ = parse_rtc_nlri_list(bytes.clone(), true);
    let _ = parse_sr_policy_nlri(bytes.clone());
    let _ = parse_te_policy_nlri(bytes.clone());
    let _ = parse_srv6_sid_nlri(bytes);
});
