//! End-to-end engine behavior against a mock sender and recording sink

use arpwarden_core::{ethertypes, EthernetFrame, InterfaceBinding, MacAddr, Packet, Result};
use arpwarden_engine::{
    ArpEngine, ArpEvent, ArpOpcode, ArpPacket, FrameSender, RecordingSink, ScopeFilter,
    TEST_SCOPE_MAC,
};
use std::net::Ipv4Addr;

const LOCAL_IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 5);
const LOCAL_MAC: MacAddr = MacAddr([0xaa; 6]);
const PEER_IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 9);
const PEER_MAC: MacAddr = MacAddr([0xbb; 6]);

/// Sender that records every frame instead of transmitting
#[derive(Default)]
struct MockSender {
    sent: Vec<Vec<u8>>,
    fail: bool,
}

impl FrameSender for MockSender {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        if self.fail {
            return Err(arpwarden_core::Error::Transmission(
                "mock send failure".to_string(),
            ));
        }
        self.sent.push(frame.to_vec());
        Ok(())
    }
}

fn local_binding() -> InterfaceBinding {
    InterfaceBinding {
        ip: LOCAL_IP,
        mac: LOCAL_MAC,
    }
}

fn engine() -> ArpEngine<MockSender, RecordingSink> {
    ArpEngine::new(
        local_binding(),
        MockSender::default(),
        RecordingSink::default(),
    )
}

fn wrap(src: MacAddr, dst: MacAddr, arp: &ArpPacket) -> Packet {
    let frame = EthernetFrame::new(dst, src, ethertypes::ARP, arp.serialize());
    Packet::new("test0".to_string(), frame.to_bytes())
}

#[test]
fn test_request_for_local_ip_triggers_one_reply() {
    // Scenario A / P3
    let mut engine = engine();
    let request = ArpPacket::new_request(PEER_MAC, PEER_IP, LOCAL_IP);

    engine.handle_message(&request);

    // exactly one frame sent, zero table mutations, zero events
    assert_eq!(engine.sender().sent.len(), 1);
    assert!(engine.table().is_empty());
    assert!(engine.sink().events.is_empty());

    let frame = EthernetFrame::from_bytes(&engine.sender().sent[0]).unwrap();
    assert_eq!(frame.destination, PEER_MAC);
    assert_eq!(frame.source, LOCAL_MAC);
    assert_eq!(frame.ethertype, ethertypes::ARP);

    let reply = ArpPacket::parse(&frame.payload).unwrap();
    assert_eq!(reply.operation, ArpOpcode::Reply);
    assert_eq!(reply.sender_ip, LOCAL_IP);
    assert_eq!(reply.sender_mac, LOCAL_MAC);
    assert_eq!(reply.target_ip, PEER_IP);
    assert_eq!(reply.target_mac, PEER_MAC);
}

#[test]
fn test_reply_to_local_discovers_new_host() {
    // Scenario B
    let mut engine = engine();
    let reply = ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP);

    engine.handle_frame(&wrap(PEER_MAC, LOCAL_MAC, &reply));

    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
    assert_eq!(
        engine.sink().events,
        vec![ArpEvent::HostDiscovered {
            ip: PEER_IP,
            mac: PEER_MAC,
        }]
    );
    assert!(engine.sender().sent.is_empty());
    assert_eq!(
        engine.table().snapshot().get("10.0.0.9").map(String::as_str),
        Some("bb:bb:bb:bb:bb:bb")
    );
}

#[test]
fn test_reply_to_local_updates_changed_binding() {
    // Scenario C
    let mut engine = engine();
    let new_mac = MacAddr([0xcc; 6]);

    engine.handle_message(&ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP));
    engine.handle_message(&ArpPacket::new_reply(new_mac, PEER_IP, LOCAL_MAC, LOCAL_IP));

    assert_eq!(engine.table().lookup(PEER_IP), Some(new_mac));
    assert_eq!(
        engine.sink().events[1],
        ArpEvent::BindingChanged {
            ip: PEER_IP,
            old_mac: PEER_MAC,
            new_mac,
        }
    );
}

#[test]
fn test_repeated_reply_is_silent() {
    let mut engine = engine();
    let reply = ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP);

    engine.handle_message(&reply);
    engine.handle_message(&reply);

    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
    assert_eq!(engine.table().len(), 1);
    // only the initial discovery is reported
    assert_eq!(engine.sink().events.len(), 1);
}

#[test]
fn test_unsupported_opcode_reports_sender() {
    // Scenario D
    let mut engine = engine();
    let mut packet = ArpPacket::new_request(PEER_MAC, PEER_IP, LOCAL_IP);
    packet.operation = ArpOpcode::Other(5);

    engine.handle_message(&packet);

    assert!(engine.table().is_empty());
    assert!(engine.sender().sent.is_empty());
    assert_eq!(
        engine.sink().events,
        vec![ArpEvent::UnsupportedOpcode {
            opcode: 5,
            sender_ip: PEER_IP,
        }]
    );
}

#[test]
fn test_third_party_request_is_monitored_not_answered() {
    // P4: both endpoint pairs recorded, no reply sent
    let mut engine = engine();
    let other_ip = Ipv4Addr::new(10, 0, 0, 77);
    let other_mac = MacAddr([0xdd; 6]);

    let mut request = ArpPacket::new_request(PEER_MAC, PEER_IP, other_ip);
    request.target_mac = other_mac;

    engine.handle_message(&request);

    assert!(engine.sender().sent.is_empty());
    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
    assert_eq!(engine.table().lookup(other_ip), Some(other_mac));
    assert_eq!(engine.sink().events.len(), 2);
    assert!(engine
        .sink()
        .events
        .iter()
        .all(|e| matches!(e, ArpEvent::MonitorNewHost { .. })));
}

#[test]
fn test_monitor_branch_never_overwrites() {
    // P5: conflicting MAC in overheard traffic leaves the binding alone
    let mut engine = engine();
    let conflicting = MacAddr([0xee; 6]);

    // learn the binding authoritatively first
    engine.handle_message(&ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP));

    // overheard claim of a different MAC for the same IP
    let request = ArpPacket::new_request(conflicting, PEER_IP, Ipv4Addr::new(10, 0, 0, 77));
    engine.handle_message(&request);

    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
    assert!(engine.sink().events.iter().any(|e| matches!(
        e,
        ArpEvent::MonitorMacMismatch {
            ip,
            known_mac,
            seen_mac,
        } if *ip == PEER_IP && *known_mac == PEER_MAC && *seen_mac == conflicting
    )));
}

#[test]
fn test_send_failure_is_not_fatal() {
    let mut engine = ArpEngine::new(
        local_binding(),
        MockSender {
            sent: Vec::new(),
            fail: true,
        },
        RecordingSink::default(),
    );

    engine.handle_message(&ArpPacket::new_request(PEER_MAC, PEER_IP, LOCAL_IP));

    assert!(engine
        .sink()
        .events
        .iter()
        .any(|e| matches!(e, ArpEvent::SendFailed { recipient, .. } if *recipient == PEER_IP)));

    // engine keeps working after a failed transmit
    engine.handle_message(&ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP));
    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
}

#[test]
fn test_scoped_filter_drops_out_of_scope_frames() {
    let mut engine = engine().with_filter(ScopeFilter::test_scope());
    let reply = ArpPacket::new_reply(PEER_MAC, PEER_IP, LOCAL_MAC, LOCAL_IP);

    // out of scope: neither endpoint is the test MAC
    engine.handle_frame(&wrap(PEER_MAC, LOCAL_MAC, &reply));
    assert!(engine.table().is_empty());

    // in scope: sent from the test MAC
    engine.handle_frame(&wrap(TEST_SCOPE_MAC, LOCAL_MAC, &reply));
    assert_eq!(engine.table().lookup(PEER_IP), Some(PEER_MAC));
}

#[test]
fn test_non_arp_frames_are_ignored() {
    let mut engine = engine();
    let frame = EthernetFrame::new(LOCAL_MAC, PEER_MAC, ethertypes::IPV4, vec![0u8; 40]);

    engine.handle_frame(&Packet::new("test0".to_string(), frame.to_bytes()));

    assert!(engine.table().is_empty());
    assert!(engine.sink().events.is_empty());
}

#[test]
fn test_truncated_arp_payload_is_skipped() {
    let mut engine = engine();

    // built by hand: to_bytes would pad the payload past the 28-byte
    // ARP length and defeat the truncation
    let mut raw = Vec::new();
    raw.extend_from_slice(LOCAL_MAC.as_bytes());
    raw.extend_from_slice(PEER_MAC.as_bytes());
    raw.extend_from_slice(&ethertypes::ARP.to_be_bytes());
    raw.extend_from_slice(&[0u8; 10]);

    engine.handle_frame(&Packet::new("test0".to_string(), raw));

    assert!(engine.table().is_empty());
    assert!(engine.sink().events.is_empty());
}
