use apollo_application::Engine;
use apollo_domain::{DomainError, PacketMeta};
use pnet::datalink::{self, Channel, NetworkInterface};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::tcp::TcpPacket;
use pnet::packet::Packet;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// Datalink capture source.
///
/// Runs a blocking read loop on a dedicated OS thread and feeds every IP
/// packet into the engine. Non-IP frames are dropped here — the engine
/// only ever sees traffic with a source address.
pub struct PacketSniffer {
    interface: NetworkInterface,
}

impl PacketSniffer {
    /// Bind to `name`, or auto-pick the first up, non-loopback interface
    /// with an address.
    pub fn open(name: Option<&str>) -> Result<Self, DomainError> {
        let interfaces = datalink::interfaces();
        let interface = match name {
            Some(wanted) => interfaces
                .into_iter()
                .find(|iface| iface.name == wanted)
                .ok_or_else(|| DomainError::Capture(format!("no such interface: {wanted}")))?,
            None => interfaces
                .into_iter()
                .find(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
                .ok_or_else(|| {
                    DomainError::Capture("no usable capture interface found".to_string())
                })?,
        };
        Ok(Self { interface })
    }

    pub fn interface_name(&self) -> &str {
        &self.interface.name
    }

    /// Blocking capture loop. Per-packet faults never abort the loop; only
    /// channel-level errors propagate.
    pub fn run(&self, engine: Arc<Engine>) -> Result<(), DomainError> {
        let mut rx = match datalink::channel(&self.interface, datalink::Config::default()) {
            Ok(Channel::Ethernet(_tx, rx)) => rx,
            Ok(_) => {
                return Err(DomainError::Capture(
                    "unsupported datalink channel type".to_string(),
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(DomainError::CapturePermission(e.to_string()))
            }
            Err(e) => return Err(DomainError::Capture(e.to_string())),
        };

        info!(interface = %self.interface.name, "Capture started, observing all traffic");

        loop {
            match rx.next() {
                Ok(frame) => {
                    if let Some(packet) = parse_frame(frame) {
                        engine.handle_packet(&packet);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(DomainError::Capture(e.to_string())),
            }
        }
    }
}

/// Parse an Ethernet frame into the engine's packet shape.
///
/// Returns `None` for anything without an IP layer.
pub fn parse_frame(frame: &[u8]) -> Option<PacketMeta> {
    let ethernet = EthernetPacket::new(frame)?;
    let wire_len = frame.len() as u64;
    match ethernet.get_ethertype() {
        EtherTypes::Ipv4 => {
            let ip = Ipv4Packet::new(ethernet.payload())?;
            let src = IpAddr::V4(ip.get_source());
            let meta = PacketMeta::new(src, wire_len);
            if ip.get_next_level_protocol() == IpNextHeaderProtocols::Tcp {
                Some(attach_tcp(meta, ip.payload()))
            } else {
                Some(meta)
            }
        }
        EtherTypes::Ipv6 => {
            let ip = Ipv6Packet::new(ethernet.payload())?;
            let src = IpAddr::V6(ip.get_source());
            let meta = PacketMeta::new(src, wire_len);
            if ip.get_next_header() == IpNextHeaderProtocols::Tcp {
                Some(attach_tcp(meta, ip.payload()))
            } else {
                Some(meta)
            }
        }
        _ => None,
    }
}

fn attach_tcp(meta: PacketMeta, segment: &[u8]) -> PacketMeta {
    match TcpPacket::new(segment) {
        Some(tcp) => {
            let meta = meta.with_tcp(tcp.get_destination());
            let data = tcp.payload();
            if data.is_empty() {
                meta
            } else {
                meta.with_payload(data.to_vec())
            }
        }
        None => meta,
    }
}
