use std::net::IpAddr;

/// A parsed packet as delivered by the capture layer.
///
/// Ephemeral: consumed by one `Engine::handle_packet` call and dropped.
/// `wire_len` is the observed on-wire length, which may exceed the captured
/// payload slice.
#[derive(Debug, Clone)]
pub struct PacketMeta {
    pub src_ip: IpAddr,
    pub tcp_dst_port: Option<u16>,
    pub payload: Option<Vec<u8>>,
    pub wire_len: u64,
}

impl PacketMeta {
    pub fn new(src_ip: IpAddr, wire_len: u64) -> Self {
        Self {
            src_ip,
            tcp_dst_port: None,
            payload: None,
            wire_len,
        }
    }

    pub fn with_tcp(mut self, dst_port: u16) -> Self {
        self.tcp_dst_port = Some(dst_port);
        self
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }
}
