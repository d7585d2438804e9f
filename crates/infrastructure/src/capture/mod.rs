pub mod sniffer;

pub use sniffer::PacketSniffer;
