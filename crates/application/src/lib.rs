//! Apollo IPS Application Layer
//!
//! Owns the detection-and-response engine and the ports its adapters plug
//! into. No IO happens here: firewall commands, feed fetches and lookups
//! all go through the `ports` traits.
pub mod engine;
pub mod ports;

pub use engine::Engine;
