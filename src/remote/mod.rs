//! Blocking HTTP client for a running frame server.

pub mod client;

// Re-export main types
pub use client::FrameClient;
