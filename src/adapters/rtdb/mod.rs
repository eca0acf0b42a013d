pub mod client;

pub use client::RtdbClient;
