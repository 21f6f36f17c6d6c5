pub mod client;
pub mod config;


pub use client::MissionControlClient;
pub use config::ClientConfig;
