//! Upstream HTTP clients.

pub mod portal;

pub use portal::PortalClient;
