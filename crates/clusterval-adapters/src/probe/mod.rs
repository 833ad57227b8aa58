//! Network probe adapters.

mod ping;
mod tcp;

pub use ping::PingProbe;
pub use tcp::TcpServiceProbe;
