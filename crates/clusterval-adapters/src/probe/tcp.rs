//! TCP connect probe.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use clusterval_core::application::ports::ServiceProbe;
use tracing::debug;

/// Opens one connection per resolved address until one succeeds.
#[derive(Debug, Clone, Copy)]
pub struct TcpServiceProbe {
    timeout: Duration,
}

impl TcpServiceProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ServiceProbe for TcpServiceProbe {
    fn connect(&self, host: &str, port: u16) -> io::Result<()> {
        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_stream) => {
                    debug!(%addr, "Connected");
                    return Ok(());
                }
                Err(e) => {
                    debug!(%addr, error = %e, "Connect failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address resolved for {host}"),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn probe() -> TcpServiceProbe {
        TcpServiceProbe::new(Duration::from_millis(500))
    }

    #[test]
    fn connects_to_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(probe().connect("127.0.0.1", port).is_ok());
    }

    #[test]
    fn closed_port_fails() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        assert!(probe().connect("127.0.0.1", port).is_err());
    }
}
