//! TCP service endpoint validations (consul, elasticsearch).
//!
//! Usage: `<domain> service <host> <port>`

use std::sync::Arc;

use tracing::{info, instrument};

use super::{Validator, ensure_args, unsupported};
use crate::{
    application::ports::ServiceProbe,
    error::{ErrorCode, ValidationError, ValidationResult},
};

const EXPECTED: &str = "<host> <port>";

/// Checks that a named service accepts connections.
pub struct ServiceValidator {
    service: &'static str,
    probe: Arc<dyn ServiceProbe>,
}

impl ServiceValidator {
    pub fn new(service: &'static str, probe: Arc<dyn ServiceProbe>) -> Self {
        Self { service, probe }
    }

    pub fn consul(probe: Arc<dyn ServiceProbe>) -> Self {
        Self::new("Consul", probe)
    }

    pub fn elasticsearch(probe: Arc<dyn ServiceProbe>) -> Self {
        Self::new("Elasticsearch", probe)
    }

    #[instrument(skip(self), fields(service = self.service))]
    pub fn validate_service(&self, host: &str, port: u16) -> ValidationResult<()> {
        self.probe.connect(host, port).map_err(|e| {
            ValidationError::new(
                ErrorCode::ConnectionRefused,
                format!("{} service is not reachable on {host}:{port}", self.service),
            )
            .with_source(e)
        })?;

        info!("Service endpoint accepted connection");
        Ok(())
    }
}

impl Validator for ServiceValidator {
    fn subtypes(&self) -> &'static [&'static str] {
        &["service"]
    }

    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()> {
        ensure_args(v_type, args, EXPECTED)?;
        if v_type != "service" {
            return Err(unsupported(v_type));
        }

        let (host, port) = match args {
            [host, port] => (host, port),
            [_] => {
                return Err(ValidationError::invalid_argument(format!(
                    "Insufficient parameters for '{v_type}': missing <port>"
                )));
            }
            _ => {
                return Err(ValidationError::invalid_argument(format!(
                    "Too many parameters for '{v_type}': expected {EXPECTED}"
                )));
            }
        };

        let port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ValidationError::invalid_argument(format!("Invalid port {port}.")))?;

        self.validate_service(host, port)
    }
}
