pub mod agenda;
pub mod caja;
pub mod cita;
pub mod commission;
pub mod roles;

use std::sync::Arc;

use salon_client::notify::report;
use salon_client::{ClientConfig, ClientError, HttpClient, Notifier, SalonApi};
use serde::de::DeserializeOwned;

use crate::console::ConsoleNotifier;

/// What every command needs to talk to the backend
#[derive(Clone)]
pub struct Context {
    pub api: Arc<dyn SalonApi>,
    pub notifier: Arc<dyn Notifier>,
}

impl Context {
    pub fn connect(config: &ClientConfig) -> anyhow::Result<Self> {
        tracing::debug!(base_url = %config.base_url, timeout = config.timeout, "Connecting");
        let client: HttpClient = config.build_http_client()?;
        Ok(Self {
            api: Arc::new(client),
            notifier: Arc::new(ConsoleNotifier),
        })
    }

    /// Toast a failed direct API call and hand the error back
    pub fn fail(&self, context: &str, err: ClientError) -> ClientError {
        report(self.notifier.as_ref(), context, &err);
        err
    }
}

/// Parse a snake_case enum value the way the backend spells it
pub fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown value '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::commission::CommissionType;
    use shared::models::{AppointmentState, MovementKind, PaymentMethod};

    #[test]
    fn test_parse_enum_accepts_backend_spelling() {
        assert_eq!(
            parse_enum::<AppointmentState>("client_arrived").unwrap(),
            AppointmentState::ClientArrived
        );
        assert_eq!(parse_enum::<MovementKind>("egreso").unwrap(), MovementKind::Out);
        assert_eq!(parse_enum::<PaymentMethod>("tarjeta").unwrap(), PaymentMethod::Card);
        assert_eq!(
            parse_enum::<CommissionType>("fixed").unwrap(),
            CommissionType::Fixed
        );
    }

    #[test]
    fn test_parse_enum_rejects_unknown() {
        assert_eq!(
            parse_enum::<MovementKind>("sideways").unwrap_err(),
            "unknown value 'sideways'"
        );
    }
}
