#![forbid(unsafe_code)]

//! Error types for the page controllers.

use thiserror::Error;

use crate::field::FieldId;

/// Fallback text when the server reports a failure without a message.
pub const UNKNOWN_SERVER_ERROR: &str = "Error desconocido";

/// Failure building the prediction payload from form values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("field {0} is empty")]
    Missing(FieldId),
    #[error("field {field} is not a number: {value:?}")]
    NotNumeric { field: FieldId, value: String },
}

impl PayloadError {
    #[must_use]
    pub const fn field(&self) -> FieldId {
        match self {
            Self::Missing(field) | Self::NotNumeric { field, .. } => *field,
        }
    }

    /// What is wrong with the field, in the page's language.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Missing(_) => "está vacío".to_owned(),
            Self::NotNumeric { value, .. } => format!("\"{value}\" no es un número"),
        }
    }
}

/// Failure of one request/response exchange with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-2xx response. `message` is the server's `error` field, if any.
    #[error("server responded {status}: {}", .message.as_deref().unwrap_or(UNKNOWN_SERVER_ERROR))]
    Server { status: u16, message: Option<String> },
    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A response arrived but its body could not be decoded.
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl ClientError {
    /// Text shown to the user in a blocking message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => {
                format!(
                    "Error: {}",
                    message.as_deref().unwrap_or(UNKNOWN_SERVER_ERROR)
                )
            }
            Self::Transport(detail) | Self::Decode(detail) => {
                format!("Error de conexión: {detail}")
            }
            Self::Payload(err) => format!(
                "Por favor, revise el campo {}: {}.",
                err.field().label(),
                err.reason()
            ),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_falls_back_to_generic_text() {
        let err = ClientError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "Error: Error desconocido");

        let err = ClientError::Server {
            status: 400,
            message: Some("Campos faltantes: edad".into()),
        };
        assert_eq!(err.user_message(), "Error: Campos faltantes: edad");
    }

    #[test]
    fn transport_message_carries_description() {
        let err = ClientError::Transport("Failed to fetch".into());
        assert_eq!(err.user_message(), "Error de conexión: Failed to fetch");
    }

    #[test]
    fn payload_message_is_spanish_and_names_the_field_label() {
        let err = ClientError::from(PayloadError::Missing(FieldId::PlazoMeses));
        assert_eq!(
            err.user_message(),
            "Por favor, revise el campo Plazo (meses): está vacío."
        );

        let err = ClientError::from(PayloadError::NotNumeric {
            field: FieldId::PlazoMeses,
            value: "doce".into(),
        });
        assert_eq!(
            err.user_message(),
            "Por favor, revise el campo Plazo (meses): \"doce\" no es un número."
        );
    }
}
