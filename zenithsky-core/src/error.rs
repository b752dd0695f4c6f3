use thiserror::Error;

/// Why a forecast could not be shown.
///
/// The `Display` text of each variant is the message shown in the error area,
/// so callers never need to inspect transport or decoding errors themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Empty city input; rejected before any request is made.
    #[error("Please enter a city.")]
    Validation,

    /// Timeout, DNS or connection failure, or a non-2xx answer without an error payload.
    #[error("Error fetching weather data.")]
    NetworkFailure,

    /// The service answered with an error payload for the requested location.
    #[error("City not found.")]
    LocationNotFound,

    /// The body was not a forecast document or lacked required fields.
    #[error("Received an unreadable forecast from the weather service.")]
    ParseFailure,

    /// The service refused the configured API key.
    #[error("The weather service rejected the API key.")]
    ApiKeyRejected,
}

impl ErrorKind {
    /// Short machine-friendly name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NetworkFailure => "network_failure",
            ErrorKind::LocationNotFound => "location_not_found",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::ApiKeyRejected => "api_key_rejected",
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_error_area_text() {
        assert_eq!(ErrorKind::Validation.user_message(), "Please enter a city.");
        assert_eq!(
            ErrorKind::NetworkFailure.user_message(),
            "Error fetching weather data."
        );
        assert_eq!(
            ErrorKind::LocationNotFound.user_message(),
            "City not found."
        );
    }

    #[test]
    fn parse_failure_is_distinct_from_network_failure() {
        assert_ne!(
            ErrorKind::ParseFailure.user_message(),
            ErrorKind::NetworkFailure.user_message()
        );
    }
}
