//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from file and HTTP errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude is out of range or not a finite number
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    /// Station name is empty after normalisation
    #[error("station name must not be empty")]
    EmptyStationName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCoordinate {
            lat: 91.0,
            lon: 0.0,
            reason: "latitude must be within [-90, 90]",
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate (91, 0): latitude must be within [-90, 90]"
        );

        let err = DomainError::EmptyStationName;
        assert_eq!(err.to_string(), "station name must not be empty");
    }
}
