use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    SingleCharacterMessage,
    InvalidCountryCode { input: String },
    InvalidEndpoint { input: String, reason: String },
    UnknownEnvironment { input: String },
    MissingSetting { name: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::SingleCharacterMessage => {
                write!(f, "message must not be a single character")
            }
            Self::InvalidCountryCode { input } => {
                write!(f, "invalid country code: {input} (expected exactly 3 digits)")
            }
            Self::InvalidEndpoint { input, reason } => {
                write!(f, "invalid endpoint url: {input} ({reason})")
            }
            Self::UnknownEnvironment { input } => {
                write!(f, "unknown environment: {input} (expected live or sandbox)")
            }
            Self::MissingSetting { name } => write!(f, "{name} must be set"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "numbers" };
        assert_eq!(err.to_string(), "numbers must not be empty");

        let err = ValidationError::SingleCharacterMessage;
        assert_eq!(err.to_string(), "message must not be a single character");

        let err = ValidationError::InvalidCountryCode {
            input: "44".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid country code: 44 (expected exactly 3 digits)"
        );

        let err = ValidationError::UnknownEnvironment {
            input: "staging".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown environment: staging (expected live or sandbox)"
        );

        let err = ValidationError::MissingSetting {
            name: "EGOSMS_USERNAME",
        };
        assert_eq!(err.to_string(), "EGOSMS_USERNAME must be set");
    }
}
