use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// JSON field name used inside `userdata` (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Account secret: either an API key or a password.
///
/// Invariant: non-empty after trimming (the value itself is preserved as provided).
/// The gateway always receives it in the `password` field.
pub struct Secret(String);

impl Secret {
    /// JSON field name used inside `userdata` (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Secret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id shown to recipients (`senderid`).
///
/// Invariant: non-empty after trimming. Values longer than
/// [`SenderId::MAX_RECOMMENDED_LEN`] are accepted, but some networks truncate or
/// reject them.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used inside `msgdata` (`senderid`).
    pub const FIELD: &'static str = "senderid";

    /// Longest sender id every network is expected to deliver unchanged.
    pub const MAX_RECOMMENDED_LEN: usize = 11;

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the sender id exceeds [`SenderId::MAX_RECOMMENDED_LEN`] characters.
    pub fn exceeds_recommended_len(&self) -> bool {
        self.0.chars().count() > Self::MAX_RECOMMENDED_LEN
    }
}

impl Default for SenderId {
    fn default() -> Self {
        Self("EgoSMS".to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: not empty and not exactly one character long. The value is
/// preserved as provided.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used inside `msgdata` (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        match value.chars().count() {
            0 => Err(ValidationError::Empty { field: Self::FIELD }),
            1 => Err(ValidationError::SingleCharacterMessage),
            _ => Ok(Self(value)),
        }
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// International dialling prefix substituted for a leading trunk `0`.
///
/// Invariant: exactly three ASCII digits, so that rewritten numbers keep the
/// canonical twelve-digit shape.
pub struct CountryCode(String);

impl CountryCode {
    /// Create a validated [`CountryCode`]. A leading `+` is accepted and dropped.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCountryCode { input: value });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Borrow the digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    /// Uganda (`256`).
    fn default() -> Self {
        Self("256".to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in canonical international form without `+` (e.g. `256772123456`).
///
/// Only produced by [`NumberNormalizer`](crate::domain::NumberNormalizer).
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    /// JSON field name used inside `msgdata` (`number`).
    pub const FIELD: &'static str = "number";

    pub(crate) fn from_canonical(value: String) -> Self {
        Self(value)
    }

    /// Borrow the canonical digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Monetary or count value that the gateway reports as either a JSON number or a
/// numeric string (`Balance`, `Cost`).
///
/// The raw token is preserved (`10.00` stays `"10.00"`).
pub struct Amount(String);

impl Amount {
    /// Wrap a raw value as reported by the gateway.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw value as reported by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the value as a float; `None` when it is not numeric.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let username = Username::new(" user ").unwrap();
        assert_eq!(username.as_str(), "user");
        assert!(Username::new("   ").is_err());

        let secret = Secret::new(" key ").unwrap();
        assert_eq!(secret.expose(), " key ");
        assert!(Secret::new("").is_err());
        assert!(Secret::new("  ").is_err());

        let sender = SenderId::new(" Shop ").unwrap();
        assert_eq!(sender.as_str(), "Shop");
        assert!(SenderId::new(" ").is_err());
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("hunter2").unwrap();
        assert!(!format!("{secret:?}").contains("hunter2"));
    }

    #[test]
    fn message_text_rejects_empty_and_single_character() {
        assert_eq!(
            MessageText::new(""),
            Err(ValidationError::Empty {
                field: MessageText::FIELD
            })
        );
        assert_eq!(
            MessageText::new("A"),
            Err(ValidationError::SingleCharacterMessage)
        );
        assert_eq!(
            MessageText::new("é"),
            Err(ValidationError::SingleCharacterMessage)
        );
        assert_eq!(MessageText::new("Hi").unwrap().as_str(), "Hi");
    }

    #[test]
    fn sender_id_length_warning_threshold() {
        assert!(!SenderId::new("ElevenChars").unwrap().exceeds_recommended_len());
        assert!(SenderId::new("TwelveChars!").unwrap().exceeds_recommended_len());
        assert_eq!(SenderId::default().as_str(), "EgoSMS");
    }

    #[test]
    fn country_code_requires_three_digits() {
        assert_eq!(CountryCode::default().as_str(), "256");
        assert_eq!(CountryCode::new("+254").unwrap().as_str(), "254");
        assert!(CountryCode::new("44").is_err());
        assert!(CountryCode::new("25a").is_err());
        assert!(CountryCode::new("2560").is_err());
    }

    #[test]
    fn amount_parses_numeric_values_only() {
        assert_eq!(Amount::new("10.50").to_f64(), Some(10.5));
        assert_eq!(Amount::new(" 3 ").to_f64(), Some(3.0));
        assert_eq!(Amount::new("n/a").to_f64(), None);
        assert_eq!(Amount::new("NaN").to_f64(), None);
        assert_eq!(Amount::new("10.00").as_str(), "10.00");
    }
}
