use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use crate::domain::Amount;

/// `Cost` / `Balance` field as sent by the gateway.
///
/// String tokens are unquoted; every other token (numbers, but also booleans or
/// objects some gateway builds emit) is kept as the raw JSON text, so `10.00`
/// stays `"10.00"`. Whether the value is numeric is decided by [`Amount::to_f64`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportAmount(String);

impl TransportAmount {
    fn from_token(token: &str) -> Self {
        match serde_json::from_str::<String>(token) {
            Ok(text) => Self(text),
            Err(_) => Self(token.to_owned()),
        }
    }

    pub fn into_amount(self) -> Amount {
        Amount::new(self.0)
    }
}

impl<'de> Deserialize<'de> for TransportAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::from_token(raw.get()))
    }
}
