//! Typed Rust client for the EgoSMS / Comms bulk-SMS JSON API.
//!
//! The crate is split into a domain layer of strong types (credentials, message
//! text, sender ids, number normalization), a transport layer for the gateway's
//! JSON quirks, and a small client layer that authenticates lazily and
//! orchestrates `SendSms` and `Balance` requests.
//!
//! ```rust,no_run
//! use egosms::{Credentials, EgoSmsClient, Environment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), egosms::EgoSmsError> {
//!     let client = EgoSmsClient::builder(Credentials::api_key("user", "...")?)
//!         .environment(Environment::Sandbox)
//!         .build()?;
//!
//!     if client.send_sms(["+256772123456", "0701234567"], "Hello").await? {
//!         println!("balance: {:?}", client.get_balance().await?);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    CredentialKind, Credentials, EgoSmsClient, EgoSmsClientBuilder, EgoSmsError, Environment,
    SendOutcome,
};
pub use domain::{
    Amount, CountryCode, GatewayResponse, MessageText, NormalizedNumber, NumberNormalizer,
    Priority, SendOptions, SendSms, SenderId, Status, ValidationError,
};
