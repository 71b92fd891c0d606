//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod auth;
mod environment;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::{
    CountryCode, GatewayResponse, MessageText, Method, NumberNormalizer, SendBatch, SendOptions,
    SendSms, SenderId, Status, ValidationError,
};
use crate::transport::{TransportError, decode_gateway_json_response, encode_request_json};

use self::auth::AuthGate;
pub use self::auth::{CredentialKind, Credentials};
pub use self::environment::{
    ENV_API_KEY, ENV_COUNTRY_CODE, ENV_ENDPOINT, ENV_ENVIRONMENT, ENV_SENDER_ID, ENV_USERNAME,
    Environment,
};

const REDACTED: &str = "<redacted>";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EgoSmsClient`].
///
/// Sends never return the transport-level variants; those are reported as
/// [`SendOutcome::Undelivered`]. Balance queries return them as errors.
pub enum EgoSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The gateway answered with a `Status` other than `OK` or `Failed`.
    #[error("unexpected response status: {status}")]
    UnexpectedStatus { status: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl EgoSmsError {
    /// Whether the request may not have reached the gateway or its reply was unusable.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_) | Self::Encode(_)
        )
    }
}

impl From<TransportError> for EgoSmsError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::UnexpectedStatus { status } => Self::UnexpectedStatus { status },
            other => Self::Parse(Box::new(other)),
        }
    }
}

#[derive(Debug)]
/// Result of a send that did not fail with an [`EgoSmsError`].
pub enum SendOutcome {
    /// The gateway accepted the messages.
    Sent(GatewayResponse),
    /// The gateway answered `Failed`; see [`GatewayResponse::message`] for the reason.
    Rejected(GatewayResponse),
    /// Credentials were not accepted, so nothing was sent.
    NotAuthenticated,
    /// None of the numbers survived normalization, so nothing was sent.
    NoValidNumbers,
    /// The request failed in transit or the reply could not be read.
    Undelivered(EgoSmsError),
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// Gateway reply, present for [`SendOutcome::Sent`] and [`SendOutcome::Rejected`].
    pub fn response(&self) -> Option<&GatewayResponse> {
        match self {
            Self::Sent(response) | Self::Rejected(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<GatewayResponse> {
        match self {
            Self::Sent(response) | Self::Rejected(response) => Some(response),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`EgoSmsClient`].
///
/// Use this when you need the sandbox, a custom endpoint, a different default
/// sender id or country code, or transport settings.
pub struct EgoSmsClientBuilder {
    credentials: Credentials,
    endpoint: String,
    sender_id: SenderId,
    country_code: CountryCode,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl EgoSmsClientBuilder {
    /// Create a builder for the live gateway with default sender id and country code.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: Environment::Live.endpoint().to_owned(),
            sender_id: SenderId::default(),
            country_code: CountryCode::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Point the client at a predefined gateway environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.endpoint = environment.endpoint().to_owned();
        self
    }

    /// Override the gateway endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Default sender id used when a send does not specify one.
    pub fn sender_id(mut self, sender_id: SenderId) -> Self {
        self.sender_id = sender_id;
        self
    }

    /// Country code substituted for a leading trunk `0`.
    pub fn country_code(mut self, country_code: CountryCode) -> Self {
        self.country_code = country_code;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`EgoSmsClient`]. The endpoint must be an absolute `http(s)` URL.
    pub fn build(self) -> Result<EgoSmsClient, EgoSmsError> {
        validate_endpoint(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| EgoSmsError::Transport(Box::new(err)))?;

        Ok(EgoSmsClient {
            credentials: self.credentials,
            endpoint: self.endpoint,
            sender_id: self.sender_id,
            normalizer: NumberNormalizer::new(self.country_code),
            auth: Arc::new(AuthGate::default()),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidEndpoint {
        input: endpoint.to_owned(),
        reason,
    };
    let url = url::Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

#[derive(Clone)]
/// High-level gateway client.
///
/// Owns the credentials, the default sender id and the authentication state.
/// Clones share the HTTP connection pool and the authentication state, so a
/// probe done through one clone authenticates all of them.
///
/// By default it talks to the live gateway (`https://comms.egosms.co/api/v1/json/`).
pub struct EgoSmsClient {
    credentials: Credentials,
    endpoint: String,
    sender_id: SenderId,
    normalizer: NumberNormalizer,
    auth: Arc<AuthGate>,
    http: Arc<dyn HttpTransport>,
}

impl EgoSmsClient {
    /// Create an unauthenticated client for the live gateway.
    ///
    /// For more customization, use [`EgoSmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: Environment::Live.endpoint().to_owned(),
            sender_id: SenderId::default(),
            normalizer: NumberNormalizer::default(),
            auth: Arc::new(AuthGate::default()),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> EgoSmsClientBuilder {
        EgoSmsClientBuilder::new(credentials)
    }

    /// Replace the default sender id.
    pub fn with_sender_id(mut self, sender_id: SenderId) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send `text` to `numbers` with the default sender id and highest priority.
    ///
    /// Returns `Ok(true)` only when the gateway accepted the messages. Expected
    /// failures (rejected credentials, no valid numbers, gateway rejection,
    /// transport failure) are `Ok(false)`.
    ///
    /// Errors:
    /// - [`EgoSmsError::Validation`] when `numbers` is empty or `text` is empty or a
    ///   single character (checked before any network call),
    /// - [`EgoSmsError::UnexpectedStatus`] when the gateway violates its protocol.
    pub async fn send_sms<I, S>(
        &self,
        numbers: I,
        text: impl Into<String>,
    ) -> Result<bool, EgoSmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_sms_with(numbers, text, SendOptions::default()).await
    }

    /// Like [`EgoSmsClient::send_sms`] with an explicit sender id and priority.
    pub async fn send_sms_with<I, S>(
        &self,
        numbers: I,
        text: impl Into<String>,
        options: SendOptions,
    ) -> Result<bool, EgoSmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = SendSms::new(numbers, MessageText::new(text)?, options)?;
        Ok(self.send(request).await?.is_sent())
    }

    /// Like [`EgoSmsClient::send_sms_with`] but returns the gateway reply.
    ///
    /// `Some` for accepted and rejected sends (the latter carries the gateway's
    /// reason in `message`), `None` when nothing was sent or the reply was lost.
    pub async fn query_send_sms<I, S>(
        &self,
        numbers: I,
        text: impl Into<String>,
        options: SendOptions,
    ) -> Result<Option<GatewayResponse>, EgoSmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = SendSms::new(numbers, MessageText::new(text)?, options)?;
        Ok(self.send(request).await?.into_response())
    }

    /// Send a prepared request and report exactly what happened.
    ///
    /// Errors:
    /// - [`EgoSmsError::UnexpectedStatus`] when the gateway violates its protocol.
    pub async fn send(&self, request: SendSms) -> Result<SendOutcome, EgoSmsError> {
        if !self.ensure_authenticated().await {
            warn!("credentials were not accepted; message not sent");
            return Ok(SendOutcome::NotAuthenticated);
        }

        let options = request.options();
        let sender_id = options.sender_id.as_ref().unwrap_or(&self.sender_id);
        if sender_id.exceeds_recommended_len() {
            warn!(
                sender_id = sender_id.as_str(),
                max = SenderId::MAX_RECOMMENDED_LEN,
                "sender id exceeds recommended length; some networks may truncate or reject messages"
            );
        }

        let numbers = self.normalizer.normalize(request.numbers());
        let Some(batch) = SendBatch::new(numbers, request.message(), sender_id, options.priority)
        else {
            warn!("no valid phone numbers provided; message not sent");
            return Ok(SendOutcome::NoValidNumbers);
        };

        match self.dispatch(Method::SendSms, Some(&batch)).await {
            Ok(response) => match response.status {
                Status::Ok => {
                    info!(
                        recipients = batch.len(),
                        follow_up_code = response.follow_up_code.as_deref().unwrap_or(""),
                        "message sent"
                    );
                    Ok(SendOutcome::Sent(response))
                }
                Status::Failed => {
                    warn!(
                        reason = response.message.as_deref().unwrap_or("no reason given"),
                        "gateway rejected message"
                    );
                    Ok(SendOutcome::Rejected(response))
                }
            },
            Err(err) if err.is_transport_failure() => {
                error!(error = %err, "failed to send message");
                self.log_request(&batch);
                Ok(SendOutcome::Undelivered(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Query the account balance and return the full gateway reply.
    ///
    /// Returns `Ok(None)` when the credentials are not accepted.
    ///
    /// Errors:
    /// - [`EgoSmsError::Transport`], [`EgoSmsError::HttpStatus`] and
    ///   [`EgoSmsError::Parse`] are returned rather than reported as a missing
    ///   balance,
    /// - [`EgoSmsError::UnexpectedStatus`] when the gateway violates its protocol.
    pub async fn query_balance(&self) -> Result<Option<GatewayResponse>, EgoSmsError> {
        if !self.ensure_authenticated().await {
            warn!("credentials were not accepted; balance not queried");
            return Ok(None);
        }

        let response = self
            .dispatch(Method::Balance, None)
            .await
            .inspect_err(|err| error!(error = %err, "failed to query balance"))?;
        Ok(Some(response))
    }

    /// Query the account balance as a number.
    ///
    /// Returns `Ok(None)` when the credentials are not accepted, the gateway
    /// answered `Failed`, or the balance is missing or not numeric. Errors are the
    /// same as for [`EgoSmsClient::query_balance`].
    pub async fn get_balance(&self) -> Result<Option<f64>, EgoSmsError> {
        let Some(response) = self.query_balance().await? else {
            return Ok(None);
        };
        if response.status.is_failed() {
            warn!(
                reason = response.message.as_deref().unwrap_or("no reason given"),
                "gateway rejected balance query"
            );
            return Ok(None);
        }

        let Some(balance) = response.balance else {
            warn!("balance missing from gateway response");
            return Ok(None);
        };
        let value = balance.to_f64();
        if value.is_none() {
            warn!(balance = balance.as_str(), "balance is not numeric");
        }
        Ok(value)
    }

    async fn dispatch(
        &self,
        method: Method,
        batch: Option<&SendBatch>,
    ) -> Result<GatewayResponse, EgoSmsError> {
        let body = encode_request_json(
            method,
            self.credentials.username(),
            self.credentials.secret().expose(),
            batch,
        )
        .map_err(EgoSmsError::Encode)?;

        let response = self
            .http
            .post_json(&self.endpoint, body)
            .await
            .map_err(EgoSmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(EgoSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(decode_gateway_json_response(&response.body)?)
    }

    fn log_request(&self, batch: &SendBatch) {
        // Serialization failures here must not mask the send error.
        if let Ok(request) = encode_request_json(
            Method::SendSms,
            self.credentials.username(),
            REDACTED,
            Some(batch),
        ) {
            warn!(%request, "request that failed");
        }
    }
}
