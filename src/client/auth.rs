//! Credentials and the authorization gate.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::EgoSmsClient;
use crate::domain::{Method, Secret, Username, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the secret was issued. Both kinds travel identically on the wire.
pub enum CredentialKind {
    ApiKey,
    Password,
}

#[derive(Debug, Clone)]
/// Account credentials sent in the `userdata` block of every request.
///
/// Use [`Credentials::api_key`] for API-key accounts or [`Credentials::password`]
/// for username/password accounts.
pub struct Credentials {
    username: Username,
    secret: Secret,
    kind: CredentialKind,
}

impl Credentials {
    /// Create username + API key credentials; both must be non-empty after trimming.
    pub fn api_key(
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            secret: Secret::new(api_key)?,
            kind: CredentialKind::ApiKey,
        })
    }

    /// Create username + password credentials; both must be non-empty after trimming.
    pub fn password(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            secret: Secret::new(password)?,
            kind: CredentialKind::Password,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }
}

/// Per-client authentication state.
///
/// Only one probe runs at a time. Callers that queued behind a probe reuse its
/// result instead of issuing their own.
#[derive(Debug, Default)]
pub(super) struct AuthGate {
    authenticated: AtomicBool,
    probes: AtomicU64,
    last_result: Mutex<bool>,
}

impl AuthGate {
    pub(super) fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub(super) fn mark_authenticated(&self) {
        self.authenticated.store(true, Ordering::Release);
    }

    /// Return `true` if already authenticated, otherwise run (or join) a probe.
    pub(super) async fn ensure<F, Fut>(&self, probe: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.is_authenticated() {
            return true;
        }
        let observed = self.probes.load(Ordering::Acquire);
        let mut last_result = self.last_result.lock().await;
        if self.is_authenticated() {
            return true;
        }
        if self.probes.load(Ordering::Acquire) != observed {
            return *last_result;
        }
        self.run(&mut last_result, probe).await
    }

    /// Always probe, still serialized with concurrent [`AuthGate::ensure`] callers.
    pub(super) async fn force<F, Fut>(&self, probe: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let mut last_result = self.last_result.lock().await;
        self.run(&mut last_result, probe).await
    }

    async fn run<F, Fut>(&self, last_result: &mut bool, probe: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let accepted = probe().await;
        if accepted {
            self.authenticated.store(true, Ordering::Release);
        }
        *last_result = accepted;
        self.probes.fetch_add(1, Ordering::AcqRel);
        accepted
    }
}

impl EgoSmsClient {
    /// Validate the credentials against the gateway with a `Balance` probe.
    ///
    /// Returns `true` and marks the client authenticated when the gateway answers
    /// `OK`. Any other outcome (rejection, transport failure, malformed reply) is
    /// logged and yields `false`; the client is never left half-authenticated.
    pub async fn authenticate(&self) -> bool {
        self.auth.force(|| self.probe_credentials()).await
    }

    /// Whether a credential probe has succeeded for this client (or any clone of it).
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub(super) async fn ensure_authenticated(&self) -> bool {
        if self.auth.is_authenticated() {
            return true;
        }
        warn!(
            username = self.credentials.username().as_str(),
            "client is not authenticated; validating credentials"
        );
        self.auth.ensure(|| self.probe_credentials()).await
    }

    async fn probe_credentials(&self) -> bool {
        let username = self.credentials.username().as_str();
        match self.dispatch(Method::Balance, None).await {
            Ok(response) if response.status.is_ok() => {
                info!(
                    username,
                    kind = ?self.credentials.kind(),
                    "credentials validated"
                );
                true
            }
            Ok(response) => {
                error!(
                    username,
                    reason = response.message.as_deref().unwrap_or("no reason given"),
                    "credential validation failed: gateway rejected credentials"
                );
                false
            }
            Err(err) => {
                error!(username, error = %err, "credential validation failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;

    #[test]
    fn constructors_validate_inputs() {
        assert!(Credentials::api_key("", "key").is_err());
        assert!(Credentials::api_key("user", "   ").is_err());
        assert!(Credentials::password("   ", "pw").is_err());

        let creds = Credentials::password(" user ", "pw").unwrap();
        assert_eq!(creds.username().as_str(), "user");
        assert_eq!(creds.secret().expose(), "pw");
        assert_eq!(creds.kind(), CredentialKind::Password);
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials::api_key("user", "super-secret").unwrap();
        assert!(!format!("{creds:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn gate_skips_probe_once_authenticated() {
        let gate = AuthGate::default();
        let calls = AtomicUsize::new(0);

        assert!(gate.ensure(|| async { calls.fetch_add(1, Ordering::SeqCst) == 0 }).await);
        assert!(gate.ensure(|| async { calls.fetch_add(1, Ordering::SeqCst) == 0 }).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn gate_retries_after_earlier_failure() {
        let gate = AuthGate::default();
        assert!(!gate.ensure(|| async { false }).await);
        assert!(!gate.is_authenticated());
        assert!(gate.ensure(|| async { true }).await);
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn concurrent_waiters_share_one_probe() {
        let gate = Arc::new(AuthGate::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let probe = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            false
        };

        let (a, b) = tokio::join!(
            gate.ensure(|| probe(calls.clone())),
            gate.ensure(|| probe(calls.clone()))
        );
        assert!(!a);
        assert!(!b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn force_never_resets_authentication() {
        let gate = AuthGate::default();
        gate.mark_authenticated();
        assert!(!gate.force(|| async { false }).await);
        assert!(gate.is_authenticated());
    }
}
