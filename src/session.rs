use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Mutex;

use crate::db::DbPool;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const ADMIN_USERNAME: &str = "Tanish";
const ADMIN_PASSWORD: &str = "Tanish@123";

/// Storage key for the persisted session flag. The value is the literal
/// string "true"; the row is deleted on logout.
const AUTH_FLAG_KEY: &str = "gym_admin_auth";
const AUTH_FLAG_TRUE: &str = "true";

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// ---------------------------------------------------------------------------
/// Credential Verification
/// ---------------------------------------------------------------------------

/// Capability the gate uses to check a username/password pair. The gate's
/// state machine never sees the credentials themselves, so a deployment can
/// swap in a real credential store without touching it.
pub trait CredentialVerifier: Send + Sync {
  fn verify(&self, username: &str, password: &str) -> bool;
}

/// The built-in single admin identity: exact, case-sensitive matches
/// against a fixed pair.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
  pub username: String,
  pub password: String,
}

impl Default for FixedCredentials {
  fn default() -> Self {
    Self {
      username: ADMIN_USERNAME.to_string(),
      password: ADMIN_PASSWORD.to_string(),
    }
  }
}

impl FixedCredentials {
  /// Read GYM_ADMIN_USERNAME / GYM_ADMIN_PASSWORD overrides, keeping the
  /// built-in pair for whichever is unset.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      username: env::var("GYM_ADMIN_USERNAME").unwrap_or(defaults.username),
      password: env::var("GYM_ADMIN_PASSWORD").unwrap_or(defaults.password),
    }
  }
}

impl CredentialVerifier for FixedCredentials {
  fn verify(&self, username: &str, password: &str) -> bool {
    username == self.username && password == self.password
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
  #[error("Database error: {0}")]
  Database(String),
}

impl Serialize for SessionError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Session State
/// ---------------------------------------------------------------------------

/// In-memory session. Anonymous by default; authenticated after a
/// successful login or a restored flag.
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub is_authenticated: bool,
  pub username: Option<String>,
  pub logged_in_at: Option<DateTime<Utc>>,
}

/// Result of a login attempt. A credential mismatch is data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
  pub success: bool,
  pub error: Option<String>,
}

impl LoginOutcome {
  fn ok() -> Self {
    Self {
      success: true,
      error: None,
    }
  }

  fn invalid_credentials() -> Self {
    Self {
      success: false,
      error: Some(INVALID_CREDENTIALS.to_string()),
    }
  }
}

/// What the navigation layer sees
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
  pub is_authenticated: bool,
  pub username: Option<String>,
  pub logged_in_at: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Session Gate
/// ---------------------------------------------------------------------------

/// Owns the in-memory session and the persisted flag lifecycle.
///
/// Two states: Anonymous and Authenticated. Anonymous -> Authenticated via
/// `login` or a truthy persisted flag at startup; Authenticated -> Anonymous
/// via `logout`. There are no other transitions.
pub struct SessionGate {
  session: Mutex<Session>,
  verifier: Box<dyn CredentialVerifier>,
  admin_username: String,
}

impl SessionGate {
  pub fn new<V>(verifier: V, admin_username: impl Into<String>) -> Self
  where
    V: CredentialVerifier + 'static,
  {
    Self {
      session: Mutex::new(Session::default()),
      verifier: Box::new(verifier),
      admin_username: admin_username.into(),
    }
  }

  pub fn with_fixed_credentials(credentials: FixedCredentials) -> Self {
    let admin_username = credentials.username.clone();
    Self::new(credentials, admin_username)
  }

  fn session(&self) -> std::sync::MutexGuard<'_, Session> {
    // A panic while holding the guard only poisons the session flag;
    // recover the inner value rather than propagating the poison.
    self.session.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Attempt a login. On a match the session becomes authenticated and the
  /// flag is persisted; on a mismatch the outcome carries a generic error
  /// and nothing changes. No attempt counting, no lockout.
  pub async fn login(
    &self,
    db: &DbPool,
    username: &str,
    password: &str,
  ) -> Result<LoginOutcome, SessionError> {
    if !self.verifier.verify(username, password) {
      return Ok(LoginOutcome::invalid_credentials());
    }

    save_auth_flag(db).await?;

    let mut session = self.session();
    session.is_authenticated = true;
    session.username = Some(username.to_string());
    session.logged_in_at = Some(Utc::now());

    Ok(LoginOutcome::ok())
  }

  /// Clear the in-memory session and delete the persisted flag,
  /// regardless of current state.
  pub async fn logout(&self, db: &DbPool) -> Result<(), SessionError> {
    clear_auth_flag(db).await?;
    *self.session() = Session::default();
    Ok(())
  }

  /// Re-establish an authenticated session from the persisted flag.
  /// Called once at startup. The flag carries no proof of identity, so a
  /// present, truthy row is taken at face value for the admin username.
  /// Returns whether a session was restored.
  pub async fn restore(&self, db: &DbPool) -> Result<bool, SessionError> {
    if !load_auth_flag(db).await? {
      return Ok(false);
    }

    let mut session = self.session();
    session.is_authenticated = true;
    session.username = Some(self.admin_username.clone());
    session.logged_in_at = None;

    Ok(true)
  }

  pub fn status(&self) -> AuthStatus {
    let session = self.session();
    AuthStatus {
      is_authenticated: session.is_authenticated,
      username: session.username.clone(),
      logged_in_at: session.logged_in_at.map(|at| at.to_rfc3339()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Persisted Flag Helpers
/// ---------------------------------------------------------------------------

async fn save_auth_flag(db: &DbPool) -> Result<(), SessionError> {
  sqlx::query(
    r#"
        INSERT INTO session_state (key, value)
        VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value
        "#,
  )
  .bind(AUTH_FLAG_KEY)
  .bind(AUTH_FLAG_TRUE)
  .execute(db)
  .await
  .map_err(|e| SessionError::Database(e.to_string()))?;

  Ok(())
}

async fn load_auth_flag(db: &DbPool) -> Result<bool, SessionError> {
  let value: Option<String> =
    sqlx::query_scalar("SELECT value FROM session_state WHERE key = ?1")
      .bind(AUTH_FLAG_KEY)
      .fetch_optional(db)
      .await
      .map_err(|e| SessionError::Database(e.to_string()))?;

  Ok(value.as_deref() == Some(AUTH_FLAG_TRUE))
}

async fn clear_auth_flag(db: &DbPool) -> Result<(), SessionError> {
  sqlx::query("DELETE FROM session_state WHERE key = ?1")
    .bind(AUTH_FLAG_KEY)
    .execute(db)
    .await
    .map_err(|e| SessionError::Database(e.to_string()))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
