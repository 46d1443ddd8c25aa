use crate::db::AppState;
use crate::session::{AuthStatus, LoginOutcome, SessionError};
use serde_json::json;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};

/// ---------------------------------------------------------------------------
/// Login
/// ---------------------------------------------------------------------------

/// Attempt an admin login. The outcome is returned to the caller either way;
/// a one-way `session:login` event carries the same result for the
/// notification layer.
#[tauri::command]
pub async fn login<R: tauri::Runtime>(
  app: AppHandle<R>,
  state: State<'_, Arc<AppState>>,
  username: String,
  password: String,
) -> Result<LoginOutcome, SessionError> {
  let outcome = state.session.login(&state.db, &username, &password).await?;

  if outcome.success {
    println!("Admin login succeeded for {}", username);
  } else {
    println!("Admin login rejected");
  }

  let _ = app.emit(
    "session:login",
    json!({
      "success": outcome.success,
      "username": outcome.success.then_some(username),
    }),
  );

  Ok(outcome)
}

/// ---------------------------------------------------------------------------
/// Logout
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn logout<R: tauri::Runtime>(
  app: AppHandle<R>,
  state: State<'_, Arc<AppState>>,
) -> Result<(), SessionError> {
  state.session.logout(&state.db).await?;

  println!("Admin logged out");
  let _ = app.emit("session:logout", json!({}));

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Auth Status
/// ---------------------------------------------------------------------------

/// The navigation layer polls this to decide between the protected views
/// and the credential form.
#[tauri::command]
pub async fn get_auth_status(
  state: State<'_, Arc<AppState>>,
) -> Result<AuthStatus, SessionError> {
  Ok(state.session.status())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
