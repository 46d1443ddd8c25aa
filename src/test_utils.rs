//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use crate::models::profile::RawProfileInput;
use crate::session::{FixedCredentials, SessionGate};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Write the persisted session flag directly, as a prior run would have
pub async fn seed_auth_flag(pool: &SqlitePool) {
  sqlx::query("INSERT INTO session_state (key, value) VALUES ('gym_admin_auth', 'true')")
    .execute(pool)
    .await
    .expect("Failed to seed auth flag");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A gate wired to the built-in admin pair
pub fn test_session_gate() -> SessionGate {
  SessionGate::with_fixed_credentials(FixedCredentials::default())
}

/// The reference profile as the form would submit it:
/// 30yo, 175cm, 75kg, sedentary, 1.0 g/kg protein, maintenance
pub fn mock_raw_input() -> RawProfileInput {
  RawProfileInput::default()
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'session_state'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1, "Expected session_state table");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_auth_flag_writes_truthy_row() {
    let pool = setup_test_db().await;

    seed_auth_flag(&pool).await;

    let value: String =
      sqlx::query_scalar("SELECT value FROM session_state WHERE key = 'gym_admin_auth'")
        .fetch_one(&pool)
        .await
        .expect("Failed to read auth flag");
    assert_eq!(value, "true");

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let raw = mock_raw_input();
    assert_eq!(raw.age, "30");
    assert_eq!(raw.weight_kg, "75");
    assert_eq!(raw.calorie_adjustment, 0);

    let gate = test_session_gate();
    assert!(!gate.status().is_authenticated);
  }
}
