mod commands;
mod db;
mod macros;
mod models;
mod session;

#[cfg(test)]
mod test_utils;

use db::AppState;
use session::{FixedCredentials, SessionGate};
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tauri::Builder::default()
    .setup(|app| {
      // Initialize database and restore any persisted session
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle).await {
          Ok(pool) => {
            let gate = SessionGate::with_fixed_credentials(FixedCredentials::from_env());
            match gate.restore(&pool).await {
              Ok(true) => println!("Restored persisted admin session"),
              Ok(false) => {}
              Err(e) => eprintln!("Failed to restore session: {}", e),
            }

            let state = Arc::new(AppState {
              db: pool,
              session: gate,
            });
            app_handle.manage(state);
            println!("Database ready");
          }
          Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::get_default_profile,
      // Session commands
      commands::session::login,
      commands::session::logout,
      commands::session::get_auth_status,
      // Macro commands
      commands::macros::calculate_macros,
      commands::macros::get_activity_levels,
      commands::macros::get_adjustment_options,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
