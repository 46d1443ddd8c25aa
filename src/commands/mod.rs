pub mod macros;
pub mod session;

use crate::models::ProfileInput;

/// What the form shows before the user touches anything
#[tauri::command]
pub async fn get_default_profile() -> ProfileInput {
  ProfileInput::default()
}
