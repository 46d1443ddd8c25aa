use serde::{Deserialize, Serialize};

use crate::macros::{
  ActivityLevel, AGE_RANGE, DEFAULT_AGE, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, HEIGHT_CM_RANGE,
  WEIGHT_KG_RANGE,
};

/// ---------------------------------------------------------------------------
/// Input Constants
/// ---------------------------------------------------------------------------

pub const PROTEIN_PER_KG_MIN: f64 = 0.8;
pub const PROTEIN_PER_KG_MAX: f64 = 1.4;
pub const DEFAULT_PROTEIN_PER_KG: f64 = 1.0;

/// The adjustment presets the goal picker offers, besides maintenance (0)
pub const SURPLUS_OPTIONS: [i64; 5] = [100, 200, 300, 400, 500];
pub const DEFICIT_OPTIONS: [i64; 5] = [-100, -200, -300, -400, -500];

/// ---------------------------------------------------------------------------
/// Enumerations
/// ---------------------------------------------------------------------------

/// Collected on the profile form. The macro formula does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
  Male,
  Female,
}

/// Direction of the calorie adjustment, for display grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
  Surplus,
  Deficit,
  Maintenance,
}

impl GoalKind {
  pub fn from_adjustment(adjustment: i64) -> Self {
    match adjustment {
      a if a > 0 => GoalKind::Surplus,
      a if a < 0 => GoalKind::Deficit,
      _ => GoalKind::Maintenance,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
  #[error("Unsupported activity factor: {0}")]
  UnknownActivityFactor(f64),

  #[error("Unsupported calorie adjustment: {0}")]
  UnknownCalorieAdjustment(i64),
}

impl Serialize for ProfileError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Profile Input
/// ---------------------------------------------------------------------------

/// What the form submits: free-typed text for the numeric fields, plus the
/// picker selections. Text is sanitized here so the engine only ever sees
/// in-range numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProfileInput {
  pub age: String,
  pub height_cm: String,
  pub weight_kg: String,
  pub sex: Sex,
  pub activity_factor: f64,
  pub protein_per_kg: f64,
  pub calorie_adjustment: i64,
}

impl Default for RawProfileInput {
  fn default() -> Self {
    Self {
      age: DEFAULT_AGE.to_string(),
      height_cm: DEFAULT_HEIGHT_CM.to_string(),
      weight_kg: DEFAULT_WEIGHT_KG.to_string(),
      sex: Sex::Male,
      activity_factor: ActivityLevel::Sedentary.factor(),
      protein_per_kg: DEFAULT_PROTEIN_PER_KG,
      calorie_adjustment: 0,
    }
  }
}

/// A sanitized profile: every numeric field inside its documented closed
/// range, activity and adjustment drawn from their fixed sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
  pub age: i64,
  pub height_cm: i64,
  pub weight_kg: i64,
  pub sex: Sex,
  pub activity: ActivityLevel,
  pub protein_per_kg: f64,
  pub calorie_adjustment: i64,
}

impl Default for ProfileInput {
  fn default() -> Self {
    Self {
      age: DEFAULT_AGE,
      height_cm: DEFAULT_HEIGHT_CM,
      weight_kg: DEFAULT_WEIGHT_KG,
      sex: Sex::Male,
      activity: ActivityLevel::Sedentary,
      protein_per_kg: DEFAULT_PROTEIN_PER_KG,
      calorie_adjustment: 0,
    }
  }
}

impl ProfileInput {
  /// Sanitize a raw form submission.
  ///
  /// Numeric text falls back to the field default when it does not parse,
  /// then clamps to the documented range; the protein slider value clamps
  /// and snaps to its 0.1 steps. Activity factor and calorie adjustment
  /// must match one of their fixed options exactly.
  pub fn from_raw(raw: &RawProfileInput) -> Result<Self, ProfileError> {
    let activity = ActivityLevel::from_factor(raw.activity_factor)
      .ok_or(ProfileError::UnknownActivityFactor(raw.activity_factor))?;

    if raw.calorie_adjustment != 0
      && !SURPLUS_OPTIONS.contains(&raw.calorie_adjustment)
      && !DEFICIT_OPTIONS.contains(&raw.calorie_adjustment)
    {
      return Err(ProfileError::UnknownCalorieAdjustment(raw.calorie_adjustment));
    }

    Ok(Self {
      age: parse_clamped(&raw.age, DEFAULT_AGE, AGE_RANGE),
      height_cm: parse_clamped(&raw.height_cm, DEFAULT_HEIGHT_CM, HEIGHT_CM_RANGE),
      weight_kg: parse_clamped(&raw.weight_kg, DEFAULT_WEIGHT_KG, WEIGHT_KG_RANGE),
      sex: raw.sex,
      activity,
      protein_per_kg: quantize_protein(raw.protein_per_kg),
      calorie_adjustment: raw.calorie_adjustment,
    })
  }
}

/// Parse a free-typed numeric field, substituting the default when the text
/// is empty or not a number, then clamp into the closed range.
fn parse_clamped(text: &str, default: i64, range: std::ops::RangeInclusive<i64>) -> i64 {
  let value = text.trim().parse::<i64>().unwrap_or(default);
  value.clamp(*range.start(), *range.end())
}

/// Clamp the slider value into [0.8, 1.4] and snap it to the nearest 0.1
fn quantize_protein(value: f64) -> f64 {
  let clamped = value.clamp(PROTEIN_PER_KG_MIN, PROTEIN_PER_KG_MAX);
  (clamped * 10.0).round() / 10.0
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
