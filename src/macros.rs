//! Deterministic macro engine
//!
//! Converts profile numbers into daily calorie and macronutrient
//! targets. All math lives here; the frontend only renders the results.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Formula Constants
/// ---------------------------------------------------------------------------

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
pub const FATS_KCAL_PER_GRAM: f64 = 9.0;

/// Calories left after protein are split 60/40 between carbs and fats
const CARBS_REMAINING_SHARE: f64 = 0.6;
const FATS_REMAINING_SHARE: f64 = 0.4;

/// Fallback profile used when a caller hands the engine a value outside
/// the documented ranges
pub const DEFAULT_AGE: i64 = 30;
pub const DEFAULT_HEIGHT_CM: i64 = 175;
pub const DEFAULT_WEIGHT_KG: i64 = 75;

pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 10..=100;
pub const HEIGHT_CM_RANGE: std::ops::RangeInclusive<i64> = 100..=250;
pub const WEIGHT_KG_RANGE: std::ops::RangeInclusive<i64> = 30..=300;

/// ---------------------------------------------------------------------------
/// Activity Levels
/// ---------------------------------------------------------------------------

/// The five multipliers the activity picker offers. Free-form factors
/// never reach the formula; selection is validated at the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
  Sedentary,        // 1.2
  LightlyActive,    // 1.375
  ModeratelyActive, // 1.55
  VeryActive,       // 1.725
  ExtraActive,      // 1.9
}

impl ActivityLevel {
  pub const ALL: [ActivityLevel; 5] = [
    ActivityLevel::Sedentary,
    ActivityLevel::LightlyActive,
    ActivityLevel::ModeratelyActive,
    ActivityLevel::VeryActive,
    ActivityLevel::ExtraActive,
  ];

  pub fn factor(&self) -> f64 {
    match self {
      ActivityLevel::Sedentary => 1.2,
      ActivityLevel::LightlyActive => 1.375,
      ActivityLevel::ModeratelyActive => 1.55,
      ActivityLevel::VeryActive => 1.725,
      ActivityLevel::ExtraActive => 1.9,
    }
  }

  /// Match a numeric factor back to its level. Returns None for
  /// anything that is not one of the five supported multipliers.
  pub fn from_factor(factor: f64) -> Option<Self> {
    Self::ALL
      .iter()
      .copied()
      .find(|level| (level.factor() - factor).abs() < 1e-9)
  }

  pub fn label(&self) -> &'static str {
    match self {
      ActivityLevel::Sedentary => "Sedentary (1.2)",
      ActivityLevel::LightlyActive => "Lightly Active (1.375)",
      ActivityLevel::ModeratelyActive => "Moderately Active (1.55)",
      ActivityLevel::VeryActive => "Very Active (1.725)",
      ActivityLevel::ExtraActive => "Extra Active (1.9)",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      ActivityLevel::Sedentary => "Little or no exercise",
      ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
      ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
      ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
      ActivityLevel::ExtraActive => "Very hard exercise & physical job",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Macro Result
/// ---------------------------------------------------------------------------

/// Daily targets derived from a profile. Values are unrounded; display
/// rounding belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroResult {
  pub bmr: f64,
  pub tdee: f64,
  pub adjusted_calories: f64,
  pub protein_grams: f64,
  pub carbs_grams: f64,
  pub fats_grams: f64,
}

impl MacroResult {
  /// Compute daily targets from raw numbers.
  ///
  /// BMR uses a Harris-Benedict variant without a sex term; the profile
  /// collects sex but the formula does not consume it. Age, height and
  /// weight are expected pre-clamped by the input layer; out-of-range
  /// values fall back to the fixed defaults instead of failing. The
  /// adjustment may be any number, including one large enough to push
  /// the carb/fat remainder negative - that flows through as-is.
  pub fn compute(
    age: i64,
    height_cm: i64,
    weight_kg: i64,
    activity_factor: f64,
    protein_per_kg: f64,
    calorie_adjustment: f64,
  ) -> Self {
    let age = if AGE_RANGE.contains(&age) { age } else { DEFAULT_AGE } as f64;
    let height = if HEIGHT_CM_RANGE.contains(&height_cm) {
      height_cm
    } else {
      DEFAULT_HEIGHT_CM
    } as f64;
    let weight = if WEIGHT_KG_RANGE.contains(&weight_kg) {
      weight_kg
    } else {
      DEFAULT_WEIGHT_KG
    } as f64;

    let bmr = 66.0 + 13.7 * weight + 5.0 * height - 6.8 * age;
    let tdee = bmr * activity_factor;
    let adjusted_calories = tdee + calorie_adjustment;

    let protein_grams = protein_per_kg * weight;
    let remaining = adjusted_calories - protein_grams * PROTEIN_KCAL_PER_GRAM;
    let carbs_grams = remaining * CARBS_REMAINING_SHARE / CARBS_KCAL_PER_GRAM;
    let fats_grams = remaining * FATS_REMAINING_SHARE / FATS_KCAL_PER_GRAM;

    Self {
      bmr,
      tdee,
      adjusted_calories,
      protein_grams,
      carbs_grams,
      fats_grams,
    }
  }

  pub fn protein_kcal(&self) -> f64 {
    self.protein_grams * PROTEIN_KCAL_PER_GRAM
  }

  pub fn carbs_kcal(&self) -> f64 {
    self.carbs_grams * CARBS_KCAL_PER_GRAM
  }

  pub fn fats_kcal(&self) -> f64 {
    self.fats_grams * FATS_KCAL_PER_GRAM
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
