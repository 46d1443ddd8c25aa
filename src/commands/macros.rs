use crate::macros::{ActivityLevel, MacroResult};
use crate::models::profile::{
  GoalKind, ProfileError, ProfileInput, RawProfileInput, DEFICIT_OPTIONS, SURPLUS_OPTIONS,
};
use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Calculate Macros
/// ---------------------------------------------------------------------------

/// Integer daily target for one macro, with its calorie contribution
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MacroTarget {
  pub grams: i64,
  pub calories: i64,
}

/// Display-ready targets, rounded to whole kcal and grams
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MacroTargets {
  pub calories: i64,
  pub tdee: i64,
  pub protein: MacroTarget,
  pub carbs: MacroTarget,
  pub fats: MacroTarget,
}

/// Share of the adjusted calories each macro covers, in whole percent.
/// All zero when the adjusted total is not positive.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MacroDistribution {
  pub protein_pct: i64,
  pub carbs_pct: i64,
  pub fats_pct: i64,
}

/// Everything the results view renders for one profile
#[derive(Debug, Clone, Serialize)]
pub struct MacroReport {
  pub profile: ProfileInput,
  pub result: MacroResult,
  pub targets: MacroTargets,
  pub distribution: MacroDistribution,
  pub goal: GoalKind,
}

/// Sanitize a raw form submission and derive the full macro report.
/// Recomputed wholesale on every input change; nothing is stored.
#[tauri::command]
pub async fn calculate_macros(input: RawProfileInput) -> Result<MacroReport, ProfileError> {
  let profile = ProfileInput::from_raw(&input)?;

  let result = MacroResult::compute(
    profile.age,
    profile.height_cm,
    profile.weight_kg,
    profile.activity.factor(),
    profile.protein_per_kg,
    profile.calorie_adjustment as f64,
  );

  let targets = MacroTargets {
    calories: result.adjusted_calories.round() as i64,
    tdee: result.tdee.round() as i64,
    protein: MacroTarget {
      grams: result.protein_grams.round() as i64,
      calories: result.protein_kcal().round() as i64,
    },
    carbs: MacroTarget {
      grams: result.carbs_grams.round() as i64,
      calories: result.carbs_kcal().round() as i64,
    },
    fats: MacroTarget {
      grams: result.fats_grams.round() as i64,
      calories: result.fats_kcal().round() as i64,
    },
  };

  let distribution = compute_distribution(&result);
  let goal = GoalKind::from_adjustment(profile.calorie_adjustment);

  Ok(MacroReport {
    profile,
    result,
    targets,
    distribution,
    goal,
  })
}

fn compute_distribution(result: &MacroResult) -> MacroDistribution {
  if result.adjusted_calories <= 0.0 {
    return MacroDistribution {
      protein_pct: 0,
      carbs_pct: 0,
      fats_pct: 0,
    };
  }

  let share = |kcal: f64| (kcal / result.adjusted_calories * 100.0).round() as i64;

  MacroDistribution {
    protein_pct: share(result.protein_kcal()),
    carbs_pct: share(result.carbs_kcal()),
    fats_pct: share(result.fats_kcal()),
  }
}

/// ---------------------------------------------------------------------------
/// Form Option Lists
/// ---------------------------------------------------------------------------

/// One entry in the activity picker
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLevelOption {
  pub value: ActivityLevel,
  pub factor: f64,
  pub label: String,
  pub description: String,
}

#[tauri::command]
pub async fn get_activity_levels() -> Vec<ActivityLevelOption> {
  ActivityLevel::ALL
    .iter()
    .map(|level| ActivityLevelOption {
      value: *level,
      factor: level.factor(),
      label: level.label().to_string(),
      description: level.description().to_string(),
    })
    .collect()
}

/// The goal picker's preset amounts
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentOptions {
  pub maintenance: i64,
  pub surplus: Vec<i64>,
  pub deficit: Vec<i64>,
}

#[tauri::command]
pub async fn get_adjustment_options() -> AdjustmentOptions {
  AdjustmentOptions {
    maintenance: 0,
    surplus: SURPLUS_OPTIONS.to_vec(),
    deficit: DEFICIT_OPTIONS.to_vec(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::test_utils::*;

  #[tokio::test]
  async fn test_calculate_macros_reference_profile() {
    let report = calculate_macros(mock_raw_input())
      .await
      .expect("valid input");

    assert_approx_eq!(report.result.bmr, 1764.5, 1e-9);
    assert_approx_eq!(report.result.tdee, 2117.4, 1e-9);

    assert_eq!(report.targets.calories, 2117);
    assert_eq!(report.targets.tdee, 2117);
    assert_eq!(report.targets.protein.grams, 75);
    assert_eq!(report.targets.protein.calories, 300);
    assert_eq!(report.targets.carbs.grams, 273);
    assert_eq!(report.targets.fats.grams, 81);
    assert_eq!(report.goal, GoalKind::Maintenance);
  }

  #[tokio::test]
  async fn test_calculate_macros_sanitizes_form_text() {
    let report = calculate_macros(RawProfileInput {
      age: "5".into(),
      height_cm: "not a number".into(),
      weight_kg: "1000".into(),
      ..mock_raw_input()
    })
    .await
    .expect("valid input");

    assert_eq!(report.profile.age, 10);
    assert_eq!(report.profile.height_cm, 175);
    assert_eq!(report.profile.weight_kg, 300);
  }

  #[tokio::test]
  async fn test_calculate_macros_rejects_out_of_set_adjustment() {
    let result = calculate_macros(RawProfileInput {
      calorie_adjustment: 250,
      ..mock_raw_input()
    })
    .await;

    assert!(result.is_err());
  }

  #[tokio::test]
  async fn test_goal_kind_reflects_adjustment() {
    let surplus = calculate_macros(RawProfileInput {
      calorie_adjustment: 300,
      ..mock_raw_input()
    })
    .await
    .expect("valid input");
    assert_eq!(surplus.goal, GoalKind::Surplus);

    let deficit = calculate_macros(RawProfileInput {
      calorie_adjustment: -500,
      ..mock_raw_input()
    })
    .await
    .expect("valid input");
    assert_eq!(deficit.goal, GoalKind::Deficit);
  }

  #[tokio::test]
  async fn test_distribution_shares_cover_the_total() {
    let report = calculate_macros(mock_raw_input())
      .await
      .expect("valid input");

    let sum = report.distribution.protein_pct
      + report.distribution.carbs_pct
      + report.distribution.fats_pct;
    // Whole-percent rounding can drift one point either way
    assert!((99..=101).contains(&sum), "shares sum to {}", sum);
    assert_eq!(report.distribution.protein_pct, 14);
  }

  #[tokio::test]
  async fn test_distribution_is_zero_for_non_positive_total() {
    let distribution = compute_distribution(&MacroResult::compute(100, 100, 30, 1.2, 1.4, -5000.0));

    // adjusted calories are negative here; shares report as zero
    assert_eq!(distribution.protein_pct, 0);
    assert_eq!(distribution.carbs_pct, 0);
    assert_eq!(distribution.fats_pct, 0);
  }

  #[tokio::test]
  async fn test_activity_levels_are_ordered_and_complete() {
    let levels = get_activity_levels().await;
    assert_eq!(levels.len(), 5);
    assert_approx_eq!(levels[0].factor, 1.2, 1e-9);
    assert_approx_eq!(levels[4].factor, 1.9, 1e-9);
    assert!(levels[0].label.contains("Sedentary"));
    assert_eq!(levels[0].description, "Little or no exercise");
  }

  #[tokio::test]
  async fn test_adjustment_options_match_presets() {
    let options = get_adjustment_options().await;
    assert_eq!(options.maintenance, 0);
    assert_eq!(options.surplus, vec![100, 200, 300, 400, 500]);
    assert_eq!(options.deficit, vec![-100, -200, -300, -400, -500]);
  }
}
