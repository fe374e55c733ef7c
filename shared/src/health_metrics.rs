//! Body composition, energy and macronutrient calculations
//!
//! Every function here is pure and works in kilograms and kcal. Inputs are
//! assumed to have passed [`crate::validation`]; the only failure left is a
//! degenerate composition (zero total mass), reported as a
//! [`ComputationError`] instead of a NaN.

use crate::errors::ComputationError;
use crate::models::{CompositionMeasurement, DietaryApproach, WeightGoal};
use crate::types::{BodyFatCategory, MacroGrams, MacroPercentages};
use crate::units::{round_to, WeightUnit};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARB: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Hard safety floor for the daily calorie target
pub const MIN_TARGET_CALORIES_KCAL: f64 = 1200.0;

/// Protein can never exceed this many grams per kg of lean mass
pub const PROTEIN_CEILING_G_PER_KG: f64 = 2.5;

/// Ages above this get at least [`SENIOR_MIN_PROTEIN_G_PER_KG`]
pub const SENIOR_AGE_THRESHOLD: i32 = 60;
pub const SENIOR_MIN_PROTEIN_G_PER_KG: f64 = 2.0;

// ============================================================================
// Composition
// ============================================================================

/// Lean and fat mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyComposition {
    pub lean_mass_kg: f64,
    pub fat_mass_kg: f64,
}

impl BodyComposition {
    pub fn total_kg(&self) -> f64 {
        self.lean_mass_kg + self.fat_mass_kg
    }

    /// Body fat percentage rounded to one decimal
    pub fn body_fat_percent(&self) -> Result<f64, ComputationError> {
        calculate_body_fat_percent(self.lean_mass_kg, self.fat_mass_kg)
    }
}

/// Derive lean and fat mass from whichever measurement mode is active
pub fn derive_composition(measurement: &CompositionMeasurement, unit: WeightUnit) -> BodyComposition {
    match *measurement {
        CompositionMeasurement::ByLeanFat {
            lean_mass,
            fat_mass,
        } => BodyComposition {
            lean_mass_kg: unit.to_kg(lean_mass),
            fat_mass_kg: unit.to_kg(fat_mass),
        },
        CompositionMeasurement::ByTotalAndBodyfat {
            total_weight,
            body_fat_percent,
        } => {
            let total_kg = unit.to_kg(total_weight);
            let fat_mass_kg = total_kg * body_fat_percent / 100.0;
            BodyComposition {
                lean_mass_kg: total_kg - fat_mass_kg,
                fat_mass_kg,
            }
        }
    }
}

/// Calculate body fat percentage from lean and fat mass
///
/// Formula: BF% = fat / (lean + fat) × 100, rounded to 1 decimal
pub fn calculate_body_fat_percent(lean_mass_kg: f64, fat_mass_kg: f64) -> Result<f64, ComputationError> {
    let total = lean_mass_kg + fat_mass_kg;
    if total == 0.0 {
        return Err(ComputationError::ZeroMass);
    }
    let percent = fat_mass_kg / total * 100.0;
    if !percent.is_finite() {
        return Err(ComputationError::NonFinite {
            quantity: "body fat percentage",
        });
    }
    Ok(round_to(percent, 1))
}

/// Classify body fat percentage
pub fn classify_body_fat(body_fat_percent: f64) -> BodyFatCategory {
    if body_fat_percent < 10.0 {
        BodyFatCategory::DangerouslyLow
    } else if body_fat_percent < 15.0 {
        BodyFatCategory::Excellent
    } else if body_fat_percent < 20.0 {
        BodyFatCategory::Good
    } else if body_fat_percent < 25.0 {
        BodyFatCategory::Fair
    } else if body_fat_percent < 30.0 {
        BodyFatCategory::Poor
    } else {
        BodyFatCategory::DangerouslyHigh
    }
}

// ============================================================================
// Energy
// ============================================================================

/// How activity is added on top of BMR
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityBasis {
    /// TDEE = BMR × multiplier
    Multiplier(f64),
    /// TDEE = BMR + active kcal
    ActiveEnergy(f64),
}

/// Calculate BMR using the Katch-McArdle equation
///
/// BMR = 370 + 21.6 × LBM(kg)
pub fn calculate_bmr_katch_mcardle(lean_mass_kg: f64) -> f64 {
    370.0 + 21.6 * lean_mass_kg
}

/// Calculate Total Daily Energy Expenditure from BMR
pub fn calculate_tdee(bmr: f64, activity: ActivityBasis) -> f64 {
    match activity {
        ActivityBasis::Multiplier(multiplier) => bmr * multiplier,
        ActivityBasis::ActiveEnergy(kcal) => bmr + kcal,
    }
}

/// Calculate the daily calorie target.
///
/// The adjustment only applies to lose/gain goals, and the result never
/// drops below [`MIN_TARGET_CALORIES_KCAL`].
pub fn calculate_target_calories(tdee: f64, goal: WeightGoal, daily_adjustment: f64) -> f64 {
    let target = match goal {
        WeightGoal::Maintain => tdee,
        WeightGoal::Lose | WeightGoal::Gain => tdee + daily_adjustment,
    };
    target.max(MIN_TARGET_CALORIES_KCAL)
}

// ============================================================================
// Macros
// ============================================================================

/// Grams of protein per kg of lean mass for a goal and age
pub fn protein_multiplier(goal: WeightGoal, age: i32) -> f64 {
    let base: f64 = match goal {
        WeightGoal::Lose => 2.2,
        WeightGoal::Gain => 2.0,
        WeightGoal::Maintain => 1.6,
    };
    if age > SENIOR_AGE_THRESHOLD {
        base.max(SENIOR_MIN_PROTEIN_G_PER_KG)
    } else {
        base
    }
}

/// Fraction of post-protein calories given to carbohydrate.
///
/// Insulin resistance wins over the dietary approach.
pub fn carb_ratio(approach: DietaryApproach, insulin_resistance: bool) -> f64 {
    if insulin_resistance {
        return 0.20;
    }
    match approach {
        DietaryApproach::HighProtein => 0.30,
        DietaryApproach::LowCarb => 0.10,
        DietaryApproach::Balanced => 0.40,
    }
}

/// Daily protein in whole grams, capped at 2.5 g per kg lean mass
pub fn calculate_protein_grams(lean_mass_kg: f64, multiplier: f64) -> f64 {
    let ceiling = (lean_mass_kg * PROTEIN_CEILING_G_PER_KG).floor();
    (lean_mass_kg * multiplier).round().min(ceiling)
}

/// Split the calorie target into protein, carb and fat grams.
///
/// Each figure is rounded on its own; the rounding error is not
/// redistributed.
pub fn allocate_macros(
    target_calories: f64,
    lean_mass_kg: f64,
    protein_multiplier: f64,
    carb_ratio: f64,
) -> MacroGrams {
    let protein_grams = calculate_protein_grams(lean_mass_kg, protein_multiplier);
    let protein_calories = protein_grams * KCAL_PER_GRAM_PROTEIN;

    let remaining = (target_calories - protein_calories).max(0.0);
    let carb_calories = remaining * carb_ratio;
    let fat_calories = remaining - carb_calories;

    MacroGrams {
        protein_grams,
        carb_grams: (carb_calories / KCAL_PER_GRAM_CARB).round(),
        fat_grams: (fat_calories / KCAL_PER_GRAM_FAT).round(),
    }
}

/// Each macro's share of the calorie target, in percent to 1 decimal
pub fn macro_percentages(macros: &MacroGrams, target_calories: f64) -> MacroPercentages {
    let share = |grams: f64, kcal_per_gram: f64| round_to(grams * kcal_per_gram / target_calories * 100.0, 1);
    MacroPercentages {
        protein: share(macros.protein_grams, KCAL_PER_GRAM_PROTEIN),
        carb: share(macros.carb_grams, KCAL_PER_GRAM_CARB),
        fat: share(macros.fat_grams, KCAL_PER_GRAM_FAT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // Composition Tests
    // =========================================================================

    #[test]
    fn test_derive_from_total_and_bodyfat_lb() {
        let measurement = CompositionMeasurement::ByTotalAndBodyfat {
            total_weight: 290.0,
            body_fat_percent: 36.0,
        };
        let body = derive_composition(&measurement, WeightUnit::Lb);
        assert!((body.lean_mass_kg - 84.19).abs() < 0.05);
        assert!((body.fat_mass_kg - 47.36).abs() < 0.05);
        assert_eq!(body.body_fat_percent().unwrap(), 36.0);
    }

    #[test]
    fn test_derive_from_lean_fat_kg() {
        let measurement = CompositionMeasurement::ByLeanFat {
            lean_mass: 60.0,
            fat_mass: 15.0,
        };
        let body = derive_composition(&measurement, WeightUnit::Kg);
        assert_eq!(body.lean_mass_kg, 60.0);
        assert_eq!(body.fat_mass_kg, 15.0);
        assert_eq!(body.total_kg(), 75.0);
        assert_eq!(body.body_fat_percent().unwrap(), 20.0);
    }

    #[test]
    fn test_zero_mass_is_an_error() {
        assert_eq!(
            calculate_body_fat_percent(0.0, 0.0),
            Err(ComputationError::ZeroMass)
        );
    }

    #[test]
    fn test_body_fat_percent_rounds_to_one_decimal() {
        // 10 / 30 = 33.333...
        assert_eq!(calculate_body_fat_percent(20.0, 10.0).unwrap(), 33.3);
    }

    #[rstest]
    #[case(0.0, BodyFatCategory::DangerouslyLow)]
    #[case(9.9, BodyFatCategory::DangerouslyLow)]
    #[case(10.0, BodyFatCategory::Excellent)]
    #[case(14.9, BodyFatCategory::Excellent)]
    #[case(15.0, BodyFatCategory::Good)]
    #[case(20.0, BodyFatCategory::Fair)]
    #[case(25.0, BodyFatCategory::Poor)]
    #[case(29.9, BodyFatCategory::Poor)]
    #[case(30.0, BodyFatCategory::DangerouslyHigh)]
    #[case(100.0, BodyFatCategory::DangerouslyHigh)]
    fn test_body_fat_categories(#[case] percent: f64, #[case] expected: BodyFatCategory) {
        assert_eq!(classify_body_fat(percent), expected);
    }

    #[test]
    fn test_category_descriptions() {
        assert_eq!(BodyFatCategory::DangerouslyLow.description(), "Dangerously Low");
        assert_eq!(BodyFatCategory::DangerouslyHigh.description(), "Dangerously High");
        assert_eq!(BodyFatCategory::Fair.range(), (20.0, 25.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: body fat percentage stays within 0-100
        #[test]
        fn prop_body_fat_percent_in_range(lean in 0.0f64..453.0, fat in 0.0f64..453.0) {
            prop_assume!(lean + fat > 0.0);
            let pct = calculate_body_fat_percent(lean, fat).unwrap();
            prop_assert!((0.0..=100.0).contains(&pct), "got {}", pct);
        }

        /// Property: category ranges agree with classification
        #[test]
        fn prop_category_contains_percent(pct in 0.0f64..100.0) {
            let (low, high) = classify_body_fat(pct).range();
            prop_assert!(pct >= low && pct < high);
        }
    }

    // =========================================================================
    // Energy Tests
    // =========================================================================

    #[test]
    fn test_bmr_katch_mcardle() {
        // 70 kg lean -> 370 + 1512 = 1882
        assert!((calculate_bmr_katch_mcardle(70.0) - 1882.0).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_multiplier_and_active_energy() {
        assert!((calculate_tdee(2000.0, ActivityBasis::Multiplier(1.55)) - 3100.0).abs() < 1e-9);
        assert_eq!(calculate_tdee(2000.0, ActivityBasis::ActiveEnergy(450.0)), 2450.0);
    }

    #[test]
    fn test_target_calories() {
        assert_eq!(calculate_target_calories(3400.0, WeightGoal::Lose, -1000.0), 2400.0);
        assert_eq!(calculate_target_calories(2500.0, WeightGoal::Gain, 300.0), 2800.0);
        // Adjustment ignored for maintenance
        assert_eq!(calculate_target_calories(2500.0, WeightGoal::Maintain, -700.0), 2500.0);
        // Floor wins over the deficit
        assert_eq!(calculate_target_calories(1900.0, WeightGoal::Lose, -1000.0), 1200.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: target never drops below 1200 kcal
        #[test]
        fn prop_target_floor(tdee in 0.0f64..10000.0, adjustment in -5000.0f64..5000.0) {
            for goal in [WeightGoal::Lose, WeightGoal::Maintain, WeightGoal::Gain] {
                let target = calculate_target_calories(tdee, goal, adjustment);
                prop_assert!(target >= MIN_TARGET_CALORIES_KCAL);
            }
        }
    }

    // =========================================================================
    // Macro Tests
    // =========================================================================

    #[rstest]
    #[case(WeightGoal::Lose, 30, 2.2)]
    #[case(WeightGoal::Gain, 30, 2.0)]
    #[case(WeightGoal::Maintain, 30, 1.6)]
    #[case(WeightGoal::Maintain, 60, 1.6)]
    #[case(WeightGoal::Maintain, 61, 2.0)]
    #[case(WeightGoal::Lose, 65, 2.2)]
    #[case(WeightGoal::Gain, 65, 2.0)]
    fn test_protein_multiplier(#[case] goal: WeightGoal, #[case] age: i32, #[case] expected: f64) {
        assert_eq!(protein_multiplier(goal, age), expected);
    }

    #[rstest]
    #[case(DietaryApproach::Balanced, false, 0.40)]
    #[case(DietaryApproach::HighProtein, false, 0.30)]
    #[case(DietaryApproach::LowCarb, false, 0.10)]
    #[case(DietaryApproach::Balanced, true, 0.20)]
    #[case(DietaryApproach::LowCarb, true, 0.20)]
    fn test_carb_ratio_precedence(
        #[case] approach: DietaryApproach,
        #[case] insulin_resistance: bool,
        #[case] expected: f64,
    ) {
        assert_eq!(carb_ratio(approach, insulin_resistance), expected);
    }

    #[test]
    fn test_protein_ceiling_caps_multiplier() {
        // 2.2 g/kg on 84.19 kg -> 185 g, well under the 210 g ceiling
        assert_eq!(calculate_protein_grams(84.19, 2.2), 185.0);
        // A multiplier above the ceiling is clamped to floor(lean × 2.5)
        assert_eq!(calculate_protein_grams(50.3, 3.0), 125.0);
    }

    #[test]
    fn test_allocate_macros_balanced() {
        let macros = allocate_macros(2400.0, 84.19, 2.2, 0.40);
        assert_eq!(macros.protein_grams, 185.0);
        // (2400 - 740) × 0.4 = 664 kcal -> 166 g
        assert_eq!(macros.carb_grams, 166.0);
        // 2400 - 740 - 664 = 996 kcal -> 110.67 -> 111 g
        assert_eq!(macros.fat_grams, 111.0);

        let pct = macro_percentages(&macros, 2400.0);
        assert_eq!(pct.protein, 30.8);
        assert_eq!(pct.carb, 27.7);
        assert_eq!(pct.fat, 41.6);
    }

    #[test]
    fn test_allocate_macros_never_negative() {
        // Protein alone exceeds the target
        let macros = allocate_macros(1200.0, 400.0, 2.2, 0.40);
        assert_eq!(macros.carb_grams, 0.0);
        assert_eq!(macros.fat_grams, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: protein never exceeds 2.5 g per kg lean mass
        #[test]
        fn prop_protein_ceiling(lean in 0.0f64..453.0, multiplier in 1.0f64..4.0) {
            let protein = calculate_protein_grams(lean, multiplier);
            prop_assert!(protein <= lean * PROTEIN_CEILING_G_PER_KG);
        }

        /// Property: macro calories add back up to the target within rounding
        #[test]
        fn prop_macro_calories_match_target(
            lean in 30.0f64..120.0,
            extra in 0.0f64..3000.0,
            ratio in prop::sample::select(vec![0.10, 0.20, 0.30, 0.40]),
        ) {
            let multiplier = 2.2;
            let protein_kcal = calculate_protein_grams(lean, multiplier) * KCAL_PER_GRAM_PROTEIN;
            let target = (protein_kcal + extra).max(MIN_TARGET_CALORIES_KCAL);
            let macros = allocate_macros(target, lean, multiplier, ratio);

            let remaining = target - protein_kcal;
            let carb_err = (macros.carb_grams * KCAL_PER_GRAM_CARB - remaining * ratio).abs();
            let fat_err = (macros.fat_grams * KCAL_PER_GRAM_FAT - remaining * (1.0 - ratio)).abs();
            prop_assert!(carb_err <= 2.0 + 1e-6, "carb error {}", carb_err);
            prop_assert!(fat_err <= 4.5 + 1e-6, "fat error {}", fat_err);

            let total = macros.protein_grams * KCAL_PER_GRAM_PROTEIN
                + macros.carb_grams * KCAL_PER_GRAM_CARB
                + macros.fat_grams * KCAL_PER_GRAM_FAT;
            prop_assert!((total - target).abs() <= 6.5 + 1e-6);
        }
    }
}
