//! Nutrient threshold table and soil analysis for paddy fields.
//!
//! The threshold bands, symptom lists, and advisory text are agronomic
//! constants for rice cultivation. The table is built once at startup and
//! shared read-only across all requests; `analyze` is a pure function over
//! it, so identical inputs always produce identical results.

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Serialize;

// ---

/// Default soil-moisture floor (percent) below which watering is advised.
pub const DEFAULT_MOISTURE_MIN: f64 = 35.0;

/// Classification of a measured value against a nutrient's threshold band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NutrientStatus {
    Low,
    Optimal,
    #[serde(rename = "Slightly High")]
    SlightlyHigh,
    High,
}

/// Threshold band plus advisory material for one nutrient.
///
/// Band ordering `low <= optimal_min <= optimal_max <= high` is required
/// for classification to be well defined; see [`ThresholdTable::validate`].
#[derive(Debug, Clone)]
pub struct NutrientThreshold {
    pub low: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub high: f64,
    pub symptoms_low: &'static [&'static str],
    pub fertilizer_low: &'static str,
    pub symptoms_high: &'static [&'static str],
    pub solution_high: &'static [&'static str],
}

/// Result of classifying one measured value.
///
/// The low-side symptom list and fertilizer text always reflect the table
/// entry regardless of status, so a dashboard can show "what low would look
/// like" next to any reading. The high-side lists are populated only when
/// the status is `High`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientAnalysis {
    pub status: NutrientStatus,
    pub symptoms_if_low: Vec<String>,
    pub fertilizer_if_low: String,
    pub symptoms_if_high: Vec<String>,
    pub solution_if_high: Vec<String>,
    pub recommendation: String,
}

// ---

/// Immutable lookup table keyed by nutrient name.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    entries: HashMap<&'static str, NutrientThreshold>,
}

impl ThresholdTable {
    /// Build the table of rice-paddy thresholds.
    ///
    /// Note: every builtin entry sets `low == optimal_min`, so the
    /// below-band "Slightly High" gap can never fire with this table; the
    /// branch is kept for tables where the two differ.
    pub fn builtin() -> Self {
        // ---
        let mut entries = HashMap::new();

        entries.insert(
            "nitrogen",
            NutrientThreshold {
                low: 50.0,
                optimal_min: 50.0,
                optimal_max: 100.0,
                high: 150.0,
                symptoms_low: &[
                    "Yellowing older leaves (chlorosis)",
                    "Stunted growth",
                    "Poor tillering",
                ],
                fertilizer_low: "Apply 80–120 kg N/ha (Urea, Ammonium sulfate) in split doses \
                                 (transplanting, tillering, panicle)",
                symptoms_high: &[
                    "Excessive vegetative growth",
                    "Delayed maturity",
                    "Lodging risk",
                    "Poor grain filling",
                ],
                solution_high: &[
                    "Reduce nitrogen fertilizer",
                    "Balanced fertilization",
                    "Avoid excessive irrigation",
                ],
            },
        );

        entries.insert(
            "phosphorus",
            NutrientThreshold {
                low: 10.0,
                optimal_min: 10.0,
                optimal_max: 30.0,
                high: 50.0,
                symptoms_low: &[
                    "Dark green leaves but poor tillering",
                    "Stunted root growth",
                    "Delayed maturity",
                ],
                fertilizer_low: "Apply 30–60 kg P2O5/ha (SSP, TSP, DAP) at transplanting for \
                                 best uptake",
                symptoms_high: &["Micronutrient (Zn, Fe) deficiencies due to antagonism"],
                solution_high: &[
                    "Avoid excessive P application",
                    "Soil test before fertilization",
                ],
            },
        );

        entries.insert(
            "potassium",
            NutrientThreshold {
                low: 80.0,
                optimal_min: 80.0,
                optimal_max: 200.0,
                high: 250.0,
                symptoms_low: &[
                    "Yellowing and drying leaf edges (marginal scorch)",
                    "Weak stems and lodging",
                    "Poor grain filling and quality",
                ],
                fertilizer_low: "Apply 40–80 kg K2O/ha (MOP, SOP) split application \
                                 (transplanting, tillering)",
                symptoms_high: &[],
                solution_high: &[],
            },
        );

        // Acidic below 5.5, alkaline above 7.5.
        entries.insert(
            "ph",
            NutrientThreshold {
                low: 5.5,
                optimal_min: 5.5,
                optimal_max: 7.0,
                high: 7.5,
                symptoms_low: &[
                    "Acidic soil: Poor root growth",
                    "Iron/Manganese toxicity",
                    "Phosphorus deficiency",
                    "Stunted growth",
                ],
                fertilizer_low: "Apply agricultural lime or dolomite, add compost/organic \
                                 matter, and use phosphate fertilizers.",
                symptoms_high: &[
                    "Alkaline soil: Zinc/Iron deficiency",
                    "Yellowing leaves (chlorosis)",
                    "Poor tillering",
                    "Reduced nutrient uptake",
                ],
                solution_high: &[
                    "Apply gypsum or elemental sulfur",
                    "Use acid-forming fertilizers (ammonium sulfate, urea)",
                    "Grow green manure crops (Sesbania, Dhaincha)",
                ],
            },
        );

        ThresholdTable { entries }
    }

    /// Check band ordering for every entry. Run once at startup.
    pub fn validate(&self) -> Result<()> {
        // ---
        for (name, t) in &self.entries {
            if !(t.low <= t.optimal_min && t.optimal_min <= t.optimal_max && t.optimal_max <= t.high)
            {
                bail!(
                    "threshold band for '{}' is not ordered: {} / {} / {} / {}",
                    name,
                    t.low,
                    t.optimal_min,
                    t.optimal_max,
                    t.high
                );
            }
        }
        Ok(())
    }

    pub fn get(&self, nutrient: &str) -> Option<&NutrientThreshold> {
        self.entries.get(nutrient)
    }

    /// Classify `value` against the band for `nutrient`.
    ///
    /// Returns `None` for nutrient names not in the table, since callers
    /// probe optional fields (pH is not always measured). All comparisons
    /// are plain floating-point; pH's fractional thresholds get no special
    /// handling.
    pub fn analyze(&self, nutrient: &str, value: f64) -> Option<NutrientAnalysis> {
        // ---
        let t = self.entries.get(nutrient)?;

        let (status, symptoms_if_high, solution_if_high, recommendation) = if value < t.low {
            (
                NutrientStatus::Low,
                Vec::new(),
                Vec::new(),
                t.fertilizer_low.to_string(),
            )
        } else if t.optimal_min <= value && value <= t.optimal_max {
            (
                NutrientStatus::Optimal,
                Vec::new(),
                Vec::new(),
                format!("{} level is optimal.", capitalize(nutrient)),
            )
        } else if value > t.high {
            (
                NutrientStatus::High,
                to_owned_list(t.symptoms_high),
                to_owned_list(t.solution_high),
                String::new(),
            )
        } else {
            // low <= value < optimal_min, or optimal_max < value <= high.
            (
                NutrientStatus::SlightlyHigh,
                Vec::new(),
                Vec::new(),
                "Be cautious of potential nutrient imbalance.".to_string(),
            )
        };

        Some(NutrientAnalysis {
            status,
            symptoms_if_low: to_owned_list(t.symptoms_low),
            fertilizer_if_low: t.fertilizer_low.to_string(),
            symptoms_if_high,
            solution_if_high,
            recommendation,
        })
    }
}

// ---

/// Watering advice for a moisture percentage against a minimum.
pub fn moisture_action(moisture_pct: f64, min_pct: f64) -> &'static str {
    if moisture_pct < min_pct {
        "Give water"
    } else {
        "Moisture OK"
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn table() -> ThresholdTable {
        ThresholdTable::builtin()
    }

    #[test]
    fn builtin_table_has_ordered_bands() {
        // ---
        table().validate().expect("builtin bands must be ordered");
    }

    #[test]
    fn nitrogen_below_low_is_low() {
        // ---
        let analysis = table().analyze("nitrogen", 30.0).unwrap();
        assert_eq!(analysis.status, NutrientStatus::Low);
        assert_eq!(
            analysis.recommendation,
            table().get("nitrogen").unwrap().fertilizer_low
        );
        assert!(!analysis.symptoms_if_low.is_empty());
        assert!(analysis.symptoms_if_high.is_empty());
    }

    #[test]
    fn nitrogen_in_band_is_optimal() {
        // ---
        let analysis = table().analyze("nitrogen", 75.0).unwrap();
        assert_eq!(analysis.status, NutrientStatus::Optimal);
        assert_eq!(analysis.recommendation, "Nitrogen level is optimal.");
        assert!(analysis.symptoms_if_high.is_empty());
        assert!(analysis.solution_if_high.is_empty());
    }

    #[test]
    fn nitrogen_above_high_is_high() {
        // ---
        let analysis = table().analyze("nitrogen", 160.0).unwrap();
        assert_eq!(analysis.status, NutrientStatus::High);
        assert_eq!(
            analysis.symptoms_if_high,
            vec![
                "Excessive vegetative growth",
                "Delayed maturity",
                "Lodging risk",
                "Poor grain filling",
            ]
        );
        assert!(!analysis.solution_if_high.is_empty());
        assert!(analysis.recommendation.is_empty());
    }

    #[test]
    fn potassium_between_optimal_max_and_high_is_slightly_high() {
        // ---
        // 200 < 220 <= 250
        let analysis = table().analyze("potassium", 220.0).unwrap();
        assert_eq!(analysis.status, NutrientStatus::SlightlyHigh);
        assert!(analysis.symptoms_if_high.is_empty());
        assert_eq!(
            analysis.recommendation,
            "Be cautious of potential nutrient imbalance."
        );
    }

    #[test]
    fn band_boundaries_classify_inclusively() {
        // ---
        let table = table();

        // low == optimal_min for every builtin entry, so the exact boundary
        // lands in the optimal band rather than the below-band gap.
        assert_eq!(
            table.analyze("nitrogen", 50.0).unwrap().status,
            NutrientStatus::Optimal
        );
        assert_eq!(
            table.analyze("nitrogen", 100.0).unwrap().status,
            NutrientStatus::Optimal
        );
        // Exactly `high` is still only slightly high; High needs strictly more.
        assert_eq!(
            table.analyze("nitrogen", 150.0).unwrap().status,
            NutrientStatus::SlightlyHigh
        );
        assert_eq!(
            table.analyze("nitrogen", 150.1).unwrap().status,
            NutrientStatus::High
        );
    }

    #[test]
    fn ph_keeps_fractional_thresholds() {
        // ---
        let table = table();
        assert_eq!(table.analyze("ph", 5.4).unwrap().status, NutrientStatus::Low);
        assert_eq!(
            table.analyze("ph", 6.2).unwrap().status,
            NutrientStatus::Optimal
        );
        assert_eq!(
            table.analyze("ph", 7.2).unwrap().status,
            NutrientStatus::SlightlyHigh
        );
        assert_eq!(table.analyze("ph", 7.6).unwrap().status, NutrientStatus::High);
    }

    #[test]
    fn unknown_nutrient_is_absent_not_error() {
        assert!(table().analyze("molybdenum", 1.0).is_none());
    }

    #[test]
    fn analyze_is_pure() {
        // ---
        let table = table();
        let a = table.analyze("phosphorus", 42.0).unwrap();
        let b = table.analyze("phosphorus", 42.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn moisture_action_uses_minimum() {
        // ---
        assert_eq!(moisture_action(20.0, DEFAULT_MOISTURE_MIN), "Give water");
        assert_eq!(moisture_action(35.0, DEFAULT_MOISTURE_MIN), "Moisture OK");
        assert_eq!(moisture_action(60.0, DEFAULT_MOISTURE_MIN), "Moisture OK");
    }
}
