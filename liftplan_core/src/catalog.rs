//! Exercise master catalog and plan formatting.
//!
//! The catalog carries display data (type, icon, muscles worked) for each
//! exercise name. Formatting joins a generated plan against it to produce the
//! per-day presentation: the muscles a day works plus exercise cards.

use crate::resources::builtin_catalog_entries;
use crate::GeneratedPlan;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Cached default catalog - built once from the bundled exercise table
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> =
    Lazy::new(|| ExerciseCatalog::new(builtin_catalog_entries()));

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Display record for one exercise
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub icon: String,
    pub primary_muscle: String,
    /// Comma-separated; may be empty
    #[serde(default)]
    pub secondary_muscles: String,
}

impl CatalogExercise {
    /// Primary then secondary muscles, split on commas and trimmed
    pub fn muscles(&self) -> impl Iterator<Item = &str> {
        self.primary_muscle
            .split(',')
            .chain(self.secondary_muscles.split(','))
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Name-indexed exercise catalog
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<CatalogExercise>,
    by_name: HashMap<String, usize>,
}

impl ExerciseCatalog {
    /// Index entries by name; a later duplicate replaces the earlier one
    pub fn new(exercises: Vec<CatalogExercise>) -> Self {
        let by_name = exercises
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { exercises, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&CatalogExercise> {
        self.by_name.get(name).map(|&i| &self.exercises[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn exercises(&self) -> &[CatalogExercise] {
        &self.exercises
    }

    /// Number of distinct names. `exercises()` still lists duplicate entries.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Validate catalog entries
    ///
    /// Returns a list of problems found; an empty list means the catalog is
    /// usable as-is.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = BTreeSet::new();

        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                errors.push("Exercise with empty name".to_string());
                continue;
            }
            if !seen.insert(exercise.name.as_str()) {
                errors.push(format!("Duplicate exercise '{}'", exercise.name));
            }
            if exercise.primary_muscle.trim().is_empty() {
                errors.push(format!("Exercise '{}' has no primary muscle", exercise.name));
            }
            if exercise.icon.trim().is_empty() {
                errors.push(format!("Exercise '{}' has no icon", exercise.name));
            }
        }

        errors
    }
}

/// Exercise card shown for a plan day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCard {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDay {
    pub day: u8,
    /// Distinct muscles worked, sorted
    pub muscles: BTreeSet<String>,
    pub exercises: Vec<ExerciseCard>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedPlan {
    pub days: Vec<FormattedDay>,
    /// Plan exercises that had no catalog entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// Join a generated plan against the catalog
///
/// Exercises absent from the catalog are left out of the day (and listed in
/// `missing`).
pub fn format_plan(plan: &GeneratedPlan, catalog: &ExerciseCatalog) -> FormattedPlan {
    let mut formatted = FormattedPlan::default();

    for day in &plan.days {
        let mut muscles = BTreeSet::new();
        let mut exercises = Vec::with_capacity(day.exercises.len());

        for name in &day.exercises {
            let Some(entry) = catalog.get(name) else {
                tracing::warn!("Day {}: {:?} not in catalog, skipping", day.day, name);
                formatted.missing.push(name.clone());
                continue;
            };

            muscles.extend(entry.muscles().map(str::to_string));
            exercises.push(ExerciseCard {
                name: entry.name.clone(),
                exercise_type: entry.exercise_type.clone(),
                icon: entry.icon.clone(),
            });
        }

        formatted.days.push(FormattedDay {
            day: day.day,
            muscles,
            exercises,
        });
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratedDay;

    fn entry(name: &str, primary: &str, secondary: &str) -> CatalogExercise {
        CatalogExercise {
            name: name.into(),
            exercise_type: "Compound".into(),
            icon: format!("icons/{}.png", name.to_lowercase()),
            primary_muscle: primary.into(),
            secondary_muscles: secondary.into(),
        }
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = get_default_catalog();
        assert!(!catalog.is_empty());
        let errors = catalog.validate();
        assert!(errors.is_empty(), "Catalog validation errors: {:?}", errors);
    }

    #[test]
    fn test_default_catalog_covers_default_taxonomy() {
        let catalog = get_default_catalog();
        for group in crate::resources::default_taxonomy().groups() {
            for division in &group.divisions {
                for exercise in &division.exercises {
                    assert!(catalog.contains(&exercise.name), "{} missing", exercise.name);
                }
            }
        }
    }

    #[test]
    fn test_muscles_are_trimmed_and_split() {
        let e = entry("Dips", "chest", " triceps ,front delts,");
        let muscles: Vec<_> = e.muscles().collect();
        assert_eq!(muscles, vec!["chest", "triceps", "front delts"]);
    }

    #[test]
    fn test_format_unions_muscles_and_skips_unknown() {
        let catalog = ExerciseCatalog::new(vec![
            entry("Bench", "chest", "triceps, front delts"),
            entry("Dips", "chest", "triceps"),
        ]);
        let plan = GeneratedPlan {
            days: vec![GeneratedDay {
                day: 1,
                exercises: vec!["Bench".into(), "Mystery Lift".into(), "Dips".into()],
            }],
            gaps: Vec::new(),
        };

        let formatted = format_plan(&plan, &catalog);
        let day = &formatted.days[0];
        assert_eq!(
            day.muscles.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["chest", "front delts", "triceps"]
        );
        assert_eq!(
            day.exercises.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Bench", "Dips"]
        );
        assert_eq!(formatted.missing, vec!["Mystery Lift"]);
    }

    #[test]
    fn test_card_serializes_type_field() {
        let card = ExerciseCard {
            name: "Dips".into(),
            exercise_type: "Compound".into(),
            icon: "icons/dips.png".into(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "Compound");
    }

    #[test]
    fn test_validate_reports_problems() {
        let catalog = ExerciseCatalog::new(vec![
            entry("Dips", "chest", ""),
            entry("Dips", "chest", ""),
            entry("Row", "", ""),
        ]);
        let errors = catalog.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Duplicate"));
        assert!(errors[1].contains("primary muscle"));
    }

    #[test]
    fn test_len_counts_distinct_names() {
        let catalog = ExerciseCatalog::new(vec![
            entry("Dips", "chest", ""),
            entry("Dips", "chest", "triceps"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.exercises().len(), 2);
        assert_eq!(catalog.get("Dips").unwrap().secondary_muscles, "triceps");
    }
}
