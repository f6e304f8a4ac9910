//! Exercise taxonomy index.
//!
//! The taxonomy arrives as a flattened, level-tagged node stream:
//! - level 3: muscle group
//! - level 4: division of the current group
//! - level 5: exercise within the current division
//! - level 6: rating for the exercise immediately before it
//!
//! Indexing walks that stream once with two cursors (group, division) and a
//! single pending-exercise slot.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Scaffolding nodes that never describe an exercise
pub const EXCLUDED_NODE_NAMES: &[&str] = &[
    "progression program",
    "Pushups",
    "Pull ups",
    "Squats",
    "Leg Raises",
    "Bridges",
    "Skills",
];

pub const GROUP_LEVEL: i32 = 3;
pub const DIVISION_LEVEL: i32 = 4;
pub const EXERCISE_LEVEL: i32 = 5;
pub const RATING_LEVEL: i32 = 6;

/// A raw node of the flattened exercise tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub level: i32,
    pub name: String,
}

impl TaxonomyNode {
    pub fn new(level: i32, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }
}

/// An exercise with its suitability rating inside a division
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatedExercise {
    pub name: String,
    pub rating: f64,
}

/// Anatomical division and its exercises in tree order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub exercises: Vec<RatedExercise>,
}

/// Top-level muscle group (also the uniqueness category during assembly)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroup {
    pub name: String,
    pub divisions: Vec<Division>,
}

/// Queryable `group -> division -> [(exercise, rating)]` index
///
/// Iteration order everywhere is tree order, which keeps tie-breaking in the
/// assembler reproducible. Built once per run and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTaxonomy {
    groups: Vec<MuscleGroup>,
}

#[derive(Default)]
struct Cursor {
    group: Option<usize>,
    division: Option<usize>,
    pending: Option<String>,
}

impl ExerciseTaxonomy {
    /// Index a flattened node stream
    ///
    /// Malformed rating nodes and ratings without a pending exercise are
    /// dropped; the scan never aborts.
    pub fn from_nodes<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a TaxonomyNode>,
    {
        let mut taxonomy = ExerciseTaxonomy::default();
        let mut cursor = Cursor::default();
        let mut dropped = 0usize;

        for node in nodes {
            if EXCLUDED_NODE_NAMES.contains(&node.name.as_str()) {
                continue;
            }

            match node.level {
                GROUP_LEVEL => {
                    cursor.group = Some(taxonomy.reset_group(&node.name));
                    cursor.division = None;
                    cursor.pending = None;
                }
                DIVISION_LEVEL => {
                    if let Some(g) = cursor.group {
                        cursor.division = Some(taxonomy.reset_division(g, &node.name));
                        cursor.pending = None;
                    }
                }
                EXERCISE_LEVEL => {
                    if cursor.group.is_some() && cursor.division.is_some() {
                        cursor.pending = Some(node.name.clone());
                    }
                }
                RATING_LEVEL => {
                    let (Some(g), Some(d), Some(exercise)) =
                        (cursor.group, cursor.division, cursor.pending.take())
                    else {
                        dropped += 1;
                        continue;
                    };

                    match parse_rating(&node.name) {
                        Some(rating) => taxonomy.groups[g].divisions[d]
                            .exercises
                            .push(RatedExercise {
                                name: exercise,
                                rating,
                            }),
                        None => {
                            tracing::debug!(
                                "Dropping malformed rating {:?} for {:?}",
                                node.name,
                                exercise
                            );
                            dropped += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            "Indexed {} groups, {} exercises ({} rating nodes dropped)",
            taxonomy.groups.len(),
            taxonomy.exercise_count(),
            dropped
        );

        taxonomy
    }

    fn reset_group(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|g| g.name == name) {
            Some(idx) => {
                self.groups[idx].divisions.clear();
                idx
            }
            None => {
                self.groups.push(MuscleGroup {
                    name: name.to_string(),
                    divisions: Vec::new(),
                });
                self.groups.len() - 1
            }
        }
    }

    fn reset_division(&mut self, group: usize, name: &str) -> usize {
        let divisions = &mut self.groups[group].divisions;
        match divisions.iter().position(|d| d.name == name) {
            Some(idx) => {
                divisions[idx].exercises.clear();
                idx
            }
            None => {
                divisions.push(Division {
                    name: name.to_string(),
                    exercises: Vec::new(),
                });
                divisions.len() - 1
            }
        }
    }

    pub fn groups(&self) -> &[MuscleGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&MuscleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn divisions(&self, group: &str) -> Option<&[Division]> {
        self.group(group).map(|g| g.divisions.as_slice())
    }

    /// Exercises of one division in tree order
    pub fn exercises(&self, group: &str, division: &str) -> Option<&[RatedExercise]> {
        self.group(group)?
            .divisions
            .iter()
            .find(|d| d.name == division)
            .map(|d| d.exercises.as_slice())
    }

    /// Find the first group and division listing the exercise
    pub fn locate(&self, exercise: &str) -> Option<(&MuscleGroup, &Division)> {
        self.groups.iter().find_map(|g| {
            g.divisions
                .iter()
                .find(|d| d.exercises.iter().any(|e| e.name == exercise))
                .map(|d| (g, d))
        })
    }

    /// Number of rated exercise entries (duplicates included)
    pub fn exercise_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.divisions.iter())
            .map(|d| d.exercises.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.exercise_count() == 0
    }

    /// Fail loudly when the index cannot support plan generation
    pub fn ensure_usable(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(Error::Taxonomy("taxonomy has no muscle groups".into()));
        }
        if self.is_empty() {
            return Err(Error::Taxonomy(
                "taxonomy has no rated exercises".into(),
            ));
        }
        Ok(())
    }
}

fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(level: i32, name: &str) -> TaxonomyNode {
        TaxonomyNode::new(level, name)
    }

    fn sample_tree() -> Vec<TaxonomyNode> {
        vec![
            node(1, "exercises"),
            node(3, "chest"),
            node(4, "upper chest"),
            node(5, "Incline Bench Press"),
            node(6, "9.5"),
            node(5, "Low-to-High Cable Fly"),
            node(6, "8"),
            node(4, "lower chest"),
            node(5, "Dips"),
            node(6, "not a number"),
            node(5, "Decline Press"),
            node(6, "7.5"),
            node(3, "back"),
            node(4, "Pull ups"),
            node(4, "upper lats"),
            node(5, "Wide Grip Pulldown"),
            node(6, "9"),
        ]
    }

    #[test]
    fn test_index_builds_group_division_exercise_levels() {
        crate::logging::init_test();
        let taxonomy = ExerciseTaxonomy::from_nodes(&sample_tree());

        assert_eq!(taxonomy.groups().len(), 2);
        let upper = taxonomy.exercises("chest", "upper chest").unwrap();
        assert_eq!(upper.len(), 2);
        assert_eq!(upper[0].name, "Incline Bench Press");
        assert_eq!(upper[0].rating, 9.5);
        assert_eq!(upper[1].name, "Low-to-High Cable Fly");
    }

    #[test]
    fn test_malformed_rating_is_dropped_without_aborting() {
        let taxonomy = ExerciseTaxonomy::from_nodes(&sample_tree());
        let lower = taxonomy.exercises("chest", "lower chest").unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].name, "Decline Press");
        assert_eq!(taxonomy.exercise_count(), 4);
    }

    #[test]
    fn test_denylisted_nodes_are_skipped() {
        let taxonomy = ExerciseTaxonomy::from_nodes(&sample_tree());
        let back = taxonomy.group("back").unwrap();
        assert_eq!(back.divisions.len(), 1);
        assert_eq!(back.divisions[0].name, "upper lats");
    }

    #[test]
    fn test_rating_without_pending_exercise_is_skipped() {
        let tree = vec![
            node(3, "chest"),
            node(4, "upper chest"),
            node(6, "9"),
            node(5, "Incline Press"),
            node(6, "9"),
            node(6, "8"),
        ];
        let taxonomy = ExerciseTaxonomy::from_nodes(&tree);
        let upper = taxonomy.exercises("chest", "upper chest").unwrap();
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].rating, 9.0);
    }

    #[test]
    fn test_nodes_before_any_group_are_ignored() {
        let tree = vec![
            node(4, "orphan division"),
            node(5, "Orphan Exercise"),
            node(6, "10"),
            node(3, "calves"),
            node(4, "soleus"),
            node(5, "Seated Calf Raise"),
            node(6, "9"),
        ];
        let taxonomy = ExerciseTaxonomy::from_nodes(&tree);
        assert_eq!(taxonomy.exercise_count(), 1);
        assert!(taxonomy.locate("Orphan Exercise").is_none());
    }

    #[test]
    fn test_repeated_group_resets_contents_in_place() {
        let tree = vec![
            node(3, "chest"),
            node(4, "upper chest"),
            node(5, "Incline Press"),
            node(6, "9"),
            node(3, "biceps"),
            node(4, "brachialis"),
            node(5, "Hammer Curl"),
            node(6, "8"),
            node(3, "chest"),
            node(4, "lower chest"),
            node(5, "Dips"),
            node(6, "8"),
        ];
        let taxonomy = ExerciseTaxonomy::from_nodes(&tree);
        assert_eq!(taxonomy.groups()[0].name, "chest");
        assert!(taxonomy.exercises("chest", "upper chest").is_none());
        assert_eq!(taxonomy.exercises("chest", "lower chest").unwrap().len(), 1);
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let tree = sample_tree();
        assert_eq!(
            ExerciseTaxonomy::from_nodes(&tree),
            ExerciseTaxonomy::from_nodes(&tree)
        );
    }

    #[test]
    fn test_locate_returns_group_and_division() {
        let taxonomy = ExerciseTaxonomy::from_nodes(&sample_tree());
        let (group, division) = taxonomy.locate("Decline Press").unwrap();
        assert_eq!(group.name, "chest");
        assert_eq!(division.name, "lower chest");
        assert!(taxonomy.locate("Dips").is_none());
    }

    #[test]
    fn test_empty_taxonomy_is_not_usable() {
        let taxonomy = ExerciseTaxonomy::from_nodes(&Vec::<TaxonomyNode>::new());
        assert!(matches!(taxonomy.ensure_usable(), Err(Error::Taxonomy(_))));

        let scaffolding_only = vec![node(3, "chest"), node(4, "upper chest")];
        let taxonomy = ExerciseTaxonomy::from_nodes(&scaffolding_only);
        assert!(taxonomy.ensure_usable().is_err());

        assert!(ExerciseTaxonomy::from_nodes(&sample_tree())
            .ensure_usable()
            .is_ok());
    }

    #[test]
    fn test_non_finite_rating_is_malformed() {
        assert_eq!(parse_rating(" 7.25 "), Some(7.25));
        assert_eq!(parse_rating("NaN"), None);
        assert_eq!(parse_rating("inf"), None);
    }
}
