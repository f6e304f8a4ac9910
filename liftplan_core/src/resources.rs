//! Bundled exercise data and resource loaders.
//!
//! The built-in data set is one table of exercises. From it we derive both
//! the flattened taxonomy tree (the same shape external tree files use) and
//! the default exercise catalog.

use crate::catalog::{CatalogExercise, ExerciseCatalog};
use crate::taxonomy::{
    DIVISION_LEVEL, EXERCISE_LEVEL, GROUP_LEVEL, RATING_LEVEL,
};
use crate::{ExerciseTaxonomy, Result, TaxonomyNode};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// One row of the built-in exercise table
#[derive(Clone, Copy, Debug)]
pub struct BuiltinExercise {
    pub group: &'static str,
    pub division: &'static str,
    pub name: &'static str,
    pub rating: f64,
    pub kind: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

const fn ex(
    group: &'static str,
    division: &'static str,
    name: &'static str,
    rating: f64,
    kind: &'static str,
    primary: &'static str,
    secondary: &'static str,
) -> BuiltinExercise {
    BuiltinExercise {
        group,
        division,
        name,
        rating,
        kind,
        primary,
        secondary,
    }
}

const COMPOUND: &str = "Compound";
const ISOLATION: &str = "Isolation";

/// Rows are grouped by muscle group, then division, in tree order
pub static BUILTIN_EXERCISES: &[BuiltinExercise] = &[
    // chest
    ex("chest", "upper chest", "Incline Barbell Bench Press", 9.5, COMPOUND, "chest", "front delts, triceps"),
    ex("chest", "upper chest", "Incline Dumbbell Press", 9.0, COMPOUND, "chest", "front delts, triceps"),
    ex("chest", "upper chest", "Incline Smith Machine Press", 8.5, COMPOUND, "chest", "front delts, triceps"),
    ex("chest", "upper chest", "Low-to-High Cable Fly", 8.0, ISOLATION, "chest", "front delts"),
    ex("chest", "upper chest", "Landmine Press", 7.0, COMPOUND, "chest", "front delts"),
    ex("chest", "middle chest", "Flat Barbell Bench Press", 9.5, COMPOUND, "chest", "front delts, triceps"),
    ex("chest", "middle chest", "Flat Dumbbell Press", 9.0, COMPOUND, "chest", "front delts, triceps"),
    ex("chest", "middle chest", "Machine Chest Press", 8.5, COMPOUND, "chest", "triceps"),
    ex("chest", "middle chest", "Pec Deck Fly", 8.0, ISOLATION, "chest", ""),
    ex("chest", "middle chest", "Push-up", 7.0, COMPOUND, "chest", "triceps, abs"),
    ex("chest", "lower chest", "Weighted Dips", 9.0, COMPOUND, "chest", "triceps"),
    ex("chest", "lower chest", "Decline Barbell Press", 8.5, COMPOUND, "chest", "triceps"),
    ex("chest", "lower chest", "High-to-Low Cable Fly", 8.0, ISOLATION, "chest", ""),
    ex("chest", "lower chest", "Decline Dumbbell Press", 7.5, COMPOUND, "chest", "triceps"),
    // back
    ex("back", "rhomboids", "Chest-Supported Row", 9.0, COMPOUND, "upper back", "rear delts, biceps"),
    ex("back", "rhomboids", "Seated Cable Row", 8.5, COMPOUND, "upper back", "lats, biceps"),
    ex("back", "rhomboids", "Barbell Row", 8.0, COMPOUND, "upper back", "lats, lower back"),
    ex("back", "rhomboids", "Inverted Row", 7.0, COMPOUND, "upper back", "biceps"),
    ex("back", "mid traps", "Seal Row", 9.0, COMPOUND, "upper back", "rear delts"),
    ex("back", "mid traps", "Wide-Grip Cable Row", 8.5, COMPOUND, "upper back", "rear delts"),
    ex("back", "mid traps", "Prone Y-Raise", 7.5, ISOLATION, "upper back", "rear delts"),
    ex("back", "mid traps", "Meadows Row", 7.0, COMPOUND, "upper back", "lats"),
    ex("back", "upper traps", "Barbell Shrug", 9.0, ISOLATION, "upper back", ""),
    ex("back", "upper traps", "Dumbbell Shrug", 8.5, ISOLATION, "upper back", "forearms"),
    ex("back", "upper traps", "Cable Shrug", 8.0, ISOLATION, "upper back", ""),
    ex("back", "upper traps", "Farmer's Walk", 7.5, COMPOUND, "upper back", "forearms, abs"),
    ex("back", "upper lats", "Weighted Pull-up", 9.5, COMPOUND, "lats", "biceps, upper back"),
    ex("back", "upper lats", "Wide-Grip Lat Pulldown", 9.0, COMPOUND, "lats", "biceps"),
    ex("back", "upper lats", "Machine Pulldown", 8.0, COMPOUND, "lats", "biceps"),
    ex("back", "upper lats", "Straight-Arm Pulldown", 7.5, ISOLATION, "lats", ""),
    ex("back", "lumbar lats", "Single-Arm Dumbbell Row", 9.0, COMPOUND, "lats", "upper back, biceps"),
    ex("back", "lumbar lats", "Pendlay Row", 8.5, COMPOUND, "lats", "upper back, lower back"),
    ex("back", "lumbar lats", "Kroc Row", 8.0, COMPOUND, "lats", "forearms"),
    ex("back", "lumbar lats", "Rack Pull", 7.0, COMPOUND, "lats", "glutes, lower back"),
    ex("back", "lower lats", "Close-Grip Lat Pulldown", 9.0, COMPOUND, "lats", "biceps"),
    ex("back", "lower lats", "Half-Kneeling Cable Pulldown", 8.5, COMPOUND, "lats", ""),
    ex("back", "lower lats", "Neutral-Grip Pull-up", 8.0, COMPOUND, "lats", "biceps"),
    ex("back", "lower lats", "Lat Prayer", 7.5, ISOLATION, "lats", ""),
    // shoulders
    ex("shoulders", "front delts", "Overhead Barbell Press", 9.5, COMPOUND, "front delts", "triceps, side delts"),
    ex("shoulders", "front delts", "Seated Dumbbell Press", 9.0, COMPOUND, "front delts", "triceps"),
    ex("shoulders", "front delts", "Machine Shoulder Press", 8.5, COMPOUND, "front delts", "triceps"),
    ex("shoulders", "front delts", "Arnold Press", 8.0, COMPOUND, "front delts", "side delts"),
    ex("shoulders", "front delts", "Front Raise", 7.0, ISOLATION, "front delts", ""),
    ex("shoulders", "side delts", "Cable Lateral Raise", 9.5, ISOLATION, "side delts", ""),
    ex("shoulders", "side delts", "Dumbbell Lateral Raise", 9.0, ISOLATION, "side delts", ""),
    ex("shoulders", "side delts", "Machine Lateral Raise", 8.5, ISOLATION, "side delts", ""),
    ex("shoulders", "side delts", "Lean-Away Lateral Raise", 8.0, ISOLATION, "side delts", ""),
    ex("shoulders", "side delts", "Upright Row", 7.5, COMPOUND, "side delts", "upper back"),
    ex("shoulders", "rear delts", "Reverse Pec Deck", 9.0, ISOLATION, "rear delts", "upper back"),
    ex("shoulders", "rear delts", "Face Pull", 8.5, ISOLATION, "rear delts", "upper back"),
    ex("shoulders", "rear delts", "Rear Delt Cable Fly", 8.0, ISOLATION, "rear delts", ""),
    ex("shoulders", "rear delts", "Bent-Over Rear Delt Raise", 7.5, ISOLATION, "rear delts", ""),
    ex("shoulders", "rear delts", "Rear Delt Row", 7.0, COMPOUND, "rear delts", "upper back"),
    // arms
    ex("arms", "long head", "Overhead Cable Extension", 9.5, ISOLATION, "triceps", ""),
    ex("arms", "long head", "Skull Crusher", 9.0, ISOLATION, "triceps", ""),
    ex("arms", "long head", "Dumbbell Overhead Extension", 8.5, ISOLATION, "triceps", ""),
    ex("arms", "long head", "Close-Grip Bench Press", 8.0, COMPOUND, "triceps", "chest"),
    ex("arms", "side and medial head", "Cable Pushdown", 9.0, ISOLATION, "triceps", ""),
    ex("arms", "side and medial head", "Rope Pushdown", 8.5, ISOLATION, "triceps", ""),
    ex("arms", "side and medial head", "Triceps Kickback", 7.5, ISOLATION, "triceps", ""),
    ex("arms", "side and medial head", "Diamond Push-up", 7.0, COMPOUND, "triceps", "chest"),
    ex("arms", "bicep brachii", "Incline Dumbbell Curl", 9.0, ISOLATION, "biceps", ""),
    ex("arms", "bicep brachii", "Barbell Curl", 9.0, ISOLATION, "biceps", "forearms"),
    ex("arms", "bicep brachii", "Preacher Curl", 8.5, ISOLATION, "biceps", ""),
    ex("arms", "bicep brachii", "Cable Curl", 8.0, ISOLATION, "biceps", ""),
    ex("arms", "brachialis", "Hammer Curl", 9.0, ISOLATION, "biceps", "forearms"),
    ex("arms", "brachialis", "Cross-Body Hammer Curl", 8.5, ISOLATION, "biceps", "forearms"),
    ex("arms", "brachialis", "Reverse-Grip EZ Curl", 8.0, ISOLATION, "biceps", "forearms"),
    ex("arms", "brachialis", "Rope Hammer Curl", 7.5, ISOLATION, "biceps", "forearms"),
    ex("arms", "brachioradialis", "Reverse Curl", 8.5, ISOLATION, "forearms", "biceps"),
    ex("arms", "brachioradialis", "Zottman Curl", 8.0, ISOLATION, "forearms", "biceps"),
    ex("arms", "brachioradialis", "Pinwheel Curl", 7.5, ISOLATION, "forearms", "biceps"),
    ex("arms", "wrist extensor", "Reverse Wrist Curl", 8.5, ISOLATION, "forearms", ""),
    ex("arms", "wrist extensor", "Wrist Roller", 8.0, ISOLATION, "forearms", ""),
    ex("arms", "wrist extensor", "Plate Pinch", 7.0, ISOLATION, "forearms", ""),
    ex("arms", "wrist flexors", "Wrist Curl", 8.5, ISOLATION, "forearms", ""),
    ex("arms", "wrist flexors", "Behind-the-Back Wrist Curl", 8.0, ISOLATION, "forearms", ""),
    ex("arms", "wrist flexors", "Dead Hang", 7.5, ISOLATION, "forearms", "lats"),
    // legs
    ex("legs", "vastus medialis and lateralis", "Back Squat", 9.5, COMPOUND, "quads", "glutes, adductors"),
    ex("legs", "vastus medialis and lateralis", "Hack Squat", 9.0, COMPOUND, "quads", "glutes"),
    ex("legs", "vastus medialis and lateralis", "Leg Press", 8.5, COMPOUND, "quads", "glutes"),
    ex("legs", "vastus medialis and lateralis", "Bulgarian Split Squat", 8.5, COMPOUND, "quads", "glutes, adductors"),
    ex("legs", "vastus medialis and lateralis", "Walking Lunge", 7.5, COMPOUND, "quads", "glutes"),
    ex("legs", "rectus femoris", "Leg Extension", 9.0, ISOLATION, "quads", ""),
    ex("legs", "rectus femoris", "Front Squat", 8.5, COMPOUND, "quads", "glutes, abs"),
    ex("legs", "rectus femoris", "Sissy Squat", 8.0, ISOLATION, "quads", ""),
    ex("legs", "rectus femoris", "Reverse Nordic", 7.5, ISOLATION, "quads", ""),
    ex("legs", "bicep femoris", "Romanian Deadlift", 9.5, COMPOUND, "hamstrings", "glutes, lower back"),
    ex("legs", "bicep femoris", "Seated Leg Curl", 9.0, ISOLATION, "hamstrings", ""),
    ex("legs", "bicep femoris", "Lying Leg Curl", 8.5, ISOLATION, "hamstrings", ""),
    ex("legs", "bicep femoris", "Nordic Hamstring Curl", 8.0, ISOLATION, "hamstrings", ""),
    ex("legs", "bicep femoris", "Stiff-Leg Deadlift", 8.0, COMPOUND, "hamstrings", "glutes, lower back"),
    ex("legs", "gluteus medius", "Cable Hip Abduction", 8.5, ISOLATION, "glutes", ""),
    ex("legs", "gluteus medius", "Machine Hip Abduction", 8.0, ISOLATION, "glutes", ""),
    ex("legs", "gluteus medius", "Side-Lying Hip Abduction", 7.0, ISOLATION, "glutes", ""),
    ex("legs", "gluteus medius", "Lateral Band Walk", 6.5, ISOLATION, "glutes", ""),
    ex("legs", "gluteus maximus", "Barbell Hip Thrust", 9.5, COMPOUND, "glutes", "hamstrings"),
    ex("legs", "gluteus maximus", "Glute Bridge", 8.0, COMPOUND, "glutes", "hamstrings"),
    ex("legs", "gluteus maximus", "Cable Pull-Through", 7.5, COMPOUND, "glutes", "hamstrings"),
    ex("legs", "gluteus maximus", "Reverse Hyperextension", 7.0, COMPOUND, "glutes", "lower back"),
    ex("legs", "soleus", "Seated Calf Raise", 9.0, ISOLATION, "calves", ""),
    ex("legs", "soleus", "Bent-Knee Calf Raise", 8.0, ISOLATION, "calves", ""),
    ex("legs", "soleus", "Smith Machine Seated Calf Raise", 7.5, ISOLATION, "calves", ""),
    ex("legs", "gastroc", "Standing Calf Raise", 9.0, ISOLATION, "calves", ""),
    ex("legs", "gastroc", "Leg Press Calf Raise", 8.5, ISOLATION, "calves", ""),
    ex("legs", "gastroc", "Single-Leg Calf Raise", 8.0, ISOLATION, "calves", ""),
    ex("legs", "adductor magnus", "Adductor Machine", 9.0, ISOLATION, "adductors", ""),
    ex("legs", "adductor magnus", "Sumo Deadlift", 8.5, COMPOUND, "adductors", "glutes, hamstrings"),
    ex("legs", "adductor magnus", "Copenhagen Plank", 8.0, ISOLATION, "adductors", "abs"),
    ex("legs", "adductor magnus", "Wide-Stance Goblet Squat", 7.5, COMPOUND, "adductors", "quads"),
    // core
    ex("core", "upper abs", "Cable Crunch", 9.0, ISOLATION, "abs", ""),
    ex("core", "upper abs", "Machine Crunch", 8.5, ISOLATION, "abs", ""),
    ex("core", "upper abs", "Ab Wheel Rollout", 8.0, COMPOUND, "abs", "lats"),
    ex("core", "upper abs", "Decline Sit-up", 7.5, ISOLATION, "abs", ""),
    ex("core", "lower abs", "Hanging Leg Raise", 9.0, ISOLATION, "abs", "forearms"),
    ex("core", "lower abs", "Reverse Crunch", 8.5, ISOLATION, "abs", ""),
    ex("core", "lower abs", "Captain's Chair Knee Raise", 8.0, ISOLATION, "abs", ""),
    ex("core", "lower abs", "Dead Bug", 7.0, ISOLATION, "abs", ""),
];

static DEFAULT_TAXONOMY: Lazy<Arc<ExerciseTaxonomy>> =
    Lazy::new(|| Arc::new(ExerciseTaxonomy::from_nodes(&default_taxonomy_tree())));

/// Flatten the built-in table into a level-tagged node stream
pub fn default_taxonomy_tree() -> Vec<TaxonomyNode> {
    let mut nodes = vec![
        TaxonomyNode::new(1, "exercises"),
        TaxonomyNode::new(2, "resistance training"),
    ];
    let mut group = "";
    let mut division = "";

    for row in BUILTIN_EXERCISES {
        if row.group != group {
            nodes.push(TaxonomyNode::new(GROUP_LEVEL, row.group));
            group = row.group;
            division = "";
        }
        if row.division != division {
            nodes.push(TaxonomyNode::new(DIVISION_LEVEL, row.division));
            division = row.division;
        }
        nodes.push(TaxonomyNode::new(EXERCISE_LEVEL, row.name));
        nodes.push(TaxonomyNode::new(RATING_LEVEL, row.rating.to_string()));
    }

    nodes
}

/// Cached index of the built-in tree
///
/// Shared read-only; callers wanting a different tree build their own
/// `Arc<ExerciseTaxonomy>` instead of mutating this one.
pub fn default_taxonomy() -> Arc<ExerciseTaxonomy> {
    Arc::clone(&DEFAULT_TAXONOMY)
}

/// Catalog entries for every built-in exercise
pub(crate) fn builtin_catalog_entries() -> Vec<CatalogExercise> {
    BUILTIN_EXERCISES
        .iter()
        .map(|row| CatalogExercise {
            name: row.name.to_string(),
            exercise_type: row.kind.to_string(),
            icon: icon_path(row.name),
            primary_muscle: row.primary.to_string(),
            secondary_muscles: row.secondary.to_string(),
        })
        .collect()
}

fn icon_path(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            ' ' | '-' => Some('_'),
            _ => None,
        })
        .collect();
    format!("icons/{}.png", slug)
}

/// Read a flattened taxonomy tree from a JSON array of `{level, name}`
pub fn load_taxonomy_tree(path: &Path) -> Result<Vec<TaxonomyNode>> {
    let contents = std::fs::read_to_string(path)?;
    let nodes: Vec<TaxonomyNode> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} taxonomy nodes from {:?}", nodes.len(), path);
    Ok(nodes)
}

/// Read an exercise catalog from a JSON array
pub fn load_catalog(path: &Path) -> Result<ExerciseCatalog> {
    let contents = std::fs::read_to_string(path)?;
    let exercises: Vec<CatalogExercise> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} catalog exercises from {:?}", exercises.len(), path);
    Ok(ExerciseCatalog::new(exercises))
}
