#![forbid(unsafe_code)]

//! Core domain model and plan generation engine for Liftplan.
//!
//! This crate provides:
//! - Domain types (profiles, detailed plans, generated plans)
//! - Exercise taxonomy indexing
//! - Split selection, priority reordering and division rotation
//! - Greedy plan assembly and exercise substitution
//! - Exercise catalog, plan formatting and persistence hand-off

pub mod types;
pub mod error;
pub mod taxonomy;
pub mod priority;
pub mod split;
pub mod rotation;
pub mod assembler;
pub mod substitution;
pub mod generator;
pub mod catalog;
pub mod handoff;
pub mod resources;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use taxonomy::{Division, ExerciseTaxonomy, MuscleGroup, RatedExercise, TaxonomyNode};
pub use priority::{normalize_priorities, reorder_by_priority};
pub use split::{select_split, SplitChoice, SPLIT_TEMPLATES};
pub use rotation::{rotate_divisions, MuscleDivisions};
pub use assembler::{assemble_plan, UsedExerciseRegistry};
pub use substitution::SubstitutionSession;
pub use generator::{PlanGenerator, PlanOutcome};
pub use catalog::{format_plan, get_default_catalog, ExerciseCatalog, FormattedPlan};
pub use handoff::{PersistedPlan, ProfileStore};
pub use resources::default_taxonomy;
pub use config::Config;
