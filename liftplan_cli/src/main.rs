mod store;

use clap::{Parser, Subcommand};
use liftplan_core::resources::{load_catalog, load_taxonomy_tree};
use liftplan_core::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use store::JsonProfileStore;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Training plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a plan from a profile
    Generate {
        /// Training days per week (1-7); reads profile.json when omitted
        #[arg(long, requires = "experience")]
        frequency: Option<u8>,

        /// novice, beginner, intermediate, advanced or elite
        #[arg(long, requires = "frequency")]
        experience: Option<String>,

        #[arg(long, default_value = "unspecified")]
        gender: String,

        /// Comma-separated muscles to prioritize, e.g. "shoulders, quads"
        #[arg(long, default_value = "")]
        priorities: String,

        /// Flattened taxonomy tree (JSON) to use instead of the bundled one
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Exercise catalog (JSON) to use instead of the bundled one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Save the plan under this name
        #[arg(long)]
        save: Option<String>,
    },

    /// Offer substitutes for one exercise of a saved plan
    Swap {
        #[arg(long)]
        plan: String,

        /// Day number (1-based)
        #[arg(long)]
        day: u8,

        /// Exercise position within the day (1-based)
        #[arg(long)]
        slot: usize,

        /// How many alternatives to offer
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Write the last offered alternative back to the plan
        #[arg(long)]
        apply: bool,

        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },

    /// Export a saved plan as CSV
    Export {
        #[arg(long)]
        plan: String,

        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Save the training profile used when `generate` gets no profile flags
    Profile {
        /// Training days per week (1-7)
        #[arg(long)]
        frequency: u8,

        /// novice, beginner, intermediate, advanced or elite
        #[arg(long)]
        experience: String,

        #[arg(long, default_value = "unspecified")]
        gender: String,

        /// Comma-separated muscles to prioritize
        #[arg(long, default_value = "")]
        priorities: String,
    },

    /// List the split templates
    Splits,
}

fn main() -> Result<()> {
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    let store = JsonProfileStore::new(data_dir);

    match cli.command {
        Commands::Generate {
            frequency,
            experience,
            gender,
            priorities,
            taxonomy,
            catalog,
            json,
            save,
        } => {
            let profile = match (frequency, experience) {
                (Some(frequency), Some(experience)) => {
                    TrainingProfile::new(frequency, &experience, &gender, priorities)?
                }
                _ => store.load_profile()?,
            };
            let request = GenerateRequest {
                profile,
                taxonomy,
                catalog,
                json,
                save,
            };
            cmd_generate(&store, &config, request)
        }
        Commands::Swap {
            plan,
            day,
            slot,
            count,
            apply,
            taxonomy,
        } => cmd_swap(&store, &config, &plan, day, slot, count, apply, taxonomy),
        Commands::Export { plan, out } => cmd_export(&store, &plan, out),
        Commands::Profile {
            frequency,
            experience,
            gender,
            priorities,
        } => {
            let profile = TrainingProfile::new(frequency, &experience, &gender, priorities)?;
            store.save_profile(&profile)?;
            println!(
                "✓ Saved profile: {} day(s)/week, {}, {}",
                profile.frequency, profile.experience, profile.gender
            );
            Ok(())
        }
        Commands::Splits => cmd_splits(),
    }
}

struct GenerateRequest {
    profile: TrainingProfile,
    taxonomy: Option<PathBuf>,
    catalog: Option<PathBuf>,
    json: bool,
    save: Option<String>,
}

fn cmd_generate(store: &JsonProfileStore, config: &Config, request: GenerateRequest) -> Result<()> {
    let taxonomy = resolve_taxonomy(request.taxonomy.as_deref(), config)?;
    let catalog = resolve_catalog(request.catalog.as_deref(), config)?;

    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }

    let generator = PlanGenerator::new(taxonomy, config.muscle_divisions());
    let outcome = generator.generate(&request.profile)?;
    let formatted = format_plan(&outcome.generated, &catalog);

    if request.json {
        let output = serde_json::json!({
            "split_index": outcome.split_index,
            "template": outcome.template,
            "prioritized": outcome.prioritized,
            "days": formatted.days,
            "gaps": outcome.generated.gaps,
            "missing_from_catalog": formatted.missing,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_plan(&outcome, &formatted);
    }

    if let Some(name) = request.save {
        let plan = PersistedPlan::with_prescription(
            name,
            &outcome.generated,
            config.handoff.sets,
            config.handoff.reps,
        );
        store.save_plan(&plan)?;
        if !request.json {
            println!("✓ Saved plan '{}' ({} exercises)", plan.name, plan.exercise_count());
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_swap(
    store: &JsonProfileStore,
    config: &Config,
    plan_name: &str,
    day: u8,
    slot: usize,
    count: usize,
    apply: bool,
    taxonomy: Option<PathBuf>,
) -> Result<()> {
    let mut plan = store
        .load_plan(plan_name)?
        .ok_or_else(|| Error::Store(format!("no saved plan named '{}'", plan_name)))?;

    let index = slot
        .checked_sub(1)
        .ok_or_else(|| Error::Other("slot numbers start at 1".into()))?;
    let generated = plan.to_generated();
    let current = generated
        .exercise_at(day, index)
        .ok_or_else(|| Error::Other(format!("plan has no exercise at day {} slot {}", day, slot)))?
        .to_string();

    let taxonomy = resolve_taxonomy(taxonomy.as_deref(), config)?;
    let mut session = SubstitutionSession::new(taxonomy);
    if config.substitution.avoid_plan_duplicates {
        session.exclude(generated.exercise_names().filter(|n| *n != current));
    }

    // Offers carry over between runs; a fresh slot counts its placed
    // exercise as already shown.
    match plan.offered_at(day, index) {
        [] => session.remember([current.as_str()]),
        history => session.remember(history.iter().cloned()),
    }

    println!("Alternatives for {} (day {}, slot {}):", current, day, slot);
    let mut last = None;
    for n in 1..=count.max(1) {
        match session.next_alternative(&current) {
            Some(alternative) => {
                println!("  {}. {}", n, alternative);
                last = Some(alternative);
            }
            None => {
                println!("  No alternative available.");
                break;
            }
        }
    }

    let replacement = match (apply, last) {
        (true, Some(replacement)) => {
            plan.replace(day, index, replacement.clone())?;
            Some(replacement)
        }
        _ => None,
    };

    plan.set_offered_at(day, index, session.offered().iter().cloned().collect());
    store.save_plan(&plan)?;

    if let Some(replacement) = replacement {
        println!("✓ Replaced {} with {}", current, replacement);
    }

    Ok(())
}

fn cmd_export(store: &JsonProfileStore, plan_name: &str, out: Option<PathBuf>) -> Result<()> {
    let plan = store
        .load_plan(plan_name)?
        .ok_or_else(|| Error::Store(format!("no saved plan named '{}'", plan_name)))?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let rows = plan.write_csv(File::create(&path)?)?;
            println!("✓ Exported {} exercises to {}", rows, path.display());
        }
        None => {
            plan.write_csv(io::stdout().lock())?;
        }
    }

    Ok(())
}

fn cmd_splits() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for (index, template) in SPLIT_TEMPLATES.iter().enumerate() {
        writeln!(stdout, "{:>2}  {}", index, template.join(" | "))?;
    }
    Ok(())
}

/// Taxonomy from the flag, then config, then the bundled tree
fn resolve_taxonomy(flag: Option<&Path>, config: &Config) -> Result<Arc<ExerciseTaxonomy>> {
    match flag.or(config.resources.taxonomy_path.as_deref()) {
        Some(path) => {
            let nodes = load_taxonomy_tree(path)?;
            Ok(Arc::new(ExerciseTaxonomy::from_nodes(&nodes)))
        }
        None => Ok(default_taxonomy()),
    }
}

fn resolve_catalog(flag: Option<&Path>, config: &Config) -> Result<ExerciseCatalog> {
    match flag.or(config.resources.catalog_path.as_deref()) {
        Some(path) => load_catalog(path),
        None => Ok(get_default_catalog().clone()),
    }
}

fn display_plan(outcome: &PlanOutcome, formatted: &FormattedPlan) {
    println!();
    println!(
        "Split {} ({} days): {}",
        outcome.split_index,
        outcome.generated.days.len(),
        outcome.template.join(" | ")
    );
    if !outcome.prioritized.is_empty() {
        println!("Prioritized: {}", outcome.prioritized.join(", "));
    }

    for day in &formatted.days {
        println!();
        println!(
            "Day {}: {}",
            day.day,
            day.muscles.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        for (i, card) in day.exercises.iter().enumerate() {
            println!("  {}. {} [{}]", i + 1, card.name, card.exercise_type);
        }
    }

    if !outcome.generated.gaps.is_empty() {
        println!();
        println!("Unfilled slots:");
        for gap in &outcome.generated.gaps {
            println!("  day {}: {}", gap.day, gap.token);
        }
    }

    println!();
}
