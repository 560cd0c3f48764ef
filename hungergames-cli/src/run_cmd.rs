//! Run command - play a full game from a Panem input file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_districts(), play_game(), report_results()
//! - Level 3: build_config()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hungergames_core::{
    load_panem, run_game, District, DuelEngine, GameConfig, GameSummary, RandomScope,
    DEFAULT_SEED,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RunArgs {
    /// Panem input file (districts, then people)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Stop after this many duels
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// How non-tessera duelers are drawn
    #[arg(long, value_enum, default_value_t = ScopeArg::Pooled)]
    pub scope: ScopeArg,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Command-line spelling of [`RandomScope`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Draw from every eligible district at once
    Pooled,
    /// Draw within the first eligible district
    FirstEligible,
}

impl From<ScopeArg> for RandomScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Pooled => RandomScope::Pooled,
            ScopeArg::FirstEligible => RandomScope::FirstEligible,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run command
///
/// 1. Load districts from the input file
/// 2. Play the game to the end
/// 3. Report results
pub fn run(args: RunArgs, seed: Option<u64>) -> Result<()> {
    let districts = load_districts(&args)?;
    let config = build_config(&args, seed);

    tracing::info!(
        "Starting game: {} districts, seed={}, scope={:?}",
        districts.len(),
        config.seed,
        config.random_scope
    );

    let summary = play_game(districts, config)?;

    report_results(&summary, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_districts(args: &RunArgs) -> Result<Vec<District>> {
    load_panem(&args.input)
        .with_context(|| format!("Failed to load Panem from {}", args.input.display()))
}

/// Stage every district, put them all in the tree, then play
fn play_game(districts: Vec<District>, config: GameConfig) -> Result<GameSummary> {
    let max_rounds = config.max_rounds;
    let mut engine = DuelEngine::new(config);
    engine.stage_all(districts);
    let added = engine.promote_staged();
    tracing::debug!("{} districts in the game, tree height {}", added, engine.tree().height());

    run_game(&mut engine, max_rounds).context("Game aborted")
}

fn report_results(summary: &GameSummary, args: &RunArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_text_results(summary);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn build_config(args: &RunArgs, seed: Option<u64>) -> GameConfig {
    let mut config = GameConfig::default()
        .with_seed(seed.unwrap_or(DEFAULT_SEED))
        .with_random_scope(args.scope.into());
    if let Some(max) = args.max_rounds {
        config = config.with_max_rounds(max);
    }
    config
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn print_text_results(summary: &GameSummary) {
    println!("\n=== Game Results ===");
    println!("Rounds:      {}", summary.rounds);
    println!("Ended by:    {:?}", summary.termination);
    match summary.winner {
        Some(id) => println!("Winner:      District {}", id),
        None => println!("Winner:      none"),
    }
    println!("Survivors:   {}", format_ids(&summary.survivors));

    if !summary.eliminations.is_empty() {
        println!("\nEliminations:");
        for e in &summary.eliminations {
            println!("  round {:>5}  district {}", e.round, e.district_id);
        }
    }
}

fn format_ids(ids: &[u32]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            input: PathBuf::from("panem.in"),
            max_rounds: None,
            scope: ScopeArg::Pooled,
            json: false,
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&args(), None);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_build_config_overrides() {
        let mut a = args();
        a.max_rounds = Some(10);
        a.scope = ScopeArg::FirstEligible;
        let config = build_config(&a, Some(5));
        assert_eq!(config.seed, 5);
        assert_eq!(config.max_rounds, Some(10));
        assert_eq!(config.random_scope, RandomScope::FirstEligible);
    }

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[]), "-");
        assert_eq!(format_ids(&[1, 3]), "1, 3");
    }
}
