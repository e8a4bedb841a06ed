//! Simulate command - replay whole events offline
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_simulations(), report_results()
//! - Level 3: simulate_event(), measure_fairness()
//! - Level 4: formatting utilities

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use teamqueue_core::{Ledger, SchedulerConfig, TeamId, TeamQueue, MATCH_SIZE};

use crate::roster::load_config;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of teams at the event
    #[arg(long, default_value = "24")]
    pub teams: usize,

    /// Matches to draw per event
    #[arg(long, default_value = "60")]
    pub rounds: usize,

    /// Independent events to simulate (run in parallel)
    #[arg(long, default_value = "8")]
    pub runs: usize,

    /// Scheduler config JSON
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fairness measurements for one simulated event
#[derive(Clone, Debug, Serialize)]
pub struct FairnessReport {
    pub run: usize,
    pub seed: Option<u64>,
    pub matches: usize,
    pub min_played: u32,
    pub max_played: u32,
    pub max_waited: u32,
    /// Most matches any two teams spent on the same alliance
    pub max_together: u32,
    /// Most matches any two teams spent on opposite alliances
    pub max_against: u32,
}

impl FairnessReport {
    /// Gap between the busiest and the idlest team
    pub fn played_spread(&self) -> u32 {
        self.max_played - self.min_played
    }
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    generated_at: DateTime<Utc>,
    teams: usize,
    rounds: usize,
    config: &'a SchedulerConfig,
    runs: &'a [FairnessReport],
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Load scheduler config
/// 2. Simulate every event in parallel
/// 3. Report fairness
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    anyhow::ensure!(
        args.teams >= MATCH_SIZE,
        "At least {} teams are needed to form a match",
        MATCH_SIZE
    );

    let config = load_config(args.config.as_deref())?;

    tracing::info!(
        "Simulating {} events: {} teams, {} matches each",
        args.runs,
        args.teams,
        args.rounds
    );

    let reports = run_simulations(&args, &config, seed);
    report_results(&args, &config, &reports, &mut std::io::stdout().lock())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Simulate `args.runs` events in parallel, one seed per run.
///
/// Run seeds count up from `seed`, or from the config file's seed when no
/// `--seed` was given.
fn run_simulations(args: &SimulateArgs, config: &SchedulerConfig, seed: Option<u64>) -> Vec<FairnessReport> {
    let progress = ProgressBar::new(args.runs as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} events")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let reports: Vec<FairnessReport> = (0..args.runs)
        .into_par_iter()
        .map(|run| {
            let mut run_config = config.clone();
            if let Some(base) = seed.or(config.seed) {
                run_config = run_config.with_seed(base.wrapping_add(run as u64));
            }
            let report = simulate_event(run, args.teams, args.rounds, run_config);
            progress.inc(1);
            report
        })
        .collect();

    progress.finish_and_clear();
    reports
}

/// Print per-run results and a summary.
///
/// With `--json` the output is a single JSON document and nothing else.
fn report_results(
    args: &SimulateArgs,
    config: &SchedulerConfig,
    reports: &[FairnessReport],
    out: &mut impl Write,
) -> Result<()> {
    if args.json {
        let output = SimulationOutput {
            generated_at: Utc::now(),
            teams: args.teams,
            rounds: args.rounds,
            config,
            runs: reports,
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "\n=== Simulation Results ===")?;
    writeln!(
        out,
        "{:>4} {:>8} {:>8} {:>8} {:>10} {:>9}",
        "run", "matches", "spread", "waited", "together", "against"
    )?;
    for r in reports {
        writeln!(
            out,
            "{:>4} {:>8} {:>8} {:>8} {:>10} {:>9}",
            r.run,
            r.matches,
            r.played_spread(),
            r.max_waited,
            r.max_together,
            r.max_against
        )?;
    }

    if let Some(worst) = reports.iter().max_by_key(|r| r.played_spread()) {
        writeln!(out, "Worst played spread: {} (run {})", worst.played_spread(), worst.run)?;
    }
    writeln!(out, "Worst repeat partnership: {}", max_of(reports, |r| r.max_together))?;
    writeln!(out, "Worst repeat opposition: {}", max_of(reports, |r| r.max_against))?;

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Queue every team, then draw `rounds` matches, re-queueing each match's
/// teams as soon as it is drawn
pub fn simulate_event(run: usize, teams: usize, rounds: usize, config: SchedulerConfig) -> FairnessReport {
    let seed = config.seed;
    let roster: Vec<TeamId> = (1..=teams).map(|i| TeamId::new(i.to_string())).collect();
    let mut queue = TeamQueue::new(roster.clone(), config);
    for team in &roster {
        queue.queue_team(team.clone());
    }

    let mut matches = 0;
    for _ in 0..rounds {
        let Some(drawn) = queue.new_match() else {
            break;
        };
        for team in drawn.teams() {
            queue.queue_team(team.clone());
        }
        matches += 1;
    }

    let mut report = measure_fairness(queue.ledger(), &roster);
    report.run = run;
    report.seed = seed;
    report.matches = matches;
    report
}

/// Extremes of every ledger counter over the roster
fn measure_fairness(ledger: &Ledger, roster: &[TeamId]) -> FairnessReport {
    let mut report = FairnessReport {
        run: 0,
        seed: None,
        matches: 0,
        min_played: u32::MAX,
        max_played: 0,
        max_waited: 0,
        max_together: 0,
        max_against: 0,
    };

    for (i, a) in roster.iter().enumerate() {
        if let Ok(stats) = ledger.team_stats(a) {
            report.min_played = report.min_played.min(stats.matches_played);
            report.max_played = report.max_played.max(stats.matches_played);
            report.max_waited = report.max_waited.max(stats.rounds_waited);
        }
        for b in &roster[i + 1..] {
            if let Ok(pair) = ledger.pair_stats(a, b) {
                report.max_together = report.max_together.max(pair.together);
                report.max_against = report.max_against.max(pair.against);
            }
        }
    }

    if report.min_played == u32::MAX {
        report.min_played = 0;
    }
    report
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn max_of(reports: &[FairnessReport], field: impl Fn(&FairnessReport) -> u32) -> u32 {
    reports.iter().map(field).max().unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_event_counts_matches() {
        let config = SchedulerConfig::default().with_seed(42);
        let report = simulate_event(0, 12, 20, config);

        assert_eq!(report.matches, 20);
        assert_eq!(report.seed, Some(42));
        assert!(report.max_played >= report.min_played);
        // 20 matches of 6 spread over 12 teams
        assert!(report.max_played >= 10);
        assert!(report.max_together >= 1);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = simulate_event(0, 10, 15, SchedulerConfig::default().with_seed(7));
        let b = simulate_event(0, 10, 15, SchedulerConfig::default().with_seed(7));

        assert_eq!(a.played_spread(), b.played_spread());
        assert_eq!(a.max_together, b.max_together);
        assert_eq!(a.max_against, b.max_against);
    }

    #[test]
    fn test_measure_fairness_empty_ledger() {
        let report = measure_fairness(&Ledger::new(), &[]);
        assert_eq!(report.min_played, 0);
        assert_eq!(report.played_spread(), 0);
    }

    fn args(runs: usize, json: bool) -> SimulateArgs {
        SimulateArgs {
            teams: 8,
            rounds: 5,
            runs,
            config: None,
            json,
        }
    }

    #[test]
    fn test_config_seed_is_run_seed_base() {
        let config = SchedulerConfig::default().with_seed(50);
        let reports = run_simulations(&args(3, false), &config, None);

        let seeds: Vec<Option<u64>> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(50), Some(51), Some(52)]);
    }

    #[test]
    fn test_flag_seed_overrides_config_seed() {
        let config = SchedulerConfig::default().with_seed(50);
        let reports = run_simulations(&args(2, false), &config, Some(7));

        let seeds: Vec<Option<u64>> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(7), Some(8)]);
    }

    #[test]
    fn test_json_report_is_one_document() {
        let config = SchedulerConfig::default().with_seed(3);
        let reports = run_simulations(&args(2, true), &config, None);

        let mut out = Vec::new();
        report_results(&args(2, true), &config, &reports, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["runs"].as_array().unwrap().len(), 2);
        assert_eq!(value["teams"], 8);
    }

    #[test]
    fn test_table_report_lists_every_run() {
        let config = SchedulerConfig::default().with_seed(3);
        let reports = run_simulations(&args(3, false), &config, None);

        let mut out = Vec::new();
        report_results(&args(3, false), &config, &reports, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("=== Simulation Results ==="));
        assert!(text.contains("Worst repeat partnership"));
    }

    #[test]
    fn test_run_simulations_uses_distinct_seeds() {
        let args = SimulateArgs {
            teams: 8,
            rounds: 5,
            runs: 3,
            config: None,
            json: false,
        };
        let reports = run_simulations(&args, &SchedulerConfig::default(), Some(100));

        let seeds: Vec<Option<u64>> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(100), Some(101), Some(102)]);
    }
}
