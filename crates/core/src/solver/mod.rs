pub mod budget;
pub mod combinations;
pub mod evaluate;

use crate::config::{Settings, DEFAULT_MAX_EXHAUSTIVE_SHARES, DEFAULT_MAX_SPENDING};
use crate::domain::{Selection, Share};
use anyhow::{ensure, Result};
use budget::{select, FillPolicy};
use combinations::{candidate_count, greedy_order, subsets};
use evaluate::{evaluate, TopStrategies};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Every non-empty subset, best total profit wins.
    Exhaustive,
    /// One pass in descending profit-rate order.
    Greedy,
}

impl FromStr for SolverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "bruteforce" => Ok(Self::Exhaustive),
            "greedy" | "optimized" => Ok(Self::Greedy),
            other => Err(format!(
                "unknown solver mode {other:?} (expected exhaustive or greedy)"
            )),
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhaustive => f.write_str("exhaustive"),
            Self::Greedy => f.write_str("greedy"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub mode: SolverMode,
    pub budget: f64,
    pub fill_policy: FillPolicy,
    /// Exhaustive search refuses inputs with more shares than this.
    pub max_exhaustive_shares: usize,
    /// How many ranked strategies to keep (exhaustive mode).
    pub top: usize,
}

impl SolveOptions {
    pub fn new(mode: SolverMode, budget: f64) -> Self {
        Self {
            mode,
            budget,
            fill_policy: FillPolicy::default(),
            max_exhaustive_shares: DEFAULT_MAX_EXHAUSTIVE_SHARES,
            top: 1,
        }
    }

    pub fn from_settings(mode: SolverMode, settings: &Settings) -> Self {
        Self {
            max_exhaustive_shares: settings.max_exhaustive_shares,
            ..Self::new(mode, settings.max_spending)
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::new(SolverMode::Exhaustive, DEFAULT_MAX_SPENDING)
    }
}

#[derive(Debug, Clone)]
pub struct Solution<'a> {
    pub mode: SolverMode,
    pub best: Selection<'a>,
    /// Best strategies first. Greedy mode always holds exactly its one selection.
    pub ranked: Vec<Selection<'a>>,
    pub candidates_evaluated: u64,
    pub elapsed: Duration,
}

/// Runs the selected solver over `shares`.
///
/// Fails only on invalid options or when exhaustive search is asked to
/// enumerate more shares than `max_exhaustive_shares`.
pub fn solve<'a>(shares: &'a [Share], opts: &SolveOptions) -> Result<Solution<'a>> {
    ensure!(
        opts.budget.is_finite() && opts.budget > 0.0,
        "budget must be a positive amount (got {})",
        opts.budget
    );
    ensure!(opts.top >= 1, "top must be at least 1");

    let started = Instant::now();
    let (ranked, candidates_evaluated) = match opts.mode {
        SolverMode::Exhaustive => solve_exhaustive(shares, opts)?,
        SolverMode::Greedy => {
            let ordered = greedy_order(shares);
            (vec![select(ordered, opts.budget, opts.fill_policy)], 1)
        }
    };
    let elapsed = started.elapsed();

    let best = ranked.first().cloned().unwrap_or_else(Selection::empty);
    let (total_cost, total_profit) = evaluate(&best);

    tracing::info!(
        mode = %opts.mode,
        shares = shares.len(),
        candidates_evaluated,
        best_len = best.len(),
        total_cost,
        total_profit,
        elapsed_ms = elapsed.as_millis() as u64,
        "solver finished"
    );

    Ok(Solution {
        mode: opts.mode,
        best,
        ranked,
        candidates_evaluated,
        elapsed,
    })
}

fn solve_exhaustive<'a>(
    shares: &'a [Share],
    opts: &SolveOptions,
) -> Result<(Vec<Selection<'a>>, u64)> {
    let n = shares.len();
    ensure!(
        n <= opts.max_exhaustive_shares,
        "exhaustive search over {n} shares ({} candidates) exceeds the limit of {} shares",
        candidate_count(n),
        opts.max_exhaustive_shares
    );

    tracing::debug!(shares = n, candidates = candidate_count(n), "enumerating subsets");

    let mut top = TopStrategies::new(opts.top);
    let mut evaluated: u64 = 0;
    for subset in subsets(n) {
        let sequence = subset.iter().map(|&i| &shares[i]);
        top.push(select(sequence, opts.budget, opts.fill_policy));
        evaluated += 1;
    }

    Ok((top.into_ranked(), evaluated))
}
