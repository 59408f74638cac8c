use algoinvest_core::domain::Selection;
use algoinvest_core::ingest::LoadedShares;
use algoinvest_core::solver::{Solution, SolverMode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub mode: SolverMode,
    pub budget: f64,
    pub generated_at: DateTime<Utc>,
    pub shares_loaded: usize,
    pub records_skipped: usize,
    pub best: &'a Selection<'a>,
    pub candidates_evaluated: u64,
    pub elapsed_secs: f64,
    pub runners_up: Vec<StrategySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub rank: usize,
    pub shares: Vec<String>,
    pub total_cost: f64,
    pub total_profit: f64,
}

impl<'a> RunReport<'a> {
    pub fn new(
        solution: &'a Solution<'a>,
        loaded: &LoadedShares,
        budget: f64,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let runners_up = solution
            .ranked
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, sel)| StrategySummary {
                rank: i + 1,
                shares: sel.names().into_iter().map(str::to_string).collect(),
                total_cost: sel.total_cost(),
                total_profit: sel.total_profit(),
            })
            .collect();

        Self {
            mode: solution.mode,
            budget,
            generated_at,
            shares_loaded: loaded.shares.len(),
            records_skipped: loaded.skipped,
            best: &solution.best,
            candidates_evaluated: solution.candidates_evaluated,
            elapsed_secs: solution.elapsed.as_secs_f64(),
            runners_up,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.best.is_empty() {
            out.push_str("No share could be bought within the budget.\n");
        }
        for share in self.best.shares() {
            let _ = writeln!(
                out,
                "{} : {:.2} € x {:.2} % = {:.2} €",
                share.name, share.price, share.profit_rate, share.profit
            );
        }

        let _ = writeln!(out, "\nTotal cost : {:.2} €", self.best.total_cost());
        let _ = writeln!(out, "Total profit : {:.2} €", self.best.total_profit());

        if !self.runners_up.is_empty() {
            out.push_str("\nRunner-up strategies:\n");
            for s in &self.runners_up {
                let _ = writeln!(
                    out,
                    "#{} : {} -> cost {:.2} € / profit {:.2} €",
                    s.rank,
                    s.shares.join(", "),
                    s.total_cost,
                    s.total_profit
                );
            }
        }

        match self.mode {
            SolverMode::Exhaustive => {
                let _ = writeln!(
                    out,
                    "\n{} combinations analyzed",
                    group_thousands(self.candidates_evaluated)
                );
                let _ = writeln!(out, "{:.2} seconds", self.elapsed_secs);
            }
            SolverMode::Greedy => {
                let _ = writeln!(out, "\n{:.3} seconds", self.elapsed_secs);
            }
        }

        out
    }
}

/// `1048575` -> `1 048 575`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
