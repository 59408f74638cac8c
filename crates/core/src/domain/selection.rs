use crate::domain::share::Share;
use serde::Serialize;

/// Shares bought in one purchase run, in the order they were considered.
///
/// Borrows from the loaded share list; totals are computed once on
/// construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<'a> {
    shares: Vec<&'a Share>,
    total_cost: f64,
    total_profit: f64,
}

impl<'a> Selection<'a> {
    pub fn new(shares: Vec<&'a Share>) -> Self {
        // Folded from +0.0: an empty f64 `sum()` yields -0.0.
        let total_cost = shares.iter().fold(0.0, |acc, s| acc + s.price);
        let total_profit = shares.iter().fold(0.0, |acc, s| acc + s.profit);
        Self {
            shares,
            total_cost,
            total_profit,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn shares(&self) -> &[&'a Share] {
        &self.shares
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.shares.iter().map(|s| s.name.as_str()).collect()
    }
}
