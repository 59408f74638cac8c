use crate::domain::Selection;

/// `(total_cost, total_profit)` summed over the selection's shares.
pub fn evaluate(selection: &Selection<'_>) -> (f64, f64) {
    selection
        .shares()
        .iter()
        .fold((0.0, 0.0), |(cost, profit), s| (cost + s.price, profit + s.profit))
}

/// Sorts by descending total profit. The sort is stable, so equal profits
/// keep the order they were enumerated in and the first element is the best.
pub fn rank(mut selections: Vec<Selection<'_>>) -> Vec<Selection<'_>> {
    selections.sort_by(|a, b| b.total_profit().total_cmp(&a.total_profit()));
    selections
}

/// Keeps the best `capacity` selections seen so far, in the same order
/// [`rank`] would produce for the full sequence.
#[derive(Debug, Clone)]
pub struct TopStrategies<'a> {
    capacity: usize,
    entries: Vec<Selection<'a>>,
}

impl<'a> TopStrategies<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(64)),
        }
    }

    pub fn push(&mut self, selection: Selection<'a>) {
        let profit = selection.total_profit();
        // Later arrivals go after equal profits.
        let pos = self
            .entries
            .partition_point(|e| e.total_profit().total_cmp(&profit).is_ge());
        if pos >= self.capacity {
            return;
        }
        self.entries.insert(pos, selection);
        self.entries.truncate(self.capacity);
    }

    pub fn into_ranked(self) -> Vec<Selection<'a>> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Share;

    fn shares() -> Vec<Share> {
        vec![
            Share::try_new("A", 100.0, 10.0, 500.0).unwrap(),
            Share::try_new("B", 200.0, 5.0, 500.0).unwrap(),
            Share::try_new("C", 50.0, 20.0, 500.0).unwrap(),
            Share::try_new("D", 30.0, 50.0, 500.0).unwrap(),
        ]
    }

    #[test]
    fn evaluate_is_a_pure_reduction() {
        let s = shares();
        let sel = Selection::new(vec![&s[2], &s[0]]);
        assert_eq!(evaluate(&sel), (150.0, 20.0));
        assert_eq!(evaluate(&sel), evaluate(&sel));
        assert_eq!(evaluate(&Selection::empty()), (0.0, 0.0));
    }

    #[test]
    fn rank_orders_by_profit_and_keeps_ties_in_place() {
        let s = shares();
        let ranked = rank(vec![
            Selection::new(vec![&s[0]]),
            Selection::new(vec![&s[3]]),
            Selection::new(vec![&s[1]]),
            Selection::new(vec![&s[2], &s[0]]),
        ]);
        let names: Vec<Vec<&str>> = ranked.iter().map(|x| x.names()).collect();
        assert_eq!(
            names,
            vec![vec!["C", "A"], vec!["D"], vec!["A"], vec!["B"]]
        );
    }

    #[test]
    fn top_strategies_matches_full_rank() {
        let s = shares();
        let all: Vec<Selection> = vec![
            Selection::new(vec![&s[0]]),
            Selection::new(vec![&s[1]]),
            Selection::new(vec![&s[2]]),
            Selection::new(vec![&s[3]]),
            Selection::new(vec![&s[0], &s[2]]),
            Selection::new(vec![&s[1], &s[2]]),
            Selection::new(vec![&s[2], &s[3]]),
            Selection::empty(),
        ];
        for k in 1..=all.len() + 1 {
            let mut top = TopStrategies::new(k);
            for sel in all.iter().cloned() {
                top.push(sel);
            }
            let mut expected = rank(all.clone());
            expected.truncate(k);
            assert_eq!(top.into_ranked(), expected, "k={k}");
        }
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let s = shares();
        let mut top = TopStrategies::new(0);
        top.push(Selection::new(vec![&s[0]]));
        assert!(top.into_ranked().is_empty());
    }
}
