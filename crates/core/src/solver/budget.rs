use crate::domain::{Selection, Share};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What to do when the next share costs more than what is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// End the purchase run at the first unaffordable share.
    #[default]
    StopAtFirstRejection,
    /// Pass over unaffordable shares and keep trying later ones.
    SkipUnaffordable,
}

impl FromStr for FillPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop" | "stop_at_first_rejection" => Ok(Self::StopAtFirstRejection),
            "skip" | "skip_unaffordable" => Ok(Self::SkipUnaffordable),
            other => Err(format!("unknown fill policy {other:?} (expected stop or skip)")),
        }
    }
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopAtFirstRejection => f.write_str("stop"),
            Self::SkipUnaffordable => f.write_str("skip"),
        }
    }
}

/// Buys shares in sequence order while money remains.
///
/// Spending is tracked by accumulation in purchase order, the same order the
/// selection totals are summed in, so `total_cost <= budget` holds exactly.
pub fn select<'a, I>(sequence: I, budget: f64, policy: FillPolicy) -> Selection<'a>
where
    I: IntoIterator<Item = &'a Share>,
{
    let mut spent = 0.0_f64;
    let mut bought = Vec::new();

    for share in sequence {
        if spent >= budget {
            break;
        }
        if spent + share.price <= budget {
            spent += share.price;
            bought.push(share);
        } else if policy == FillPolicy::StopAtFirstRejection {
            break;
        }
    }

    Selection::new(bought)
}
