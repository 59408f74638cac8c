use serde::Serialize;
use std::fmt;

/// A purchasable share with its expected profit rate.
///
/// Instances only come out of [`Share::try_new`], so every `Share` satisfies
/// `0 < price <= max_spending` and `profit_rate > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub name: String,
    pub price: f64,
    /// Percent, e.g. `20.0` for 20%.
    pub profit_rate: f64,
    /// `price * profit_rate / 100`.
    pub profit: f64,
}

impl Share {
    pub fn try_new(
        name: impl Into<String>,
        price: f64,
        profit_rate: f64,
        max_spending: f64,
    ) -> Result<Self, ShareRejection> {
        if !price.is_finite() || !profit_rate.is_finite() {
            return Err(ShareRejection::NotFinite);
        }
        if price <= 0.0 {
            return Err(ShareRejection::NonPositivePrice(price));
        }
        if price > max_spending {
            return Err(ShareRejection::PriceAboveBudget {
                price,
                max_spending,
            });
        }
        if profit_rate <= 0.0 {
            return Err(ShareRejection::NonPositiveProfitRate(profit_rate));
        }

        Ok(Self {
            name: name.into(),
            price,
            profit_rate,
            profit: price * profit_rate / 100.0,
        })
    }
}

/// Why a record could not become a [`Share`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShareRejection {
    MissingField(&'static str),
    NotANumber { field: &'static str, raw: String },
    NotFinite,
    NonPositivePrice(f64),
    PriceAboveBudget { price: f64, max_spending: f64 },
    NonPositiveProfitRate(f64),
}

impl fmt::Display for ShareRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::NotANumber { field, raw } => write!(f, "`{field}` is not a number: {raw:?}"),
            Self::NotFinite => write!(f, "price and profit rate must be finite"),
            Self::NonPositivePrice(p) => write!(f, "price must be positive (got {p})"),
            Self::PriceAboveBudget {
                price,
                max_spending,
            } => write!(f, "price {price} exceeds max spending {max_spending}"),
            Self::NonPositiveProfitRate(r) => write!(f, "profit rate must be positive (got {r})"),
        }
    }
}

impl std::error::Error for ShareRejection {}
