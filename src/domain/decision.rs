use super::application::Status;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds used by the underwriting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingRules {
    /// Revenue below this is declined outright.
    pub min_revenue: Decimal,
    /// Fewer years in operation than this is declined outright.
    pub min_years: u32,
    pub approval_revenue: Decimal,
    pub approval_years: u32,
    /// Largest requested amount, as a share of revenue, that can be approved.
    pub max_amount_to_revenue: Decimal,
}

impl Default for UnderwritingRules {
    fn default() -> Self {
        Self {
            min_revenue: dec!(50000),
            min_years: 1,
            approval_revenue: dec!(200000),
            approval_years: 3,
            max_amount_to_revenue: dec!(0.5),
        }
    }
}

/// Assigns the initial status of a loan application.
///
/// The first matching clause wins:
/// 1. revenue or years below the minimum: `Declined`
/// 2. revenue and years at the approval level and the amount within the
///    revenue share: `Approved`
/// 3. anything else: `NeedsReview`
///
/// All comparisons are exact decimal comparisons.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    rules: UnderwritingRules,
}

impl DecisionEngine {
    pub fn new(rules: UnderwritingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &UnderwritingRules {
        &self.rules
    }

    pub fn decide(&self, revenue: Decimal, years_in_operation: u32, requested: Decimal) -> Status {
        let rules = &self.rules;
        // A ceiling past Decimal::MAX bounds nothing.
        let within_ceiling = revenue
            .checked_mul(rules.max_amount_to_revenue)
            .is_none_or(|ceiling| requested <= ceiling);

        if revenue < rules.min_revenue || years_in_operation < rules.min_years {
            Status::Declined
        } else if revenue >= rules.approval_revenue
            && years_in_operation >= rules.approval_years
            && within_ceiling
        {
            Status::Approved
        } else {
            Status::NeedsReview
        }
    }
}
