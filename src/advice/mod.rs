use rust_decimal::Decimal;

use crate::models::{Category, LimitTable, Transaction};
use crate::stats::{self, Totals};

/// Savings-rate bucket that picks the summary sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Empty,
    OverBudget,
    Excellent,
    Moderate,
    Low,
}

/// Generated insight text: one summary plus exactly two suggestions
/// (none for an empty ledger).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Advice {
    pub tier: Tier,
    pub summary: String,
    pub suggestions: Vec<String>,
}

const SUGGESTION_SLOTS: usize = 2;

/// Rule-based insight generation: an explicit decision table over the
/// savings rate plus two suggestion slots. Total over any well-formed
/// ledger, including the empty one.
pub(crate) fn generate(txns: &[Transaction], limits: &LimitTable) -> Advice {
    if txns.is_empty() {
        return Advice {
            tier: Tier::Empty,
            summary: "Nothing to analyze yet. Add income and expenses to get insights.".into(),
            suggestions: Vec::new(),
        };
    }

    let totals = stats::totals(txns);
    let category_totals = stats::category_totals(txns);

    let tier = if totals.savings_rate < 0 {
        Tier::OverBudget
    } else if totals.savings_rate >= 30 {
        Tier::Excellent
    } else if totals.savings_rate >= 10 {
        Tier::Moderate
    } else {
        Tier::Low
    };

    let summary = match tier {
        Tier::OverBudget => {
            "You spent more than you earned this period. Review the big expense areas and trim them back."
                .to_string()
        }
        Tier::Excellent => format!(
            "Excellent! You are saving {}% of your income.",
            totals.savings_rate
        ),
        Tier::Moderate => format!(
            "Solid progress. A savings rate of {}% is a good base to build on.",
            totals.savings_rate
        ),
        Tier::Low => format!(
            "Your savings rate is {}%. There is room to tighten up.",
            totals.savings_rate
        ),
        // Empty short-circuits above.
        Tier::Empty => String::new(),
    };

    let over_budget: Vec<Category> = category_totals
        .iter()
        .filter(|(category, spent)| limits.get(*category).is_some_and(|limit| *spent > limit))
        .map(|(category, _)| *category)
        .collect();

    // Highest expense total; ties keep the earlier category in the
    // canonical order, since only a strictly larger total replaces it.
    let mut top_category: Option<(Category, Decimal)> = None;
    for &(category, spent) in &category_totals {
        match top_category {
            Some((_, best)) if spent <= best => {}
            _ => top_category = Some((category, spent)),
        }
    }

    let mut suggestions = Vec::new();
    if let Some((category, spent)) = top_category {
        suggestions.push(format!(
            "Your biggest spending area is {category} ({}). Look there first for easy savings.",
            money(spent)
        ));
    }
    if !over_budget.is_empty() {
        let names: Vec<&str> = over_budget.iter().map(|c| c.as_str()).collect();
        suggestions.push(format!(
            "Over budget in: {}. Rein in those categories before anything else.",
            names.join(", ")
        ));
    } else if totals.savings_rate < 20 && totals.income > Decimal::ZERO {
        let target = totals.income * Decimal::new(2, 1);
        suggestions.push(format!(
            "Try to set aside 20% of your income ({}) as savings.",
            money(target)
        ));
    } else {
        suggestions.push(emergency_fund(&totals));
    }
    while suggestions.len() < SUGGESTION_SLOTS {
        suggestions.push(emergency_fund(&totals));
    }

    Advice {
        tier,
        summary,
        suggestions,
    }
}

fn emergency_fund(totals: &Totals) -> String {
    let fund = totals.expense * Decimal::from(3);
    format!(
        "Keep an emergency fund of about {} (three times your current spending).",
        money(fund)
    )
}

fn money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests;
