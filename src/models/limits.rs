use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::Category;

/// Spending limits by category. Categories without an entry are exempt
/// from alerting, so pure income categories simply never appear here.
///
/// Entries are kept in the canonical category order.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitTable {
    entries: Vec<(Category, Decimal)>,
}

impl LimitTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Starter limits seeded on a fresh ledger.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        let defaults: &[(Category, i64)] = &[
            (Category::Food, 15_000),
            (Category::Transport, 5_000),
            (Category::Housing, 30_000),
            (Category::Entertainment, 8_000),
            (Category::Shopping, 10_000),
            (Category::Utilities, 6_000),
            (Category::Health, 12_000),
            (Category::Education, 20_000),
            (Category::Other, 5_000),
        ];
        for &(category, limit) in defaults {
            table.set(category, Decimal::from(limit));
        }
        table
    }

    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, limit)| *limit)
    }

    /// Insert or replace the limit for a category.
    pub fn set(&mut self, category: Category, limit: Decimal) {
        self.entries.retain(|(c, _)| *c != category);
        self.entries.push((category, limit));
        self.entries.sort_by_key(|(c, _)| c.rank());
    }

    /// Remove the limit for a category. Returns whether one was present.
    pub fn clear(&mut self, category: Category) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(c, _)| *c != category);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// On-disk form: a JSON object of category name to number.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut map = serde_json::Map::new();
        for (category, limit) in &self.entries {
            let value = limit.to_f64().unwrap_or(0.0);
            map.insert(category.as_str().to_string(), value.into());
        }
        serde_json::to_string(&serde_json::Value::Object(map))
    }

    /// Parse the on-disk form. Entries that are not positive numbers are
    /// dropped rather than failing the whole table.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let mut table = Self::empty();
        if let serde_json::Value::Object(map) = value {
            for (name, entry) in map {
                let Some(limit) = entry.as_f64().and_then(Decimal::from_f64) else {
                    continue;
                };
                if limit > Decimal::ZERO {
                    table.set(Category::parse(&name), limit);
                }
            }
        }
        Ok(table)
    }
}
