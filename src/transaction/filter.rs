//! Turns optional query criteria into a conjunctive predicate over transactions.

use rusqlite::types::Value;

use super::core::{Category, Region, Transaction, TransactionStatus, TransactionType};

/// Criteria for selecting transactions.
///
/// Every criterion that is set must match, absent criteria match anything.
///
/// `search` is a case-sensitive substring match against the decimal text of
/// the amount, e.g. "500" matches 1500 and 50012. It is not a numeric range
/// filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Text that must appear in the amount's decimal digits.
    pub search: Option<String>,
    /// The exact transaction type.
    pub transaction_type: Option<TransactionType>,
    /// The exact status.
    pub status: Option<TransactionStatus>,
    /// The exact region.
    pub region: Option<Region>,
    /// The exact category.
    pub category: Option<Category>,
}

impl TransactionFilter {
    /// The search text, ignoring an empty string.
    fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|search| !search.is_empty())
    }

    /// Build the SQL `WHERE` clause and its positional parameters.
    ///
    /// Returns an empty string and no parameters when no criteria are set.
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(search) = self.search_text() {
            query_parameters.push(Value::Text(search.to_owned()));
            where_clause_parts.push(format!(
                "instr(CAST(CAST(amount AS INTEGER) AS TEXT), ?{}) > 0",
                query_parameters.len()
            ));
        }

        let equalities = [
            ("type", self.transaction_type.map(|value| value.as_str())),
            ("status", self.status.map(|value| value.as_str())),
            ("region", self.region.map(|value| value.as_str())),
            ("category", self.category.map(|value| value.as_str())),
        ];

        for (column, value) in equalities {
            if let Some(value) = value {
                query_parameters.push(Value::Text(value.to_owned()));
                where_clause_parts.push(format!("{column} = ?{}", query_parameters.len()));
            }
        }

        if where_clause_parts.is_empty() {
            (String::new(), query_parameters)
        } else {
            (
                String::from("WHERE ") + &where_clause_parts.join(" AND "),
                query_parameters,
            )
        }
    }

    /// Check `transaction` against the criteria in memory.
    ///
    /// Agrees with [TransactionFilter::where_clause] for every stored transaction.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let search_matches = self
            .search_text()
            .is_none_or(|search| transaction.amount.to_string().contains(search));

        search_matches
            && self
                .transaction_type
                .is_none_or(|value| value == transaction.transaction_type)
            && self.status.is_none_or(|value| value == transaction.status)
            && self.region.is_none_or(|value| value == transaction.region)
            && self
                .category
                .is_none_or(|value| value == transaction.category)
    }
}
