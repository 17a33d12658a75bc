//! Query model: equality / membership filters and a single ordering.
//!
//! Backends that cannot push a query down to the server evaluate it
//! client-side with [`Query::apply`], which gives every backend the same
//! semantics:
//!
//! - filters compare JSON values exactly and are ANDed together;
//! - an ordered query drops documents that lack the ordering field;
//! - numbers order numerically, strings lexicographically, and values of
//!   different types order by type (null, bool, number, string, array, object);
//! - ties keep insertion order.

use serde_json::Value;
use std::cmp::Ordering;

use crate::error::StoreError;
use crate::store::DocumentData;

/// Upper bound on the values in one membership filter.
pub const MAX_IN_VALUES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    Equals(Value),
    In(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn matches(&self, document: &DocumentData) -> bool {
        let Some(value) = document.get(&self.field) else {
            return false;
        };

        match &self.op {
            FilterOp::Equals(expected) => value == expected,
            FilterOp::In(candidates) => candidates.iter().any(|candidate| candidate == value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            op: FilterOp::Equals(value.into()),
        });
        self
    }

    pub fn where_in<V>(mut self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        self.filters.push(Filter {
            field: field.into(),
            op: FilterOp::In(values.into_iter().map(Into::into).collect()),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Rejects queries the remote store would refuse.
    pub fn validate(&self) -> Result<(), StoreError> {
        for filter in &self.filters {
            if let FilterOp::In(values) = &filter.op {
                if values.is_empty() {
                    return Err(StoreError::InvalidQuery(format!(
                        "membership filter on '{}' has no values",
                        filter.field
                    )));
                }
                if values.len() > MAX_IN_VALUES {
                    return Err(StoreError::InvalidQuery(format!(
                        "membership filter on '{}' has {} values, at most {} allowed",
                        filter.field,
                        values.len(),
                        MAX_IN_VALUES
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn matches(&self, document: &DocumentData) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }

    /// Evaluates the query over documents given in insertion order.
    pub fn apply<I>(&self, documents: I) -> Vec<DocumentData>
    where
        I: IntoIterator<Item = DocumentData>,
    {
        let mut results: Vec<DocumentData> = documents
            .into_iter()
            .filter(|document| self.matches(document))
            .collect();

        if let Some(order) = &self.order_by {
            results.retain(|document| document.contains_key(&order.field));
            results.sort_by(|a, b| {
                let ordering = compare_values(&a[&order.field], &b[&order.field]);
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        results
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
