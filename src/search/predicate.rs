//! Structured predicate builder for listing lookups.
//!
//! A [`Predicate`] is an ordered list of `(column, operator, value)` triples
//! plus one optional feature-membership group. Conditions are ANDed; the
//! feature ids inside the group are ORed. Rendering goes through
//! [`sqlx::QueryBuilder`], so every value ends up as a bound parameter and
//! column names only ever come from this module.

use crate::search::types::FilterCriteria;
use sqlx::{QueryBuilder, Sqlite};

/// A bindable SQL value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub(crate) fn push_bind_to(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Value::Int(v) => builder.push_bind(v),
            Value::Real(v) => builder.push_bind(v),
            Value::Bool(v) => builder.push_bind(v),
            Value::Text(v) => builder.push_bind(v),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gte,
    Lte,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gte => ">=",
            Op::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub op: Op,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
    any_feature: Vec<i64>,
}

impl Predicate {
    /// One condition per present filter field, in a fixed order
    pub fn from_filters(filters: &FilterCriteria) -> Self {
        let mut predicate = Self::default();

        predicate.push_opt("price", Op::Gte, filters.min_price.map(Value::Real));
        predicate.push_opt("price", Op::Lte, filters.max_price.map(Value::Real));
        predicate.push_opt("area", Op::Gte, filters.min_area.map(Value::Real));
        predicate.push_opt("area", Op::Lte, filters.max_area.map(Value::Real));
        predicate.push_opt("district_id", Op::Eq, filters.district_id.map(Value::Int));
        predicate.push_opt("type_id", Op::Eq, filters.type_id.map(Value::Int));
        predicate.push_opt("rooms", Op::Eq, filters.rooms.map(Value::Int));
        predicate.push_opt("has_balcony", Op::Eq, filters.has_balcony.map(Value::Bool));
        predicate.push_opt("has_elevator", Op::Eq, filters.has_elevator.map(Value::Bool));
        predicate.push_opt("has_parking", Op::Eq, filters.has_parking.map(Value::Bool));

        predicate.any_feature = filters.features.iter().copied().collect();
        predicate
    }

    fn push_opt(&mut self, column: &'static str, op: Op, value: Option<Value>) {
        if let Some(value) = value {
            self.conditions.push(Condition { column, op, value });
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn feature_ids(&self) -> &[i64] {
        &self.any_feature
    }

    /// Available listings matching the predicate, newest first, one page.
    ///
    /// A feature group joins `listing_features` once and relies on
    /// `DISTINCT` so a listing matching several features shows up once.
    pub fn select_listings(&self, limit: i64, offset: i64) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new("SELECT DISTINCT l.* FROM listings l");

        if !self.any_feature.is_empty() {
            builder.push(" JOIN listing_features lf ON lf.listing_id = l.id");
        }

        builder.push(" WHERE l.is_available = 1");

        for condition in &self.conditions {
            builder
                .push(" AND l.")
                .push(condition.column)
                .push(" ")
                .push(condition.op.as_sql())
                .push(" ");
            condition.value.clone().push_bind_to(&mut builder);
        }

        if !self.any_feature.is_empty() {
            builder.push(" AND (");
            for (i, feature_id) in self.any_feature.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push("lf.feature_id = ").push_bind(*feature_id);
            }
            builder.push(")");
        }

        builder
            .push(" ORDER BY l.created_at DESC, l.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
    }
}
