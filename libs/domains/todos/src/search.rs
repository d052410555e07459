//! Search filter composition.
//!
//! A [`SearchCriteria`] compiles into one [`Clause`] per supplied field. Stores
//! combine the clauses with AND; an empty list matches every todo.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::Todo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchCriteria {
    /// Exact weather match
    pub weather: Option<String>,
    /// Lower bound on `created_at`, inclusive (RFC 3339)
    pub created_at_from: Option<DateTime<Utc>>,
    /// Upper bound on `modified_at`, inclusive (RFC 3339)
    pub modified_at_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    WeatherEq(String),
    CreatedAtFrom(DateTime<Utc>),
    ModifiedAtTo(DateTime<Utc>),
}

impl Clause {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Clause::WeatherEq(weather) => todo.weather == *weather,
            Clause::CreatedAtFrom(from) => todo.created_at >= *from,
            Clause::ModifiedAtTo(to) => todo.modified_at <= *to,
        }
    }
}

impl SearchCriteria {
    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(3);
        if let Some(weather) = &self.weather {
            clauses.push(Clause::WeatherEq(weather.clone()));
        }
        if let Some(from) = self.created_at_from {
            clauses.push(Clause::CreatedAtFrom(from));
        }
        if let Some(to) = self.modified_at_to {
            clauses.push(Clause::ModifiedAtTo(to));
        }
        clauses
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.clauses().iter().all(|clause| clause.matches(todo))
    }
}
