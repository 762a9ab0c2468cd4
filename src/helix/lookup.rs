//! `GET /users`, `GET /games` and `GET /users/follows` filters.
//!
//! Each of these endpoints rejects a request without at least one of its
//! identifying filters, so `to_query` fails locally instead.

use super::Query;
use super::streams::MAX_FILTER_VALUES;
use crate::error::{HelixError, HelixResult};

fn push_all(query: &mut Query, key: &str, values: &[String]) {
    query.extend(
        values
            .iter()
            .take(MAX_FILTER_VALUES)
            .map(|value| (key.to_owned(), value.clone())),
    );
}

/// Users by id and/or login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    ids: Vec<String>,
    logins: Vec<String>,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.logins.push(login.into());
        self
    }

    pub fn to_query(&self) -> HelixResult<Query> {
        if self.ids.is_empty() && self.logins.is_empty() {
            return Err(HelixError::MissingFilter("id or login"));
        }
        let mut query = Query::new();
        push_all(&mut query, "id", &self.ids);
        push_all(&mut query, "login", &self.logins);
        Ok(query)
    }
}

/// Games by id and/or name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameQuery {
    ids: Vec<String>,
    names: Vec<String>,
}

impl GameQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn to_query(&self) -> HelixResult<Query> {
        if self.ids.is_empty() && self.names.is_empty() {
            return Err(HelixError::MissingFilter("id or name"));
        }
        let mut query = Query::new();
        push_all(&mut query, "id", &self.ids);
        push_all(&mut query, "name", &self.names);
        Ok(query)
    }
}

/// Follow relationships from and/or to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowQuery {
    from_id: Option<String>,
    to_id: Option<String>,
    first: Option<usize>,
}

impl FollowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_id(mut self, id: impl Into<String>) -> Self {
        self.from_id = Some(id.into());
        self
    }

    pub fn to_id(mut self, id: impl Into<String>) -> Self {
        self.to_id = Some(id.into());
        self
    }

    /// Page size, clamped to `1..=100`.
    pub fn first(mut self, first: usize) -> Self {
        self.first = Some(first.clamp(1, MAX_FILTER_VALUES));
        self
    }

    pub fn to_query(&self) -> HelixResult<Query> {
        if self.from_id.is_none() && self.to_id.is_none() {
            return Err(HelixError::MissingFilter("from_id or to_id"));
        }
        let mut query = Query::new();
        if let Some(id) = &self.from_id {
            query.push(("from_id".to_owned(), id.clone()));
        }
        if let Some(id) = &self.to_id {
            query.push(("to_id".to_owned(), id.clone()));
        }
        if let Some(first) = self.first {
            query.push(("first".to_owned(), first.to_string()));
        }
        Ok(query)
    }
}
