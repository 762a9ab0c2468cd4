//! `GET /streams` filters.

use super::Query;

/// Helix caps every multi-valued filter and the page size at 100.
pub const MAX_FILTER_VALUES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamType {
    #[default]
    All,
    Live,
    Vodcast,
}

impl StreamType {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamType::All => "all",
            StreamType::Live => "live",
            StreamType::Vodcast => "vodcast",
        }
    }
}

/// Query builder for active streams. Every filter keeps its own key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamQuery {
    user_ids: Vec<String>,
    user_logins: Vec<String>,
    game_ids: Vec<String>,
    languages: Vec<String>,
    community_ids: Vec<String>,
    first: Option<usize>,
    stream_type: Option<StreamType>,
}

impl StreamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_ids.push(id.into());
        self
    }

    pub fn user_login(mut self, login: impl Into<String>) -> Self {
        self.user_logins.push(login.into());
        self
    }

    pub fn game_id(mut self, id: impl Into<String>) -> Self {
        self.game_ids.push(id.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn community_id(mut self, id: impl Into<String>) -> Self {
        self.community_ids.push(id.into());
        self
    }

    /// Page size, clamped to `1..=100`.
    pub fn first(mut self, first: usize) -> Self {
        self.first = Some(first.clamp(1, MAX_FILTER_VALUES));
        self
    }

    pub fn stream_type(mut self, stream_type: StreamType) -> Self {
        self.stream_type = Some(stream_type);
        self
    }

    /// Query pairs, with a repeated key per value of a multi-valued filter.
    pub fn to_query(&self) -> Query {
        let filters = [
            ("user_id", &self.user_ids),
            ("user_login", &self.user_logins),
            ("game_id", &self.game_ids),
            ("language", &self.languages),
            ("community_id", &self.community_ids),
        ];

        let mut query: Query = filters
            .into_iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .take(MAX_FILTER_VALUES)
                    .map(move |value| (key.to_owned(), value.clone()))
            })
            .collect();

        if let Some(first) = self.first {
            query.push(("first".to_owned(), first.to_string()));
        }
        if let Some(stream_type) = self.stream_type {
            query.push(("type".to_owned(), stream_type.as_str().to_owned()));
        }
        query
    }
}
