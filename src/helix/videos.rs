//! `GET /videos` filters.

use super::Query;
use super::streams::MAX_FILTER_VALUES;
use crate::error::{HelixError, HelixResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoPeriod {
    #[default]
    All,
    Day,
    Week,
    Month,
}

impl VideoPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoPeriod::All => "all",
            VideoPeriod::Day => "day",
            VideoPeriod::Week => "week",
            VideoPeriod::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    Time,
    Trending,
    Views,
}

impl VideoSort {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoSort::Time => "time",
            VideoSort::Trending => "trending",
            VideoSort::Views => "views",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoType {
    #[default]
    All,
    Upload,
    Archive,
    Highlight,
}

impl VideoType {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::All => "all",
            VideoType::Upload => "upload",
            VideoType::Archive => "archive",
            VideoType::Highlight => "highlight",
        }
    }
}

/// Videos by id, or all videos of a user or game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoQuery {
    ids: Vec<String>,
    user_id: Option<String>,
    game_id: Option<String>,
    first: Option<usize>,
    language: Option<String>,
    period: Option<VideoPeriod>,
    sort: Option<VideoSort>,
    video_type: Option<VideoType>,
}

impl VideoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn game_id(mut self, id: impl Into<String>) -> Self {
        self.game_id = Some(id.into());
        self
    }

    /// Page size, clamped to `1..=100`.
    pub fn first(mut self, first: usize) -> Self {
        self.first = Some(first.clamp(1, MAX_FILTER_VALUES));
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn period(mut self, period: VideoPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn sort(mut self, sort: VideoSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn video_type(mut self, video_type: VideoType) -> Self {
        self.video_type = Some(video_type);
        self
    }

    pub fn to_query(&self) -> HelixResult<Query> {
        if self.ids.is_empty() && self.user_id.is_none() && self.game_id.is_none() {
            return Err(HelixError::MissingFilter("id, user_id or game_id"));
        }

        let mut query: Query = self
            .ids
            .iter()
            .take(MAX_FILTER_VALUES)
            .map(|id| ("id".to_owned(), id.clone()))
            .collect();

        let optional = [
            ("user_id", self.user_id.clone()),
            ("game_id", self.game_id.clone()),
            ("first", self.first.map(|n| n.to_string())),
            ("language", self.language.clone()),
            ("period", self.period.map(|p| p.as_str().to_owned())),
            ("sort", self.sort.map(|s| s.as_str().to_owned())),
            ("type", self.video_type.map(|t| t.as_str().to_owned())),
        ];
        query.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| Some((key.to_owned(), value?))),
        );
        Ok(query)
    }
}
