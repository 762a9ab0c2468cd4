//! Cursor-based pagination.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiRequest, ApiResponse, RequestSender};
use crate::error::HelixResult;

const AFTER: &str = "after";
const BEFORE: &str = "before";

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Default, Deserialize)]
struct Pagination {
    cursor: Option<String>,
}

/// One page of results plus the cursor to walk from it.
///
/// `next()` and `previous()` re-issue the request that produced the first
/// page with only the cursor parameter changed.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub cursor: Option<String>,
    request: ApiRequest,
}

impl<T: DeserializeOwned> Page<T> {
    /// Issue `request` and decode the first page.
    pub async fn fetch<S>(sender: &S, request: ApiRequest) -> HelixResult<Self>
    where
        S: RequestSender + ?Sized,
    {
        let response = sender.do_request(request.clone()).await?;
        Self::from_response(&response, request)
    }

    /// Decode `response`, remembering `request` for the neighbouring pages.
    pub fn from_response(response: &ApiResponse, request: ApiRequest) -> HelixResult<Self> {
        let envelope: Envelope<T> = response.json()?;
        Ok(Self {
            data: envelope.data,
            cursor: envelope.pagination.cursor.filter(|c| !c.is_empty()),
            request,
        })
    }

    /// The page after this one, or `None` when there is no cursor.
    pub async fn next<S>(&self, sender: &S) -> HelixResult<Option<Self>>
    where
        S: RequestSender + ?Sized,
    {
        self.walk(sender, AFTER).await
    }

    /// The page before this one, or `None` when there is no cursor.
    pub async fn previous<S>(&self, sender: &S) -> HelixResult<Option<Self>>
    where
        S: RequestSender + ?Sized,
    {
        self.walk(sender, BEFORE).await
    }

    /// The request that produced this page, without any cursor.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    async fn walk<S>(&self, sender: &S, direction: &str) -> HelixResult<Option<Self>>
    where
        S: RequestSender + ?Sized,
    {
        let Some(cursor) = &self.cursor else {
            return Ok(None);
        };
        let mut request = self.request.clone();
        request.query.push((direction.to_owned(), cursor.clone()));

        let response = sender.do_request(request).await?;
        Self::from_response(&response, self.request.clone()).map(Some)
    }
}
