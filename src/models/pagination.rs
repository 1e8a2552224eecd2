//! Pagination envelope for list responses.
//!
//! List endpoints wrap their items as `{"data": [...], "links": {...},
//! "meta": {...}}`. Page tokens are not sent as fields; they are read on
//! demand from the `page_token` parameter of the `next`/`prev` links.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::Result;

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Navigation links.
    #[serde(default)]
    pub links: Option<Links>,
    /// Page metadata.
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl<T> ListResponse<T> {
    /// Token for the next page; `None` on the last page.
    pub fn next_page_token(&self) -> Result<Option<String>> {
        match &self.links {
            Some(links) => links.next_page_token(),
            None => Ok(None),
        }
    }

    /// Token for the previous page; `None` on the first page.
    pub fn prev_page_token(&self) -> Result<Option<String>> {
        match &self.links {
            Some(links) => links.prev_page_token(),
            None => Ok(None),
        }
    }

    /// A response without links is treated as the only page.
    pub fn is_last_page(&self) -> bool {
        self.links.as_ref().map_or(true, Links::is_last_page)
    }
}

/// Links returned along with a list.
///
/// Any link may be `null` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// First page.
    #[serde(default)]
    pub first: Option<String>,
    /// Last page.
    #[serde(default)]
    pub last: Option<String>,
    /// Previous page.
    #[serde(default)]
    pub prev: Option<String>,
    /// Next page.
    #[serde(default)]
    pub next: Option<String>,
}

impl Links {
    /// Page token to request the next page of the list.
    ///
    /// Returns `Ok(None)` when there is no `next` link or it carries no
    /// `page_token`. A malformed link is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use mailerlite_rs::Links;
    ///
    /// let links = Links {
    ///     next: Some("https://connect.mailerlite.com/api/subscribers?page=2&page_token=abc".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(links.next_page_token().unwrap().as_deref(), Some("abc"));
    /// assert!(!links.is_last_page());
    /// ```
    pub fn next_page_token(&self) -> Result<Option<String>> {
        token_from_link(self.next.as_deref())
    }

    /// Page token to request the previous page of the list.
    pub fn prev_page_token(&self) -> Result<Option<String>> {
        token_from_link(self.prev.as_deref())
    }

    /// Number of the next page, read from its `page` parameter.
    pub fn next_page(&self) -> Result<Option<u32>> {
        page_from_link(self.next.as_deref())
    }

    /// Number of the previous page, read from its `page` parameter.
    pub fn prev_page(&self) -> Result<Option<u32>> {
        page_from_link(self.prev.as_deref())
    }

    /// Returns `true` if there is no `next` link.
    pub fn is_last_page(&self) -> bool {
        non_empty(self.next.as_deref()).is_none()
    }
}

/// Page metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Current page number.
    #[serde(default)]
    pub current_page: u32,
    /// Position of the first item on this page; `null` for an empty page.
    #[serde(default)]
    pub from: Option<u32>,
    /// Number of the last page.
    #[serde(default)]
    pub last_page: u32,
    /// Labeled page links for rendering a pager.
    #[serde(default)]
    pub links: Vec<MetaLink>,
    /// Collection URL without query.
    #[serde(default)]
    pub path: String,
    /// Items per page.
    #[serde(default, deserialize_with = "number_or_string")]
    pub per_page: u32,
    /// Position of the last item on this page.
    #[serde(default)]
    pub to: Option<u32>,
    /// Total number of items.
    #[serde(default)]
    pub total: u64,
}

/// One entry of a pager, e.g. `« Previous`, `1`, `Next »`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaLink {
    /// Target URL; `null` for disabled entries.
    #[serde(default)]
    pub url: Option<String>,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Whether this entry is the current page.
    #[serde(default)]
    pub active: bool,
}

fn non_empty(link: Option<&str>) -> Option<&str> {
    link.filter(|link| !link.is_empty())
}

/// Links are absolute URLs or absolute paths such as `/api/subscribers?page=2`.
fn parse_link(link: &str) -> Result<Url> {
    if link.starts_with('/') {
        Ok(Url::parse("http://localhost")?.join(link)?)
    } else {
        Ok(Url::parse(link)?)
    }
}

fn query_param(link: &str, name: &str) -> Result<Option<String>> {
    let url = parse_link(link)?;
    let value = url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned());
    Ok(value.filter(|value| !value.is_empty()))
}

fn token_from_link(link: Option<&str>) -> Result<Option<String>> {
    match non_empty(link) {
        Some(link) => query_param(link, "page_token"),
        None => Ok(None),
    }
}

fn page_from_link(link: Option<&str>) -> Result<Option<u32>> {
    let Some(link) = non_empty(link) else {
        return Ok(None);
    };
    match query_param(link, "page")? {
        Some(page) => page
            .parse()
            .map(Some)
            .map_err(|_| crate::Error::InvalidInput(format!("invalid page number in link: {link}"))),
        None => Ok(None),
    }
}

/// The API has been seen sending `per_page` as a string.
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
