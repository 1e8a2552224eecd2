//! Query-string encoding for read options.
//!
//! Each options type declares its own wire keys through [`QueryOptions`]
//! instead of relying on runtime field inspection. The single optional
//! [`Filter`] is kept apart from the other pairs and collapses into one
//! `filter[<name>]=<value>` parameter.

use std::collections::BTreeMap;

use url::{form_urlencoded, Url};

use crate::Result;

/// A single query filter criterion.
///
/// The API accepts at most one filter per request.
///
/// # Example
///
/// ```
/// use mailerlite_rs::Filter;
///
/// let filter = Filter::new("status", "active");
/// assert_eq!(filter.query_key(), "filter[status]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field to filter on, e.g. `status`.
    pub name: String,
    /// Value the field must match.
    pub value: String,
}

impl Filter {
    /// Create a new filter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The query key this filter encodes to.
    pub fn query_key(&self) -> String {
        format!("filter[{}]", self.name)
    }
}

/// Ordered list of query pairs produced by an options type.
///
/// The `push_*` helpers skip empty values so each options type only has to
/// name its keys.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair unconditionally.
    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Append a pair when `value` is `Some`.
    pub fn push_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Append a pair when `value` is non-empty.
    pub fn push_non_empty(self, key: impl Into<String>, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.push(key, value)
        }
    }

    /// Returns `true` if no pairs were added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for QueryPairs {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Options controlling a read request (filtering, paging).
///
/// # Example
///
/// ```
/// use mailerlite_rs::{Filter, QueryOptions, QueryPairs};
///
/// struct GroupOptions {
///     limit: Option<u32>,
///     sort: String,
///     filter: Option<Filter>,
/// }
///
/// impl QueryOptions for GroupOptions {
///     fn query_pairs(&self) -> mailerlite_rs::Result<QueryPairs> {
///         Ok(QueryPairs::new()
///             .push_opt("limit", self.limit)
///             .push_non_empty("sort", &self.sort))
///     }
///
///     fn filter(&self) -> Option<&Filter> {
///         self.filter.as_ref()
///     }
/// }
/// ```
pub trait QueryOptions: Send + Sync {
    /// Query pairs for every non-empty field, keyed by wire name.
    ///
    /// Must not include the filter; return it from [`filter`](Self::filter).
    fn query_pairs(&self) -> Result<QueryPairs>;

    /// The filter criterion, if any.
    fn filter(&self) -> Option<&Filter> {
        None
    }
}

/// Merge `options` into the query string of `base`.
///
/// `None` returns `base` untouched, even if it would not parse. Otherwise
/// keys from `options` replace same-named keys already in `base`, other
/// existing keys are kept, the filter (if any) is appended as
/// `filter[<name>]`, and the query is re-encoded with keys sorted.
pub fn add_options<O>(base: &str, options: Option<&O>) -> Result<String>
where
    O: QueryOptions + ?Sized,
{
    let Some(options) = options else {
        return Ok(base.to_string());
    };

    let mut url = Url::parse(base)?;

    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let mut replacements: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in options.query_pairs()? {
        replacements.entry(key).or_default().push(value);
    }
    values.extend(replacements);

    if let Some(filter) = options.filter() {
        values
            .entry(filter.query_key())
            .or_default()
            .push(filter.value.clone());
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(
            values
                .iter()
                .flat_map(|(key, vals)| vals.iter().map(move |val| (key, val))),
        )
        .finish();

    url.set_query(if encoded.is_empty() {
        None
    } else {
        Some(encoded.as_str())
    });

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const BASE: &str = "https://connect.mailerlite.com/api/subscribers";

    #[derive(Default)]
    struct Options {
        limit: Option<u32>,
        page: Option<u32>,
        filter: Option<Filter>,
    }

    impl QueryOptions for Options {
        fn query_pairs(&self) -> Result<QueryPairs> {
            Ok(QueryPairs::new()
                .push_opt("limit", self.limit)
                .push_opt("page", self.page))
        }

        fn filter(&self) -> Option<&Filter> {
            self.filter.as_ref()
        }
    }

    fn pairs(url: &str) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_absent_options_return_base_verbatim() {
        assert_eq!(add_options::<Options>(BASE, None).unwrap(), BASE);
        assert_eq!(
            add_options::<dyn QueryOptions>("not a url", None).unwrap(),
            "not a url"
        );
    }

    #[test]
    fn test_empty_options_leave_url_unchanged() {
        let options = Options::default();
        assert_eq!(add_options(BASE, Some(&options)).unwrap(), BASE);
    }

    #[test]
    fn test_no_filter_emits_no_filter_key() {
        let options = Options {
            limit: Some(25),
            ..Default::default()
        };
        let url = add_options(BASE, Some(&options)).unwrap();
        assert_eq!(url, format!("{BASE}?limit=25"));
        assert!(pairs(&url).iter().all(|(k, _)| !k.starts_with("filter")));
    }

    #[test]
    fn test_filter_collapses_into_single_key() {
        let options = Options {
            filter: Some(Filter::new("status", "active")),
            ..Default::default()
        };
        let url = add_options(BASE, Some(&options)).unwrap();

        assert_eq!(url, format!("{BASE}?filter%5Bstatus%5D=active"));
        assert_eq!(
            pairs(&url),
            vec![("filter[status]".to_string(), "active".to_string())]
        );
    }

    #[test]
    fn test_existing_keys_are_kept_and_overwritten() {
        let options = Options {
            limit: Some(10),
            page: Some(3),
            filter: None,
        };
        let url = add_options(&format!("{BASE}?page=1&include=groups"), Some(&options)).unwrap();

        assert_eq!(
            pairs(&url),
            vec![
                ("include".to_string(), "groups".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let options = Options {
            limit: Some(5),
            page: Some(2),
            filter: Some(Filter::new("status", "unsubscribed")),
        };
        let url = add_options(&format!("{BASE}?zeta=1"), Some(&options)).unwrap();
        assert_eq!(
            url,
            format!("{BASE}?filter%5Bstatus%5D=unsubscribed&limit=5&page=2&zeta=1")
        );
    }

    #[test]
    fn test_round_trip_recovers_pairs() {
        let options = Options {
            limit: Some(100),
            page: Some(4),
            filter: Some(Filter::new("status", "bounced & junk")),
        };
        let url = add_options(BASE, Some(&options)).unwrap();

        assert_eq!(
            pairs(&url),
            vec![
                ("filter[status]".to_string(), "bounced & junk".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("page".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_base_is_an_error() {
        let options = Options::default();
        let err = add_options("connect.mailerlite.com/api", Some(&options)).unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test]
    fn test_push_helpers_skip_empty_values() {
        let pairs = QueryPairs::new()
            .push_opt("limit", None::<u32>)
            .push_non_empty("sort", "")
            .push_non_empty("include", "groups")
            .push("page", 1);

        assert_eq!(
            pairs.iter().collect::<Vec<_>>(),
            vec![("include", "groups"), ("page", "1")]
        );
    }
}
