//! # Collection Queries
//!
//! A [`Query`] describes a collection scan: an optional filter predicate, an optional single
//! sort key, a direction and an optional limit. The same value drives one-shot scans
//! ([`ResourceClient::query`](crate::ResourceClient::query)) and live subscriptions
//! ([`ResourceClient::subscribe`](crate::ResourceClient::subscribe)).
//!
//! Results are always ordered by document id first and then stable-sorted by the sort key,
//! so documents with equal keys keep insertion order.
//!
//! ```rust
//! use document_actor::Query;
//!
//! #[derive(Clone, Debug)]
//! struct Message { user: u32, at: u64 }
//!
//! let q = Query::<Message>::all()
//!     .filter(|m| m.user == 7)
//!     .order_by(|m| m.at)
//!     .descending();
//! assert!(q.matches(&Message { user: 7, at: 1 }));
//! assert!(!q.matches(&Message { user: 8, at: 1 }));
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A filtered, sorted view over a collection.
pub struct Query<T> {
    filter: Option<Predicate<T>>,
    order: Option<Comparator<T>>,
    descending: bool,
    limit: Option<usize>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            order: self.order.clone(),
            descending: self.descending,
            limit: self.limit,
        }
    }
}

impl<T: 'static> Default for Query<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filtered", &self.filter.is_some())
            .field("sorted", &self.order.is_some())
            .field("descending", &self.descending)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: 'static> Query<T> {
    /// Every document, in id order.
    pub fn all() -> Self {
        Self {
            filter: None,
            order: None,
            descending: false,
            limit: None,
        }
    }

    /// Keeps only documents matching `predicate`. Chained filters are combined with AND.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(prev) => Arc::new(move |item: &T| prev(item) && predicate(item)),
            None => Arc::new(predicate),
        });
        self
    }

    /// Sorts by a single key. Replaces any previous sort key.
    pub fn order_by<K: Ord>(mut self, key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.order = Some(Arc::new(move |a: &T, b: &T| key(a).cmp(&key(b))));
        self
    }

    /// Reverses the sort direction. Without a sort key this reverses id order.
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    /// Truncates the result after ordering.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| f(item))
    }

    /// Runs the query over `(id, document)` pairs.
    pub fn apply<'a, I, K>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = (&'a K, &'a T)>,
        K: Ord + 'a,
        T: Clone + 'a,
    {
        let mut hits: Vec<(&K, &T)> = items
            .into_iter()
            .filter(|(_, item)| self.matches(item))
            .collect();
        hits.sort_by(|a, b| a.0.cmp(b.0));
        if let Some(order) = &self.order {
            hits.sort_by(|a, b| order(a.1, b.1));
        }
        if self.descending {
            hits.reverse();
        }
        let limit = self.limit.unwrap_or(hits.len());
        hits.into_iter().take(limit).map(|(_, item)| item.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Debug, PartialEq)]
    struct Doc {
        owner: &'static str,
        at: u32,
    }

    fn store() -> HashMap<u32, Doc> {
        HashMap::from([
            (1, Doc { owner: "a", at: 30 }),
            (2, Doc { owner: "b", at: 10 }),
            (3, Doc { owner: "a", at: 10 }),
            (4, Doc { owner: "a", at: 20 }),
        ])
    }

    #[test]
    fn default_order_is_by_id() {
        let docs = store();
        let out = Query::all().apply(docs.iter());
        let ats: Vec<u32> = out.iter().map(|d| d.at).collect();
        assert_eq!(ats, vec![30, 10, 10, 20]);
    }

    #[test]
    fn filter_and_sort_ascending() {
        let docs = store();
        let out = Query::all()
            .filter(|d: &Doc| d.owner == "a")
            .order_by(|d| d.at)
            .apply(docs.iter());
        let ats: Vec<u32> = out.iter().map(|d| d.at).collect();
        assert_eq!(ats, vec![10, 20, 30]);
    }

    #[test]
    fn ties_keep_id_order() {
        let docs = store();
        let out = Query::all().order_by(|d: &Doc| d.at).apply(docs.iter());
        assert_eq!(out[0].owner, "b");
        assert_eq!(out[1].owner, "a");
    }

    #[test]
    fn descending_with_limit() {
        let docs = store();
        let out = Query::all()
            .order_by(|d: &Doc| d.at)
            .descending()
            .limit(2)
            .apply(docs.iter());
        let ats: Vec<u32> = out.iter().map(|d| d.at).collect();
        assert_eq!(ats, vec![30, 20]);
    }

    #[test]
    fn chained_filters_are_conjunctive() {
        let docs = store();
        let out = Query::all()
            .filter(|d: &Doc| d.owner == "a")
            .filter(|d: &Doc| d.at < 25)
            .apply(docs.iter());
        assert_eq!(out.len(), 2);
    }
}
