//! Link query criteria and the predicate builder they compile into.
//!
//! [`LinkCriteria`] is the caller-facing descriptor: every field is
//! optional and an absent field means "no restriction". Stores never read
//! it field by field; they go through [`LinkFilter`], a conjunction of typed
//! [`LinkPredicate`]s that each backend translates into its own query
//! language (or evaluates directly, see [`LinkFilter::matches`]).

use crate::Link;
use serde::{Deserialize, Serialize};

/// Filter and pagination descriptor for link listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCriteria {
    /// Only links owned by this user.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Only links carrying all of these tags. Empty means any.
    #[serde(default)]
    pub tags: Vec<String>,
    /// At most this many links.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Skip this many matching links first.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl LinkCriteria {
    /// Criteria without any restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one owner.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restricts results to links carrying every given tag.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matches.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builds the predicate conjunction for these criteria.
    #[must_use]
    pub fn filter(&self) -> LinkFilter {
        LinkFilter::from(self)
    }

    /// Applies offset then limit to an already ordered sequence of matches.
    pub fn paginate<T>(&self, matches: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = self.offset.map_or(0, saturating_usize);
        let take = self.limit.map_or(usize::MAX, saturating_usize);
        matches.into_iter().skip(skip).take(take).collect()
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// One typed condition on a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPredicate {
    /// Owner equals the given user id.
    UserIdEquals(String),
    /// URL equals the given string exactly.
    UrlEquals(String),
    /// Tag set is a superset of the given tags.
    HasAllTags(Vec<String>),
}

impl LinkPredicate {
    /// Evaluates this predicate against a link.
    #[must_use]
    pub fn matches(&self, link: &Link) -> bool {
        match self {
            Self::UserIdEquals(user_id) => &link.user_id == user_id,
            Self::UrlEquals(url) => &link.url == url,
            Self::HasAllTags(tags) => link.has_all_tags(tags),
        }
    }
}

/// A conjunction (AND) of [`LinkPredicate`]s. The empty filter matches
/// every link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    predicates: Vec<LinkPredicate>,
}

impl LinkFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate.
    #[must_use]
    pub fn and(mut self, predicate: LinkPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Exact match on URL and owner.
    #[must_use]
    pub fn by_user_and_url(url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new()
            .and(LinkPredicate::UrlEquals(url.into()))
            .and(LinkPredicate::UserIdEquals(user_id.into()))
    }

    /// Returns the predicates in the order they were added.
    #[must_use]
    pub fn predicates(&self) -> &[LinkPredicate] {
        &self.predicates
    }

    /// Returns true if no predicate restricts the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluates every predicate against a link.
    #[must_use]
    pub fn matches(&self, link: &Link) -> bool {
        self.predicates.iter().all(|p| p.matches(link))
    }
}

impl From<&LinkCriteria> for LinkFilter {
    fn from(criteria: &LinkCriteria) -> Self {
        let mut filter = Self::new();
        if let Some(user_id) = &criteria.user_id {
            filter = filter.and(LinkPredicate::UserIdEquals(user_id.clone()));
        }
        if !criteria.tags.is_empty() {
            filter = filter.and(LinkPredicate::HasAllTags(criteria.tags.clone()));
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CreateLinkRequest;

    fn link(user_id: &str, url: &str, tags: &[&str]) -> Link {
        Link::new(CreateLinkRequest {
            url: url.to_string(),
            title: String::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            images: Vec::new(),
            user_id: user_id.to_string(),
        })
    }

    #[test]
    fn test_empty_criteria_builds_empty_filter() {
        let filter = LinkCriteria::new().filter();
        assert!(filter.is_empty());
        assert!(filter.matches(&link("u1", "https://a", &[])));
    }

    #[test]
    fn test_criteria_adds_only_present_predicates() {
        let filter = LinkCriteria::new().with_user_id("u1").filter();
        assert_eq!(filter.predicates(), &[LinkPredicate::UserIdEquals("u1".into())]);

        let filter = LinkCriteria::new().with_tags(["a"]).filter();
        assert_eq!(filter.predicates(), &[LinkPredicate::HasAllTags(vec!["a".into()])]);

        let filter = LinkCriteria::new().with_user_id("u1").with_tags(["a", "b"]).filter();
        assert_eq!(filter.predicates().len(), 2);
    }

    #[test]
    fn test_tag_containment() {
        let tagged = link("u1", "https://a", &["a", "b"]);
        assert!(LinkCriteria::new().with_tags(["a"]).filter().matches(&tagged));
        assert!(LinkCriteria::new().with_tags(["a", "b"]).filter().matches(&tagged));
        assert!(!LinkCriteria::new().with_tags(["c"]).filter().matches(&tagged));
        assert!(!LinkCriteria::new().with_tags(["a", "c"]).filter().matches(&tagged));
    }

    #[test]
    fn test_by_user_and_url_requires_both() {
        let filter = LinkFilter::by_user_and_url("https://a", "u1");
        assert!(filter.matches(&link("u1", "https://a", &[])));
        assert!(!filter.matches(&link("u2", "https://a", &[])));
        assert!(!filter.matches(&link("u1", "https://b", &[])));
    }

    #[test]
    fn test_paginate() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(LinkCriteria::new().paginate(items.clone()), items);
        assert_eq!(LinkCriteria::new().with_limit(2).paginate(items.clone()), vec![1, 2]);
        assert_eq!(LinkCriteria::new().with_offset(3).paginate(items.clone()), vec![4, 5]);
        assert_eq!(
            LinkCriteria::new().with_offset(1).with_limit(2).paginate(items.clone()),
            vec![2, 3]
        );
        assert!(LinkCriteria::new().with_limit(0).paginate(items.clone()).is_empty());
        assert!(LinkCriteria::new().with_offset(10).paginate(items).is_empty());
    }
}
