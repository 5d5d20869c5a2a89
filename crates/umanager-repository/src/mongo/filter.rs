//! Translation of [`LinkFilter`] predicates into MongoDB filter documents.

use mongodb::bson::{doc, Bson, Document};
use umanager_core::{LinkFilter, LinkPredicate};

/// Field names of a link document in the `links` collection.
pub mod fields {
    pub const URL: &str = "url";
    pub const USER_ID: &str = "userid";
    pub const TAGS: &str = "tags";
}

fn clause(predicate: &LinkPredicate) -> (&'static str, Bson) {
    match predicate {
        LinkPredicate::UserIdEquals(user_id) => (fields::USER_ID, Bson::String(user_id.clone())),
        LinkPredicate::UrlEquals(url) => (fields::URL, Bson::String(url.clone())),
        LinkPredicate::HasAllTags(tags) => {
            (fields::TAGS, Bson::Document(doc! { "$all": tags.clone() }))
        }
    }
}

/// Builds the filter document for a predicate conjunction.
///
/// Predicates on distinct fields are merged into one flat document; if two
/// predicates touch the same field the clauses are combined with `$and`
/// instead, so neither overwrites the other.
#[must_use]
pub fn to_document(filter: &LinkFilter) -> Document {
    let mut merged = Document::new();
    let mut clauses = Vec::with_capacity(filter.predicates().len());
    let mut collision = false;

    for predicate in filter.predicates() {
        let (field, value) = clause(predicate);
        collision |= merged.contains_key(field);
        merged.insert(field, value.clone());

        let mut single = Document::new();
        single.insert(field, value);
        clauses.push(single);
    }

    if collision {
        doc! { "$and": clauses }
    } else {
        merged
    }
}
