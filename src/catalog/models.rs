use serde::{Deserialize, Serialize};

/// A catalogued book. Every field except `id` is free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Store-assigned identifier, never changed after creation
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub edition: String,
    pub genre: String,
    pub publisher: String,
    #[serde(rename = "pub_date")]
    pub publish_date: String,
}

/// Request model for creating a new book. Any `id` the client sends is
/// ignored; the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub author: String,
    pub edition: String,
    pub genre: String,
    pub publisher: String,
    #[serde(rename = "pub_date")]
    pub publish_date: String,
}

impl NewBook {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            description: self.description,
            author: self.author,
            edition: self.edition,
            genre: self.genre,
            publisher: self.publisher,
            publish_date: self.publish_date,
        }
    }
}

/// Partial update for a book.
///
/// `None` leaves a field untouched, `Some("")` clears it. `id` is only
/// present so a request that tries to change it can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "pub_date", skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

impl BookPatch {
    /// True when the patch carries a non-empty identifier.
    pub fn changes_identifier(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// True when no updatable field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.edition.is_none()
            && self.genre.is_none()
            && self.publisher.is_none()
            && self.publish_date.is_none()
    }

    /// Merge present fields into `book`. The identifier is never touched.
    pub fn apply(self, book: &mut Book) {
        let fields = [
            (self.title, &mut book.title),
            (self.description, &mut book.description),
            (self.author, &mut book.author),
            (self.edition, &mut book.edition),
            (self.genre, &mut book.genre),
            (self.publisher, &mut book.publisher),
            (self.publish_date, &mut book.publish_date),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// A named grouping of books. The name is the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub name: String,
    pub description: String,
}

impl Collection {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Partial update for a collection; `name` exists only to be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CollectionPatch {
    pub fn changes_identifier(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
    }

    pub fn apply(self, collection: &mut Collection) {
        if let Some(description) = self.description {
            collection.description = description;
        }
    }
}

/// Decoded book query. Empty strings mean "no constraint"; `max <= 0`
/// means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    pub title: String,
    pub collection: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub edition: String,
    /// Inclusive lower bound on `pub_date`
    pub from: String,
    /// Inclusive upper bound on `pub_date`
    pub to: String,
    pub max: i64,
}

impl QueryFilter {
    /// Result cap, if any.
    pub fn limit(&self) -> Option<usize> {
        usize::try_from(self.max).ok().filter(|max| *max > 0)
    }

    /// Check every predicate that only needs the book itself. Collection
    /// membership is the store's concern.
    pub fn matches(&self, book: &Book) -> bool {
        let exact = [
            (&self.title, &book.title),
            (&self.author, &book.author),
            (&self.genre, &book.genre),
            (&self.publisher, &book.publisher),
            (&self.edition, &book.edition),
        ];
        if exact
            .iter()
            .any(|(wanted, actual)| !wanted.is_empty() && wanted != actual)
        {
            return false;
        }

        self.in_date_range(&book.publish_date)
    }

    fn in_date_range(&self, publish_date: &str) -> bool {
        if self.from.is_empty() && self.to.is_empty() {
            return true;
        }
        if publish_date.is_empty() {
            return false;
        }
        (self.from.is_empty() || publish_date >= self.from.as_str())
            && (self.to.is_empty() || publish_date <= self.to.as_str())
    }
}
