//! Per-view in-memory collection with search, sort and identity patching.
//!
//! A roster keeps two sequences: the loaded set, in default order (active
//! records first, fetch order within each group), and the view the operator
//! is looking at, which is the loaded set narrowed by the current search and
//! ordered by the current sort.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::Serialize;

/// Value of a record field as seen by search and sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortValue<'a> {
    Text(Option<&'a str>),
    Date(Option<DateTime<Utc>>),
    Flag(bool),
}

impl SortValue<'_> {
    /// Text uses locale collation, with missing text compared as the empty
    /// string. Missing dates sort first, and for flags `true` comes before
    /// `false`. Values of different kinds are considered equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => compare_text(a.unwrap_or(""), b.unwrap_or("")),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Flag(a), Self::Flag(b)) => b.cmp(a),
            _ => Ordering::Equal,
        }
    }

    fn contains(&self, needle: &str) -> bool {
        match self {
            Self::Text(Some(text)) => text.to_lowercase().contains(needle),
            _ => false,
        }
    }
}

static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> =
    LazyLock::new(|| Collator::try_new(Default::default(), CollatorOptions::default()).ok());

// Locale collation, then raw text so the order stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    let collated = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    collated.then_with(|| a.cmp(b))
}

/// A record that can live in a [`Roster`].
pub trait RosterRecord: Clone {
    type Id: PartialEq + Clone + Debug;
    type Key: Copy + PartialEq + Debug;

    fn id(&self) -> &Self::Id;

    /// Drives the default ordering. Records without an active flag keep
    /// their fetch order.
    fn is_active(&self) -> bool {
        true
    }

    fn field(&self, key: Self::Key) -> SortValue<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct Roster<T: RosterRecord> {
    records: Vec<T>,
    view: Vec<T>,
    query: String,
    search_fields: Vec<T::Key>,
    sort: Option<SortState<T::Key>>,
}

impl<T: RosterRecord> Default for Roster<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            view: Vec::new(),
            query: String::new(),
            search_fields: Vec::new(),
            sort: None,
        }
    }
}

impl<T: RosterRecord> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster straight from a fetch result.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut roster = Self::new();
        roster.load(records);
        roster
    }

    /// Replace the working set. Search and sort state are reset.
    pub fn load(&mut self, records: Vec<T>) {
        self.records = records;
        default_order(&mut self.records);
        self.view = self.records.clone();
        self.query.clear();
        self.search_fields.clear();
        self.sort = None;
    }

    /// Case-insensitive substring search over `fields`. The query is matched
    /// as typed, surrounding spaces included; a blank query shows every
    /// record. The active sort, if any, is kept.
    pub fn search(&mut self, query: &str, fields: &[T::Key]) -> &[T] {
        self.query = query.to_lowercase();
        self.search_fields = fields.to_vec();

        self.view = self
            .records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            sort_records(&mut self.view, sort);
        }

        &self.view
    }

    /// Stable sort of the current view.
    pub fn sort_by(&mut self, key: T::Key, direction: SortDirection) -> &[T] {
        let sort = SortState { key, direction };
        self.sort = Some(sort);
        sort_records(&mut self.view, sort);
        &self.view
    }

    /// Sort by `key`, flipping the direction when `key` is already the sort
    /// key and starting ascending otherwise. Returns the direction applied.
    pub fn toggle_sort(&mut self, key: T::Key) -> SortDirection {
        let direction = match self.sort {
            Some(current) if current.key == key => current.direction.flip(),
            _ => SortDirection::Ascending,
        };
        self.sort_by(key, direction);
        direction
    }

    /// Replace the record with the same id by `updated`, in the loaded set and
    /// in the view, then restore the default ordering. Returns `false` and
    /// leaves the roster untouched when no record has that id.
    pub fn patch(&mut self, id: &T::Id, updated: T) -> bool {
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            return false;
        };
        *slot = updated.clone();

        if let Some(slot) = self.view.iter_mut().find(|r| r.id() == id) {
            *slot = updated;
        }

        default_order(&mut self.records);
        default_order(&mut self.view);
        self.sort = None;
        true
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records currently shown.
    pub fn view(&self) -> &[T] {
        &self.view
    }

    /// Every loaded record, in default order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn sort_state(&self) -> Option<SortState<T::Key>> {
        self.sort
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(&self, record: &T) -> bool {
        self.query.trim().is_empty()
            || self
                .search_fields
                .iter()
                .any(|key| record.field(*key).contains(&self.query))
    }
}

fn default_order<T: RosterRecord>(records: &mut [T]) {
    records.sort_by_key(|r| !r.is_active());
}

fn sort_records<T: RosterRecord>(records: &mut [T], sort: SortState<T::Key>) {
    records.sort_by(|a, b| {
        let ordering = a.field(sort.key).compare(&b.field(sort.key));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
