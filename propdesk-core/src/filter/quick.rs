//! Quick filters: view-local, single-select narrowing with count badges.
//!
//! Counts and the narrowed set are produced by the same routine, so a badge
//! can never disagree with the rows selecting it would show.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::FilterError;

type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// One named secondary filter.
pub struct QuickFilter<T> {
    id: String,
    label: String,
    predicate: PredicateFn<T>,
}

impl<T> QuickFilter<T> {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, record: &T) -> bool {
        (self.predicate)(record)
    }
}

impl<T> Clone for QuickFilter<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for QuickFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickFilter")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Badge data for one quick filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickFilterCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

fn narrow<'a, T>(filter: &QuickFilter<T>, records: &[&'a T]) -> Vec<&'a T> {
    records
        .iter()
        .copied()
        .filter(|r| filter.matches(r))
        .collect()
}

/// A view's quick filters plus the active selection (`None` = "All").
pub struct QuickFilterSet<T> {
    filters: Vec<QuickFilter<T>>,
    active: Option<String>,
}

impl<T> QuickFilterSet<T> {
    pub fn new(filters: Vec<QuickFilter<T>>) -> Result<Self, FilterError> {
        for (i, f) in filters.iter().enumerate() {
            if filters[..i].iter().any(|prev| prev.id == f.id) {
                return Err(FilterError::DuplicateQuickFilter(f.id.clone()));
            }
        }
        Ok(Self {
            filters,
            active: None,
        })
    }

    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
            active: None,
        }
    }

    pub fn definitions(&self) -> &[QuickFilter<T>] {
        &self.filters
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn find(&self, id: &str) -> Option<&QuickFilter<T>> {
        self.filters.iter().find(|f| f.id == id)
    }

    /// Make `id` the only active quick filter; `None` returns to "All".
    /// An unknown id is rejected and leaves the selection unchanged.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), FilterError> {
        match id {
            None => self.active = None,
            Some(id) => {
                if self.find(id).is_none() {
                    return Err(FilterError::UnknownQuickFilter(id.to_string()));
                }
                self.active = Some(id.to_string());
            }
        }
        debug!(active = ?self.active, "quick filter selected");
        Ok(())
    }

    /// Pill click: the active pill goes back to "All", any other becomes active.
    pub fn toggle(&mut self, id: &str) -> Result<(), FilterError> {
        if self.active.as_deref() == Some(id) {
            self.select(None)
        } else {
            self.select(Some(id))
        }
    }

    /// All → first → ... → last → All.
    pub fn cycle(&mut self) {
        let next = match self.active.as_deref() {
            None => self.filters.first(),
            Some(current) => {
                let pos = self.filters.iter().position(|f| f.id == current);
                pos.and_then(|p| self.filters.get(p + 1))
            }
        };
        self.active = next.map(|f| f.id.clone());
        debug!(active = ?self.active, "quick filter cycled");
    }

    /// Count per definition over `records` (the globally filtered set).
    pub fn counts(&self, records: &[&T]) -> Vec<QuickFilterCount> {
        self.filters
            .iter()
            .map(|f| QuickFilterCount {
                id: f.id.clone(),
                label: f.label.clone(),
                count: narrow(f, records).len(),
            })
            .collect()
    }

    pub fn count(&self, id: &str, records: &[&T]) -> Option<usize> {
        self.find(id).map(|f| narrow(f, records).len())
    }

    /// Narrow by the active filter, or pass `records` through unchanged.
    pub fn apply<'a>(&self, records: &[&'a T]) -> Vec<&'a T> {
        match self.active.as_deref() {
            None => records.to_vec(),
            Some(id) => match self.find(id) {
                Some(f) => narrow(f, records),
                None => Vec::new(),
            },
        }
    }
}

impl<T> Clone for QuickFilterSet<T> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            active: self.active.clone(),
        }
    }
}

impl<T> fmt::Debug for QuickFilterSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickFilterSet")
            .field("filters", &self.filters)
            .field("active", &self.active)
            .finish()
    }
}
