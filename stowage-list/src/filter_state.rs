//! Filter state with an externally controllable `show_deleted` field.

use stowage_core::ListFilters;

/// Current filters of a list screen.
///
/// The filter object is replaced wholesale by [`set_filters`](Self::set_filters).
/// A parent may pin `show_deleted` through
/// [`set_external_show_deleted`](Self::set_external_show_deleted); while pinned,
/// reads report the external value and the rest of the object stays settable.
/// No other field can be controlled this way.
#[derive(Debug, Clone)]
pub struct FilterState<F> {
    filters: F,
    external_show_deleted: Option<bool>,
}

impl<F: ListFilters> FilterState<F> {
    pub fn new(initial: F, external_show_deleted: Option<bool>) -> Self {
        Self {
            filters: initial,
            external_show_deleted,
        }
    }

    /// Effective filters, with the external override applied.
    pub fn filters(&self) -> F {
        match self.external_show_deleted {
            Some(value) => self.filters.with_show_deleted(value),
            None => self.filters.clone(),
        }
    }

    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
    }

    pub fn external_show_deleted(&self) -> Option<bool> {
        self.external_show_deleted
    }

    pub fn set_external_show_deleted(&mut self, value: Option<bool>) {
        self.external_show_deleted = value;
    }
}
