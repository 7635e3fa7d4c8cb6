//! Static configuration of a list page.
//!
//! A [`ListPageConfig`] is assembled once per screen, validated when the page
//! is created and never changed afterwards.

use crate::debounce::DebounceOptions;
use crate::fetch::ListFetcher;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use stowage_core::{
    list_display_name, EntityKind, ListEntity, PluralLabels, SortDirection, ValidationError,
    DEFAULT_SORT_BY,
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
        }
    }

    pub const fn sortable(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
        }
    }
}

/// Remote list that supplies the options of a lookup filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupSource {
    Rooms,
    Buildings,
    EntityTypes(EntityKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Toggle,
    Select(Vec<SelectOption>),
    Lookup(LookupSource),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterDef {
    pub fn toggle(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Toggle,
        }
    }

    pub fn select(key: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Select(options),
        }
    }

    pub fn lookup(key: &'static str, label: &'static str, source: LookupSource) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Lookup(source),
        }
    }
}

/// Row actions offered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListActions {
    pub edit: bool,
    pub delete: bool,
    pub restore: bool,
    pub print_label: bool,
}

impl Default for ListActions {
    fn default() -> Self {
        Self {
            edit: true,
            delete: true,
            restore: true,
            print_label: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub default_by: &'static str,
    pub default_direction: SortDirection,
    pub allowed: Vec<&'static str>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            default_by: DEFAULT_SORT_BY,
            default_direction: SortDirection::Desc,
            allowed: vec![DEFAULT_SORT_BY, "name"],
        }
    }
}

pub type DisplayNameFn<E> = fn(&E) -> String;

/// Everything a list page needs to know about one entity kind.
#[derive(Clone)]
pub struct ListPageConfig<E: ListEntity> {
    pub columns: Vec<ColumnDef>,
    pub filters: Vec<FilterDef>,
    pub actions: ListActions,
    pub move_enabled: bool,
    pub labels: PluralLabels,
    pub initial_filters: E::Filters,
    pub sort: SortConfig,
    pub page_size: u32,
    pub search: DebounceOptions,
    pub display_name: DisplayNameFn<E>,
    fetcher: Arc<dyn ListFetcher<E>>,
}

impl<E: ListEntity> ListPageConfig<E> {
    /// Config with a name column, the kind's count labels and default filters.
    pub fn new(fetcher: Arc<dyn ListFetcher<E>>) -> Self {
        Self {
            columns: vec![ColumnDef::sortable("name", "Название")],
            filters: Vec::new(),
            actions: ListActions::default(),
            move_enabled: false,
            labels: E::KIND.plural_labels(),
            initial_filters: E::Filters::default(),
            sort: SortConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            search: DebounceOptions::default(),
            display_name: list_display_name::<E>,
            fetcher,
        }
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterDef>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_actions(mut self, actions: ListActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_move_enabled(mut self, enabled: bool) -> Self {
        self.move_enabled = enabled;
        self
    }

    pub fn with_labels(mut self, labels: PluralLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_initial_filters(mut self, filters: E::Filters) -> Self {
        self.initial_filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_search(mut self, search: DebounceOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_display_name(mut self, display_name: DisplayNameFn<E>) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn fetcher(&self) -> &Arc<dyn ListFetcher<E>> {
        &self.fetcher
    }

    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.columns.is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "columns".to_string(),
            });
        }
        ensure_unique("column", self.columns.iter().map(|c| c.key))?;
        ensure_unique("filter", self.filters.iter().map(|f| f.key))?;

        if self.page_size == 0 {
            return Err(ValidationError::InvalidValue {
                field: "page_size".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        if !self.labels.is_complete() {
            return Err(ValidationError::InvalidValue {
                field: "labels".to_string(),
                reason: "one, few and many must all be set".to_string(),
            });
        }
        if !self.sort.allowed.contains(&self.sort.default_by) {
            return Err(ValidationError::InvalidValue {
                field: "sort.default_by".to_string(),
                reason: format!("'{}' is not an allowed sort field", self.sort.default_by),
            });
        }
        if let Some(column) = self
            .columns
            .iter()
            .find(|c| c.sortable && !self.sort.allowed.contains(&c.key))
        {
            return Err(ValidationError::InvalidValue {
                field: "columns".to_string(),
                reason: format!("sortable column '{}' is not an allowed sort field", column.key),
            });
        }
        Ok(())
    }
}

fn ensure_unique<'a>(
    what: &str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ValidationError::DuplicateKey {
                what: what.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

impl<E: ListEntity> fmt::Debug for ListPageConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPageConfig")
            .field("kind", &E::KIND)
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .field("actions", &self.actions)
            .field("move_enabled", &self.move_enabled)
            .field("labels", &self.labels)
            .field("initial_filters", &self.initial_filters)
            .field("sort", &self.sort)
            .field("page_size", &self.page_size)
            .field("search", &self.search)
            .finish()
    }
}
