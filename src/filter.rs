//! Client-side filtering over a fetched category list
//!
//! Predicates compose with logical AND: exact-value dropdowns, token
//! membership for multi-valued attributes, a case-insensitive search box,
//! and the category's compatibility rule when the toggle is on. The input
//! list is never mutated; default output order is fetch order.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::build::BuildSelection;
use crate::model::{Category, Part};

/// Sort option for the displayed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog fetch order
    #[default]
    Default,
    /// Price low to high, stable among equal prices
    PriceAscending,
}

/// Active filter controls for one category view.
///
/// Reset to defaults whenever the category view is (re)opened; never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Field -> required exact value (a cleared dropdown has no entry)
    pub exact: BTreeMap<String, String>,
    /// Field -> required member of the part's token set
    pub contains: BTreeMap<String, String>,
    /// Free-text search term; empty matches everything
    pub search: String,
    pub sort: SortKey,
    /// Opt-in compatibility narrowing; only meaningful for categories
    /// carrying a compatibility rule
    pub compatibility_enabled: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear an exact-value filter ("All ..." clears)
    pub fn set_exact(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.exact.insert(field.to_string(), value);
            }
            None => {
                self.exact.remove(field);
            }
        }
    }

    /// Set or clear a token-membership filter
    pub fn set_contains(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.contains.insert(field.to_string(), value);
            }
            None => {
                self.contains.remove(field);
            }
        }
    }
}

/// Narrow `items` to the displayed subset for `category`.
///
/// `selection` feeds the compatibility rule; passing `None` (or leaving the
/// toggle off) skips compatibility entirely. Returns references in a new
/// vector, in fetch order by default, stable price-ascending when requested.
pub fn apply_filters<'a>(
    category: Category,
    items: &'a [Part],
    state: &FilterState,
    selection: Option<&BuildSelection>,
) -> Vec<&'a Part> {
    let spec = category.spec();

    let mut displayed: Vec<&Part> = items
        .iter()
        .filter(|part| {
            let exact_ok = state
                .exact
                .iter()
                .all(|(field, wanted)| part.field(field).as_deref() == Some(wanted.as_str()));

            let contains_ok = state
                .contains
                .iter()
                .all(|(field, wanted)| part.tokens(field).iter().any(|token| token == wanted));

            let search_ok = matches_search(spec.search_fields, part, &state.search);

            let compat_ok = match (state.compatibility_enabled, spec.compat, selection) {
                (true, Some(rule), Some(selection)) => rule.allows(selection, part),
                _ => true,
            };

            exact_ok && contains_ok && search_ok && compat_ok
        })
        .collect();

    if state.sort == SortKey::PriceAscending {
        // Vec::sort_by is stable, so equal prices keep fetch order
        displayed.sort_by(|a, b| a.price_thb.total_cmp(&b.price_thb));
    }

    displayed
}

fn matches_search(search_fields: &[&str], part: &Part, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    search_fields
        .iter()
        .filter_map(|field| part.field(field))
        .any(|value| value.to_lowercase().contains(&term))
}

/// Distinct values of a scalar field across `items`, first-seen order.
///
/// Feeds the "All Brands" style dropdowns. Options always reflect the
/// currently fetched list, so an empty list offers nothing beyond "All".
pub fn available_values(items: &[Part], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|part| part.field(field))
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Distinct tokens of a multi-valued field across `items`, first-seen order
pub fn available_tokens(items: &[Part], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|part| part.tokens(field))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
