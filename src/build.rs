//! The in-progress build selection
//!
//! At most one part per category. Selection is a pure overwrite and never
//! fails for compatibility reasons: cross-category fit is surfaced while
//! browsing, the user may still force-select an incompatible part.

use std::collections::HashMap;

use crate::error::{SelectionError, SelectionResult};
use crate::model::{Category, Part};

/// The user's current build: category -> chosen part.
///
/// Created empty at session start, mutated only through [`select`] and
/// [`remove`], never persisted.
///
/// [`select`]: BuildSelection::select
/// [`remove`]: BuildSelection::remove
#[derive(Debug, Clone, Default)]
pub struct BuildSelection {
    parts: HashMap<Category, Part>,
}

impl BuildSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose `part` for `category`, replacing any existing choice.
    ///
    /// The only validation is category membership: a part tagged by the
    /// catalog with a different category is rejected. Untagged parts are
    /// trusted. Re-selecting the same part is a no-op in effect.
    pub fn select(&mut self, category: Category, part: Part) -> SelectionResult<()> {
        if let Some(actual) = part.category {
            if actual != category {
                return Err(SelectionError::CategoryMismatch {
                    part_id: part.id,
                    requested: category,
                    actual,
                });
            }
        }
        self.parts.insert(category, part);
        Ok(())
    }

    /// Clear the choice for `category`; no-op when nothing is selected.
    pub fn remove(&mut self, category: Category) {
        self.parts.remove(&category);
    }

    /// The selected part for `category`, if any
    pub fn get(&self, category: Category) -> Option<&Part> {
        self.parts.get(&category)
    }

    /// Read-only view of the current mapping.
    ///
    /// Callers cannot mutate through this; all changes go through
    /// [`select`](Self::select) / [`remove`](Self::remove).
    pub fn snapshot(&self) -> &HashMap<Category, Part> {
        &self.parts
    }

    /// Selected parts in sidebar category order
    pub fn selected(&self) -> impl Iterator<Item = (Category, &Part)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.parts.get(&category).map(|part| (category, part)))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: &str, category: Option<Category>) -> Part {
        Part {
            id: id.to_string(),
            brand: "ACME".to_string(),
            model: id.to_uppercase(),
            price_thb: 1000.0,
            image_url: None,
            attrs: Default::default(),
            category,
        }
    }

    #[test]
    fn test_select_overwrites_previous_choice() {
        let mut build = BuildSelection::new();
        build.select(Category::Cpu, part("a", Some(Category::Cpu))).unwrap();
        build.select(Category::Cpu, part("b", Some(Category::Cpu))).unwrap();

        assert_eq!(build.len(), 1);
        assert_eq!(build.get(Category::Cpu).unwrap().id, "b");
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut build = BuildSelection::new();
        build.select(Category::Psu, part("p", Some(Category::Psu))).unwrap();
        let first = build.clone();
        build.select(Category::Psu, part("p", Some(Category::Psu))).unwrap();

        assert_eq!(build.snapshot(), first.snapshot());
    }

    #[test]
    fn test_remove_without_selection_is_noop() {
        let mut build = BuildSelection::new();
        build.remove(Category::Ram);
        assert!(build.is_empty());

        build.select(Category::Ram, part("r", Some(Category::Ram))).unwrap();
        build.remove(Category::Ram);
        assert!(build.is_empty());
    }

    #[test]
    fn test_select_rejects_category_mismatch() {
        let mut build = BuildSelection::new();
        let err = build
            .select(Category::Cpu, part("g", Some(Category::GraphicCard)))
            .unwrap_err();
        assert!(matches!(err, SelectionError::CategoryMismatch { .. }));
        assert!(build.is_empty());

        // untagged parts are trusted
        build.select(Category::Cpu, part("u", None)).unwrap();
        assert_eq!(build.len(), 1);
    }

    #[test]
    fn test_selected_iterates_in_category_order() {
        let mut build = BuildSelection::new();
        build
            .select(Category::CpuCooler, part("c", Some(Category::CpuCooler)))
            .unwrap();
        build.select(Category::Cpu, part("a", Some(Category::Cpu))).unwrap();

        let order: Vec<Category> = build.selected().map(|(category, _)| category).collect();
        assert_eq!(order, vec![Category::Cpu, Category::CpuCooler]);
    }
}
