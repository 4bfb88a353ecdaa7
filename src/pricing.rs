//! Price aggregation over a build selection
//!
//! Totals are a pure function of the current selection and are recomputed
//! from scratch on every call. Rounding and formatting (thousand
//! separators, currency symbol) are presentation concerns and do not happen
//! here.

use serde::{Deserialize, Serialize};

use crate::build::BuildSelection;

/// Marketplace discount: 20% off each part, capped per part.
const DISCOUNT_RATE: f64 = 0.20;
const DISCOUNT_CAP_THB: f64 = 2000.0;

/// Derived totals for a build, in THB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTotals {
    /// Sum of list prices over all selected parts
    pub list_total: f64,
    /// Sum of per-part prices after the capped marketplace discount
    pub discounted_total: f64,
}

/// Compute list and discounted totals for the current selection.
///
/// Categories with no selection contribute nothing; an all-empty selection
/// yields zero for both totals.
pub fn compute_totals(selection: &BuildSelection) -> BuildTotals {
    let mut list_total = 0.0;
    let mut discounted_total = 0.0;

    for (_, part) in selection.selected() {
        let price = part.price_thb;
        let discount = (price * DISCOUNT_RATE).min(DISCOUNT_CAP_THB);
        list_total += price;
        discounted_total += price - discount;
    }

    BuildTotals {
        list_total,
        discounted_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Part};

    fn priced_part(id: &str, category: Category, price_thb: f64) -> Part {
        Part {
            id: id.to_string(),
            brand: "ACME".to_string(),
            model: id.to_uppercase(),
            price_thb,
            image_url: None,
            attrs: Default::default(),
            category: Some(category),
        }
    }

    #[test]
    fn test_empty_build_totals_are_zero() {
        let totals = compute_totals(&BuildSelection::new());
        assert_eq!(totals.list_total, 0.0);
        assert_eq!(totals.discounted_total, 0.0);
    }

    #[test]
    fn test_capped_discount_per_part() {
        let mut build = BuildSelection::new();
        // 20% of 15900 exceeds the cap, 20% of 2500 does not
        build
            .select(Category::Cpu, priced_part("cpu", Category::Cpu, 15900.0))
            .unwrap();
        build
            .select(Category::Psu, priced_part("psu", Category::Psu, 2500.0))
            .unwrap();

        let totals = compute_totals(&build);
        assert_eq!(totals.list_total, 18400.0);
        assert_eq!(totals.discounted_total, 15900.0);
    }

    #[test]
    fn test_discount_below_cap() {
        let mut build = BuildSelection::new();
        build
            .select(Category::Ram, priced_part("ram", Category::Ram, 1000.0))
            .unwrap();

        let totals = compute_totals(&build);
        assert_eq!(totals.list_total, 1000.0);
        assert_eq!(totals.discounted_total, 800.0);
    }

    #[test]
    fn test_reselect_does_not_double_count() {
        let mut build = BuildSelection::new();
        build
            .select(Category::Ssd, priced_part("ssd", Category::Ssd, 3000.0))
            .unwrap();
        build
            .select(Category::Ssd, priced_part("ssd", Category::Ssd, 3000.0))
            .unwrap();

        assert_eq!(compute_totals(&build).list_total, 3000.0);
    }

    #[test]
    fn test_unpriced_part_contributes_zero() {
        let mut build = BuildSelection::new();
        build
            .select(Category::Case, priced_part("case", Category::Case, 0.0))
            .unwrap();

        let totals = compute_totals(&build);
        assert_eq!(totals.list_total, 0.0);
        assert_eq!(totals.discounted_total, 0.0);
    }
}
