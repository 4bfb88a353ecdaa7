//! Cross-category compatibility checks
//!
//! Every rule has the same shape: a pure predicate comparing a candidate
//! part's multi-valued attribute against one attribute of an already
//! selected part in another category. Compatibility is advisory: it
//! narrows the browsing list when enabled, it never blocks selection.

use crate::build::BuildSelection;
use crate::model::{Category, Part};

/// A cross-category constraint, evaluated while browsing the category that
/// carries it. Currently only registered for cpuCooler vs. the selected
/// CPU's socket; mainboard/CPU and case/mainboard constraints would be new
/// rows in the category table, not new code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatRule {
    /// Multi-valued attribute on the candidate part (e.g. `Socket_Support`)
    pub support_attr: &'static str,
    /// Category of the selected part the rule checks against
    pub against: Category,
    /// Single-valued attribute on that selected part (e.g. `Socket`)
    pub against_attr: &'static str,
}

impl CompatRule {
    /// Whether `candidate` is usable given the current selection.
    ///
    /// Passes unconditionally when nothing is selected in the `against`
    /// category, or the selected part lacks the attribute; there is
    /// nothing to constrain against.
    pub fn allows(&self, selection: &BuildSelection, candidate: &Part) -> bool {
        let Some(selected) = selection.get(self.against) else {
            return true;
        };
        let Some(wanted) = selected.field(self.against_attr) else {
            return true;
        };
        is_compatible(&candidate.tokens(self.support_attr), Some(&wanted))
    }
}

/// Socket-support compatibility predicate.
///
/// With no selected socket every candidate is compatible. Otherwise both
/// sides are lower-cased, support entries are split on commas and trimmed,
/// and a candidate matches if any sub-token and the selected socket contain
/// each other in either direction. Substring containment tolerates vendor
/// strings like `"AM5"` vs `"Socket AM5"` or `"LGA1700/1200"` vs
/// `"LGA1700"`. An empty support set never matches a selected socket.
pub fn is_compatible(socket_support: &[String], selected_socket: Option<&str>) -> bool {
    let Some(socket) = selected_socket else {
        return true;
    };
    let socket = socket.trim().to_lowercase();
    if socket.is_empty() {
        return true;
    }

    socket_support
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .any(|token| socket.contains(&token) || token.contains(&socket))
}
