//! Header normalization rules for the "Controle Equipe" sheet.
//!
//! The source workbook is hand-maintained, so column headers carry
//! trailing-space typos and auto-generated `Unnamed: N` placeholders from
//! a synthetic index column. Everything that survives normalization and is
//! not a helper column names a staff member.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The column holding the textual day-first scheduling date.
pub const DATE_COLUMN: &str = "DATA DE AGENDAMENTO";

/// Auxiliary columns that are dropped after cleaning.
pub const HELPER_COLUMNS: &[&str] = &["SEMANA", "TOTAL"];

/// Known header variants → canonical staff name.
///
/// The trailing-space entries are applied after trimming, so they mostly
/// document the typos seen in the wild; the load-bearing entry is the
/// `BRUNA S` abbreviation collision.
const RENAMES: &[(&str, &str)] = &[
    ("KELLYN ", "KELLYN"),
    ("JOYCE ", "JOYCE"),
    ("BRUNA S", "BRUNA_S"),
    ("TOTAL", "TOTAL"),
];

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^Unnamed").expect("placeholder pattern is valid"))
}

/// `true` for auto-generated placeholder headers (`Unnamed: 0` …) and for
/// headers that are empty after trimming.
pub fn is_placeholder(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty() || placeholder_pattern().is_match(trimmed)
}

/// Normalize a raw header into its canonical form: trim whitespace, then
/// apply the fixed rename table.
pub fn canonical_name(header: &str) -> String {
    let trimmed = header.trim();
    for (variant, canonical) in RENAMES {
        if trimmed == variant.trim() {
            return (*canonical).to_string();
        }
    }
    trimmed.to_string()
}

/// `true` when a canonical name is one of the helper columns to discard.
pub fn is_helper(canonical: &str) -> bool {
    HELPER_COLUMNS.contains(&canonical)
}

// ── StaffRoster ───────────────────────────────────────────────────────────────

/// Ordered set of canonical staff names, fixed for the lifetime of one
/// load. Column identity (not position) identifies a staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRoster {
    names: Vec<String>,
}

impl StaffRoster {
    /// Build a roster, keeping the first occurrence of each name.
    pub fn new(names: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── is_placeholder ────────────────────────────────────────────────────

    #[test]
    fn test_placeholder_unnamed() {
        assert!(is_placeholder("Unnamed: 0"));
        assert!(is_placeholder("Unnamed: 13"));
        assert!(is_placeholder("  Unnamed: 2  "));
    }

    #[test]
    fn test_placeholder_empty_header() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
    }

    #[test]
    fn test_placeholder_regular_names() {
        assert!(!is_placeholder("KELLYN"));
        assert!(!is_placeholder("DATA DE AGENDAMENTO"));
    }

    // ── canonical_name ────────────────────────────────────────────────────

    #[test]
    fn test_canonical_trims_whitespace() {
        assert_eq!(canonical_name("KELLYN "), "KELLYN");
        assert_eq!(canonical_name(" JOYCE "), "JOYCE");
    }

    #[test]
    fn test_canonical_abbreviation_collision() {
        assert_eq!(canonical_name("BRUNA S"), "BRUNA_S");
        // The unabbreviated name passes through untouched.
        assert_eq!(canonical_name("BRUNA"), "BRUNA");
    }

    #[test]
    fn test_canonical_unknown_passthrough() {
        assert_eq!(canonical_name("MARIANA"), "MARIANA");
    }

    // ── is_helper ─────────────────────────────────────────────────────────

    #[test]
    fn test_helper_columns() {
        assert!(is_helper("SEMANA"));
        assert!(is_helper("TOTAL"));
        assert!(!is_helper("KELLYN"));
    }

    // ── StaffRoster ───────────────────────────────────────────────────────

    #[test]
    fn test_roster_dedup_preserves_order() {
        let roster = StaffRoster::new(vec![
            "KELLYN".to_string(),
            "JOYCE".to_string(),
            "KELLYN".to_string(),
        ]);
        assert_eq!(roster.names(), &["KELLYN".to_string(), "JOYCE".to_string()]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_roster_contains() {
        let roster = StaffRoster::new(vec!["ANA".to_string()]);
        assert!(roster.contains("ANA"));
        assert!(!roster.contains("BRUNA"));
        assert!(!roster.is_empty());
    }
}
