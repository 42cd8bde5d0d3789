//! Fixed criteria registry for the 15-point RGAA checklist.
//!
//! The registry is a load-time constant: 15 criteria with unique, contiguous
//! ordinals, each bound to exactly one of three categories. Category sizes
//! (4 + 7 + 4) are declared up front and never change over the life of an
//! audit session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Total number of criteria in the checklist. The scoring denominator is
/// derived from this constant, not from the registry length at runtime; the
/// two are kept equal by the type of [`CRITERIA`] and by
/// [`validate_registry`].
pub const TOTAL_CRITERIA: usize = 15;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// One of the three fixed criterion groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Navigation,
    Language,
    Structure,
}

impl CategoryId {
    pub fn all() -> &'static [CategoryId] {
        &[Self::Navigation, Self::Language, Self::Structure]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Language => "language",
            Self::Structure => "structure",
        }
    }

    /// Translation key for the category heading.
    pub const fn display_name_key(self) -> &'static str {
        match self {
            Self::Navigation => "category_navigation",
            Self::Language => "category_language",
            Self::Structure => "category_structure",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Navigation => "🧭",
            Self::Language => "🌐",
            Self::Structure => "📋",
        }
    }

    /// Number of criteria declared for this category. Fixed at load time.
    pub const fn declared_total(self) -> usize {
        match self {
            Self::Navigation => 4,
            Self::Language => 7,
            Self::Structure => 4,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// One fixed, numbered accessibility rule in the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Unique, contiguous position in `1..=15`.
    pub ordinal: u8,
    /// Stable translation key; the localized string is the display name.
    pub name_key: &'static str,
    pub category: CategoryId,
}

/// The full checklist in ordinal order. The array type pins the registry
/// size to [`TOTAL_CRITERIA`] at compile time.
pub static CRITERIA: [Criterion; TOTAL_CRITERIA] = [
    Criterion {
        ordinal: 1,
        name_key: "criterion_skip_links",
        category: CategoryId::Navigation,
    },
    Criterion {
        ordinal: 2,
        name_key: "criterion_keyboard_access",
        category: CategoryId::Navigation,
    },
    Criterion {
        ordinal: 3,
        name_key: "criterion_focus_visible",
        category: CategoryId::Navigation,
    },
    Criterion {
        ordinal: 4,
        name_key: "criterion_link_purpose",
        category: CategoryId::Navigation,
    },
    Criterion {
        ordinal: 5,
        name_key: "criterion_page_language",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 6,
        name_key: "criterion_language_changes",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 7,
        name_key: "criterion_page_title",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 8,
        name_key: "criterion_abbreviations",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 9,
        name_key: "criterion_clear_labels",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 10,
        name_key: "criterion_error_identification",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 11,
        name_key: "criterion_reading_order",
        category: CategoryId::Language,
    },
    Criterion {
        ordinal: 12,
        name_key: "criterion_headings_hierarchy",
        category: CategoryId::Structure,
    },
    Criterion {
        ordinal: 13,
        name_key: "criterion_landmarks",
        category: CategoryId::Structure,
    },
    Criterion {
        ordinal: 14,
        name_key: "criterion_form_fields",
        category: CategoryId::Structure,
    },
    Criterion {
        ordinal: 15,
        name_key: "criterion_data_tables",
        category: CategoryId::Structure,
    },
];

/// Look up a criterion by ordinal. Ordinals are contiguous from 1, so this
/// is an index access after validation.
pub fn criterion_by_ordinal(ordinal: u8) -> Option<&'static Criterion> {
    if ordinal == 0 {
        return None;
    }
    CRITERIA.get(usize::from(ordinal) - 1)
}

/// Criteria declared for one category, in ordinal order.
pub fn criteria_in(category: CategoryId) -> impl Iterator<Item = &'static Criterion> {
    CRITERIA.iter().filter(move |c| c.category == category)
}

// ---------------------------------------------------------------------------
// Registry validation
// ---------------------------------------------------------------------------

/// Registry construction violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    NonContiguousOrdinal { expected: u8, found: u8 },
    CategoryCountMismatch {
        category: CategoryId,
        declared: usize,
        actual: usize,
    },
    TotalMismatch { declared: usize, actual: usize },
}

impl RegistryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonContiguousOrdinal { .. } => "RG-REG-0001",
            Self::CategoryCountMismatch { .. } => "RG-REG-0002",
            Self::TotalMismatch { .. } => "RG-REG-0003",
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonContiguousOrdinal { expected, found } => write!(
                f,
                "{}: non-contiguous ordinal: expected {expected}, found {found}",
                self.code()
            ),
            Self::CategoryCountMismatch {
                category,
                declared,
                actual,
            } => write!(
                f,
                "{}: category {category} declares {declared} criteria but the registry holds {actual}",
                self.code()
            ),
            Self::TotalMismatch { declared, actual } => write!(
                f,
                "{}: category declarations sum to {actual}, expected {declared}",
                self.code()
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Check the registry invariants: contiguous ordinals from 1, per-category
/// counts matching the declared totals, and the grand total matching
/// [`TOTAL_CRITERIA`].
pub fn validate_registry() -> Result<(), RegistryError> {
    for (index, criterion) in CRITERIA.iter().enumerate() {
        let expected = index as u8 + 1;
        if criterion.ordinal != expected {
            return Err(RegistryError::NonContiguousOrdinal {
                expected,
                found: criterion.ordinal,
            });
        }
    }
    let mut declared_sum = 0;
    for &category in CategoryId::all() {
        let actual = criteria_in(category).count();
        if actual != category.declared_total() {
            return Err(RegistryError::CategoryCountMismatch {
                category,
                declared: category.declared_total(),
                actual,
            });
        }
        declared_sum += category.declared_total();
    }
    if declared_sum != TOTAL_CRITERIA {
        return Err(RegistryError::TotalMismatch {
            declared: TOTAL_CRITERIA,
            actual: declared_sum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_valid() {
        validate_registry().expect("registry invariants");
    }

    #[test]
    fn category_totals_sum_to_fifteen() {
        let sum: usize = CategoryId::all()
            .iter()
            .map(|c| c.declared_total())
            .sum();
        assert_eq!(sum, TOTAL_CRITERIA);
    }

    #[test]
    fn ordinal_lookup_round_trips() {
        for criterion in &CRITERIA {
            let found = criterion_by_ordinal(criterion.ordinal).expect("present");
            assert_eq!(found.name_key, criterion.name_key);
        }
        assert!(criterion_by_ordinal(0).is_none());
        assert!(criterion_by_ordinal(16).is_none());
    }

    #[test]
    fn every_criterion_belongs_to_its_category_slice() {
        for &category in CategoryId::all() {
            for criterion in criteria_in(category) {
                assert_eq!(criterion.category, category);
            }
        }
    }
}
