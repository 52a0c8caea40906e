//! Coupling search filters.
//!
//! Search criteria are turned into a [`CouplingFilter`]: the requester as
//! owner plus one typed prefix predicate per supplied criterion. Adapters
//! translate predicates into their own query language and must treat the
//! prefix as a literal, never as a pattern.

use super::{Coupling, UserId};

/// Non-empty search prefix. Matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPrefix(String);

/// Lowercase `c` when its lowercase form is a single char.
///
/// Expanding mappings such as `İ` keep the original char, so a folded
/// string always has the same length as its source.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

impl SearchPrefix {
    /// Wrap `raw`; only the empty string yields `None`.
    ///
    /// Whitespace is significant: `"  "` matches names starting with two
    /// spaces and `" Sp"` only matches names that start with a space.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty()).then_some(Self(raw))
    }

    /// The prefix exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive prefix test used by in-process adapters.
    ///
    /// Both sides are folded one char at a time with simple lowercase
    /// mappings, mirroring the per-character comparison of PostgreSQL
    /// `ILIKE`. Locale-specific mappings applied by the database (for
    /// example Turkish dotted `İ`) may still differ.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let mut candidate = candidate.chars().map(fold_char);
        self.0
            .chars()
            .map(fold_char)
            .all(|expected| candidate.next() == Some(expected))
    }
}

/// Optional prefixes supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouplingSearchCriteria {
    /// Prefix of the child name.
    pub child_name: Option<SearchPrefix>,
    /// Prefix of the dad snapshot's name.
    pub dad_name: Option<SearchPrefix>,
    /// Prefix of the mom snapshot's name.
    pub mom_name: Option<SearchPrefix>,
}

impl CouplingSearchCriteria {
    /// Build criteria from raw strings, ignoring empty values.
    pub fn from_raw(
        child_name: Option<String>,
        dad_name: Option<String>,
        mom_name: Option<String>,
    ) -> Self {
        Self {
            child_name: child_name.and_then(SearchPrefix::parse),
            dad_name: dad_name.and_then(SearchPrefix::parse),
            mom_name: mom_name.and_then(SearchPrefix::parse),
        }
    }
}

/// Coupling attribute a predicate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingSearchField {
    /// `childName`; couplings without one never match.
    ChildName,
    /// Name held in the dad snapshot.
    DadName,
    /// Name held in the mom snapshot.
    MomName,
}

impl CouplingSearchField {
    fn value_of(self, coupling: &Coupling) -> Option<&str> {
        match self {
            Self::ChildName => coupling.child_name().map(|name| name.as_str()),
            Self::DadName => Some(coupling.dad().name()),
            Self::MomName => Some(coupling.mom().name()),
        }
    }
}

/// Case-insensitive "starts with" on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPredicate {
    /// Attribute the prefix applies to.
    pub field: CouplingSearchField,
    /// Literal prefix; wildcard characters carry no meaning.
    pub prefix: SearchPrefix,
}

/// Conjunction of owner equality and every prefix predicate.
///
/// # Examples
/// ```
/// use mount_manager::domain::{CouplingFilter, CouplingSearchCriteria, CouplingSearchField, UserId};
///
/// let criteria = CouplingSearchCriteria::from_raw(None, Some("Sp".into()), Some(String::new()));
/// let filter = CouplingFilter::new(UserId::random(), criteria);
///
/// assert_eq!(filter.predicates().len(), 1);
/// assert_eq!(filter.predicates()[0].field, CouplingSearchField::DadName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouplingFilter {
    owner: UserId,
    predicates: Vec<PrefixPredicate>,
}

impl CouplingFilter {
    /// Scope `criteria` to couplings owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, criteria: CouplingSearchCriteria) -> Self {
        let predicates = [
            (CouplingSearchField::ChildName, criteria.child_name),
            (CouplingSearchField::DadName, criteria.dad_name),
            (CouplingSearchField::MomName, criteria.mom_name),
        ]
        .into_iter()
        .filter_map(|(field, prefix)| prefix.map(|prefix| PrefixPredicate { field, prefix }))
        .collect();
        Self { owner, predicates }
    }

    /// Only couplings recorded by this user match.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Prefix predicates in child, dad, mom order.
    #[must_use]
    pub fn predicates(&self) -> &[PrefixPredicate] {
        &self.predicates
    }

    /// Evaluate the filter against an in-memory coupling.
    ///
    /// A coupling without a child name never matches a child-name predicate.
    pub fn matches(&self, coupling: &Coupling) -> bool {
        coupling.user_id() == &self.owner
            && self.predicates.iter().all(|predicate| {
                predicate
                    .field
                    .value_of(coupling)
                    .is_some_and(|value| predicate.prefix.matches(value))
            })
    }
}
