//! Relationship categories.
//!
//! The data store tags every relationship with a small integer code. The
//! set is closed: codes outside `1..=12` are rejected rather than mapped to
//! a catch-all, since they point at a bad row upstream.

use serde::{Deserialize, Serialize};

/// The kind of relationship between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Category {
    /// A person holds a position in an organization.
    Position = 1,

    /// A person attended a school.
    Education = 2,

    /// An entity is a member of an organization.
    Membership = 3,

    Family = 4,

    /// Campaign or charitable donation.
    Donation = 5,

    /// Service or commercial transaction.
    Transaction = 6,

    Lobbying = 7,

    Social = 8,

    Professional = 9,

    /// An entity owns part of another.
    Ownership = 10,

    /// Parent/child organizations.
    Hierarchy = 11,

    Generic = 12,
}

impl Category {
    /// All categories in code order.
    pub const ALL: [Category; 12] = [
        Self::Position,
        Self::Education,
        Self::Membership,
        Self::Family,
        Self::Donation,
        Self::Transaction,
        Self::Lobbying,
        Self::Social,
        Self::Professional,
        Self::Ownership,
        Self::Hierarchy,
        Self::Generic,
    ];

    /// Looks up a category by its store code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code).checked_sub(1)?).copied()
    }

    /// The integer code used by the data store.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable label for rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Education => "Education",
            Self::Membership => "Membership",
            Self::Family => "Family",
            Self::Donation => "Donation/Grant",
            Self::Transaction => "Service/Transaction",
            Self::Lobbying => "Lobbying",
            Self::Social => "Social",
            Self::Professional => "Professional",
            Self::Ownership => "Ownership",
            Self::Hierarchy => "Hierarchy",
            Self::Generic => "Generic",
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown relationship category {}", code))
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
