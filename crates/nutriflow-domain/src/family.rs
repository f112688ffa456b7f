//! Family member profiles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique family member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Generate a new random member ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A household member the assistant plans meals for.
///
/// Dietary restrictions and allergies are free-form labels; the generation
/// layer interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl FamilyMember {
    /// Create a new member with no dietary constraints
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, age: u8) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            age,
            dietary_restrictions: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Add a dietary restriction
    #[inline]
    #[must_use]
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.push(restriction.into());
        self
    }

    /// Add an allergy
    #[inline]
    #[must_use]
    pub fn with_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergies.push(allergy.into());
        self
    }

    /// Whether the member has any dietary constraint at all
    #[inline]
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.dietary_restrictions.is_empty() || !self.allergies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_builder() {
        let member = FamilyMember::new("Ana", 34)
            .with_restriction("vegetarian")
            .with_allergy("peanuts");
        assert_eq!(member.name, "Ana");
        assert!(member.has_constraints());
    }

    #[test]
    fn member_without_constraints() {
        let member = FamilyMember::new("Leo", 8);
        assert!(!member.has_constraints());
    }

    #[test]
    fn member_serde_roundtrip() {
        let member = FamilyMember::new("Ana", 34).with_allergy("shellfish");
        let json = serde_json::to_string(&member).unwrap();
        let back: FamilyMember = serde_json::from_str(&json).unwrap();
        assert_eq!(member, back);
    }
}
