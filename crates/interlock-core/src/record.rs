//! Edge records and validated relationships.
//!
//! An [`EdgeRecord`] mirrors a row as the data store hands it over. Only
//! four columns matter (`id`, `entity1_id`, `entity2_id`, `category_id`);
//! anything else in the row is ignored on deserialization.

use crate::category::Category;
use crate::ids::{EntityId, RelationshipId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a record could not be turned into a [`Relationship`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown relationship category {0}")]
    UnknownCategory(u64),
}

/// A raw relationship row. Fields are optional so that incomplete rows can
/// be reported instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: Option<RelationshipId>,
    pub entity1_id: Option<EntityId>,
    pub entity2_id: Option<EntityId>,
    pub category_id: Option<u64>,
}

impl EdgeRecord {
    /// Creates a complete record.
    pub fn new(
        id: impl Into<RelationshipId>,
        entity1: impl Into<EntityId>,
        entity2: impl Into<EntityId>,
        category: Category,
    ) -> Self {
        Self {
            id: Some(id.into()),
            entity1_id: Some(entity1.into()),
            entity2_id: Some(entity2.into()),
            category_id: Some(u64::from(category.code())),
        }
    }

    /// Checks that every required field is present and the category is known.
    ///
    /// Fields are checked in column order, so the first missing one is
    /// reported.
    pub fn validate(&self) -> Result<Relationship, RecordError> {
        let id = self.id.ok_or(RecordError::MissingField("id"))?;
        let entity1 = self
            .entity1_id
            .ok_or(RecordError::MissingField("entity1_id"))?;
        let entity2 = self
            .entity2_id
            .ok_or(RecordError::MissingField("entity2_id"))?;
        let code = self
            .category_id
            .ok_or(RecordError::MissingField("category_id"))?;
        let category = u8::try_from(code)
            .ok()
            .and_then(Category::from_code)
            .ok_or(RecordError::UnknownCategory(code))?;

        Ok(Relationship {
            id,
            entity1,
            entity2,
            category,
        })
    }
}

impl From<Relationship> for EdgeRecord {
    fn from(rel: Relationship) -> Self {
        Self::new(rel.id, rel.entity1, rel.entity2, rel.category)
    }
}

/// A validated relationship between two entities.
///
/// Stored direction is `entity1 -> entity2`, but traversal treats the edge
/// as undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub entity1: EntityId,
    pub entity2: EntityId,
    pub category: Category,
}

impl Relationship {
    /// Both endpoints in stored order.
    pub fn endpoints(&self) -> [EntityId; 2] {
        [self.entity1, self.entity2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_complete_record() {
        let record = EdgeRecord::new(1u64, 10u64, 20u64, Category::Family);
        let rel = record.validate().unwrap();

        assert_eq!(rel.id, RelationshipId(1));
        assert_eq!(rel.endpoints(), [EntityId(10), EntityId(20)]);
        assert_eq!(rel.category, Category::Family);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let record = EdgeRecord {
            id: Some(RelationshipId(3)),
            entity1_id: Some(EntityId(1)),
            entity2_id: None,
            category_id: None,
        };
        assert_eq!(
            record.validate(),
            Err(RecordError::MissingField("entity2_id"))
        );

        assert_eq!(
            EdgeRecord::default().validate(),
            Err(RecordError::MissingField("id"))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut record = EdgeRecord::new(1u64, 2u64, 3u64, Category::Generic);
        record.category_id = Some(13);
        assert_eq!(record.validate(), Err(RecordError::UnknownCategory(13)));

        // Wider than any category code
        record.category_id = Some(300);
        assert_eq!(record.validate(), Err(RecordError::UnknownCategory(300)));
    }

    #[test]
    fn test_relationship_back_to_record() {
        let rel = EdgeRecord::new(7u64, 1u64, 2u64, Category::Lobbying)
            .validate()
            .unwrap();
        let record = EdgeRecord::from(rel);
        assert_eq!(record.category_id, Some(7));
        assert_eq!(record.validate(), Ok(rel));
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": 99,
            "entity1_id": 1,
            "entity2_id": 2,
            "category_id": 5,
            "amount": 2500,
            "description1": "Donor"
        }"#;
        let record: EdgeRecord = serde_json::from_str(json).unwrap();
        let rel = record.validate().unwrap();
        assert_eq!(rel.category, Category::Donation);
    }

    #[test]
    fn test_deserialize_missing_field_is_none() {
        let record: EdgeRecord =
            serde_json::from_str(r#"{"id": 4, "entity1_id": 1, "category_id": 1}"#).unwrap();
        assert_eq!(record.entity2_id, None);
        assert!(record.validate().is_err());
    }
}
