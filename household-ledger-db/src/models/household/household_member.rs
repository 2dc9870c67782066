use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// Membership of a user in a household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMemberModel {
    pub id: Uuid,
    pub household_id: Uuid,
    pub user_id: Uuid,
    pub display_name: HeaplessString<100>,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}

impl Identifiable for HouseholdMemberModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for HouseholdMemberModel {
    const COLLECTION: Collection = Collection::HouseholdMembers;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
