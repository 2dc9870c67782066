use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use household_ledger_db::models::household::household_member::HouseholdMemberModel;
use uuid::Uuid;

pub fn create_test_member(household_id: Uuid, user_id: Uuid, joined_at: DateTime<Utc>) -> HouseholdMemberModel {
    HouseholdMemberModel {
        id: Uuid::new_v4(),
        household_id,
        user_id,
        display_name: HeaplessString::try_from("Member").unwrap(),
        is_active: true,
        joined_at,
    }
}
