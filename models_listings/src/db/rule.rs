use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::RuleType;

/// A house rule or policy string attached to a property.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PropertyRule {
    pub id: Uuid,
    pub property_id: Uuid,
    pub rule_text: String,
    pub rule_type: RuleType,
}
