use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What kind of policy text a property rule carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "rule_type", rename_all = "snake_case")]
pub enum RuleType {
    HouseRules,
    CancellationPolicy,
    CheckInPolicy,
}
