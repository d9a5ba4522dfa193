use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of building a listing lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "property_type", rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    GuestHouse,
    Hotel,
}

/// How much of the property a guest gets to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "place_type", rename_all = "snake_case")]
pub enum PlaceType {
    EntirePlace,
    PrivateRoom,
    SharedRoom,
}
