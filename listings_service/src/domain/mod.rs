//! Domain rules that sit between the HTTP layer and the database: who may
//! touch what, and how listing slugs are derived.

pub mod access;
pub mod slug;
