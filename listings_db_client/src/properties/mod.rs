//! Property operations: the listing aggregate and its relations.

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;
pub mod nearby;
pub mod update;
