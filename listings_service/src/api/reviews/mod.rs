pub mod create;
pub mod delete;
pub mod helpful;
pub mod list;
pub mod update;
