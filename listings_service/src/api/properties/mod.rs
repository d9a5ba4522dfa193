pub mod availability;
pub mod create;
pub mod delete;
pub mod featured;
pub mod get;
pub mod images;
pub mod list;
pub mod mine;
pub mod nearby;
pub mod search;
pub mod update;
