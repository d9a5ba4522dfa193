//! Property image operations. At most one image per property is the cover;
//! every mutation that touches the flag keeps that invariant.

pub mod delete;
pub mod get;
pub mod insert;
pub mod update;
