//! Per-user text storage used by the utility widgets.

pub mod local_text;
pub mod text;
