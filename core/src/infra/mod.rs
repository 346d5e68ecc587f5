//! Infrastructure layer - interfaces shared by every component

pub mod event;
pub mod host;
