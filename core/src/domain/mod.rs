//! Core domain models - the remote content tree as the rest of the crate sees it
//!
//! Resources carry their own link table; locators and predicates are derived
//! from a resource without ever asking the repository.

pub mod addressing;
pub mod resource;

pub use addressing::{DelegateFolder, LinkRelation, Locator, LocatorParseError, ResourceUri};
pub use resource::{
	is_container, is_in_recycle_bin, is_reference, locator_for, Resource, ResourceFlags,
	ResourceKind,
};
