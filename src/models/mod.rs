//! Models module
//!
//! Defines the configuration data model produced by schema inference:
//! a [`Domain`] owns [`Schema`]s, a schema owns its [`Attribute`]s and
//! optional [`Metadata`].

pub mod attribute;
pub mod domain;
pub mod enums;
pub mod schema;

pub use attribute::Attribute;
pub use domain::Domain;
pub use enums::{AttributeType, Format};
pub use schema::{Metadata, Schema};
