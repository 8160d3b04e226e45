pub mod ooxml;
pub mod relationships;

pub use ooxml::OoxmlPackage;
pub use relationships::{relationship_types, Relationship};
