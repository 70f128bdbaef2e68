//! Graph schema model for graphmirror
//!
//! Pure data and pure functions shared by the introspection and code
//! generation crates:
//! - [`model`]: the inferred shape of labels and relationship types
//! - [`naming`]: graph identifiers → Java class / field identifiers
//! - [`types`]: dynamic property type tags → static Java types
//!
//! Nothing in this crate performs I/O.

pub mod model;
pub mod naming;
pub mod types;

pub use model::{GraphLabel, GraphSchema, NodeSchema, RelationshipSchema, RelationshipTypeName};
pub use naming::{class_name_of, field_name_of};
pub use types::{map_type_tag, JavaType, PropertyType};
