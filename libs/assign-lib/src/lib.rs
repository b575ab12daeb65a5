pub mod api;
pub mod assignment_service;
pub mod diff;
pub mod directory;
pub mod entities;
pub mod errors_service;
pub mod relation;
pub mod selection;
pub mod session;
pub mod table;

pub use assignment_service::*;
pub use entities::*;
pub use errors_service::*;
pub use relation::{Relation, RelationError};
