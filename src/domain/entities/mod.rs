//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! publishing platform. All entities map directly to their corresponding
//! database tables.
//!
//! - **User**: An account that authors posts (created externally)
//! - **Group**: A named topic that posts can be filed under
//! - **Post**: A unit of published content
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer
//! (PostgreSQL and in-memory variants), following the dependency inversion
//! principle.

mod group;
mod post;
mod user;

// Re-export User entity and related types
pub use user::{User, UserRepository};

// Re-export Group entity and related types
pub use group::{Group, GroupRepository};

// Re-export Post entity and related types
pub use post::{Post, PostRepository};
