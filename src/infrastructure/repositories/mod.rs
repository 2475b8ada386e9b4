//! Repository Implementations
//!
//! Concrete implementations of the repository traits defined in the domain
//! layer. Each repository handles data access for a specific entity type.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User account lookups
//! - **GroupRepository** - Topic groups with unique slugs
//! - **PostRepository** - Post CRUD with offset pagination
//!
//! PostgreSQL implementations (`Pg*`) back the running server; in-memory
//! implementations (`InMemory*`) back service-level tests.

pub mod group_repository;
pub mod memory;
pub mod post_repository;
pub mod user_repository;

// Re-export repository structs for convenience
pub use group_repository::PgGroupRepository;
pub use memory::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;
