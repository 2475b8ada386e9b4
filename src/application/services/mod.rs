//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **FeedService**: Paginated listings and post detail lookup
//! - **PostService**: Post publishing and author-only editing
//! - **GroupService**: Group creation with slug derivation and lookup

pub mod feed_service;
pub mod group_service;
pub mod post_service;

// Re-export feed service types
pub use feed_service::{AuthorDto, FeedError, FeedService, FeedServiceImpl, PageDto};

// Re-export post service types
pub use post_service::{
    CreatePostDto, EditOutcome, PostDto, PostError, PostService, PostServiceImpl,
};

// Re-export group service types
pub use group_service::{CreateGroupDto, GroupDto, GroupError, GroupService, GroupServiceImpl};
