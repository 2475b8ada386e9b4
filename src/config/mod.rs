//! Configuration Management

pub mod settings;

pub use settings::{
    CorsSettings, DatabaseSettings, JwtSettings, PaginationSettings, ServerSettings, Settings,
    SnowflakeSettings,
};
