//! Command implementations.

pub mod config;
pub mod refine;
pub mod render;

pub use self::config::execute_config;
pub use self::refine::execute_refine;
pub use self::render::execute_render;
