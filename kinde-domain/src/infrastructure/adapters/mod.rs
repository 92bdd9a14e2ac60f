pub mod env_config;
pub mod kinde_http;
pub mod kinde_rest;
pub mod kinde_token_manager;
pub mod logging;
pub mod pagination;

pub use env_config::*;
pub use kinde_http::*;
pub use kinde_rest::*;
pub use kinde_token_manager::*;
pub use logging::init_tracing;
