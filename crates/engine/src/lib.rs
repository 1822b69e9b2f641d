//! Fichas Engine library.
//!
//! All server-side code for the character sheet service.
//!
//! ## Structure
//!
//! - `use_cases/` - Character operations (load, check access, mutate, save)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::AppConfig;
