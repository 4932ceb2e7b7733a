//! arsync Frontend
//!
//! Wires a tracking provider to the scene renderer: startup and error
//! display, the sync controller, background model loading and a scripted
//! provider for headless replays.

pub mod app;
pub mod config;
pub mod context;
pub mod controller;
pub mod loader;
pub mod session;

pub use app::{App, AppError, RunSummary};
pub use config::{AppConfig, ConfigError, ConfigManager};
pub use context::SyncContext;
pub use controller::{SyncController, SyncError};
pub use loader::{LoadError, ModelLoader};
pub use session::{ScriptStep, ScriptedTracker, SessionError, SessionScript};
