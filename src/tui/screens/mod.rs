//! TUI screen implementations.

pub mod appearance;
pub mod dashboard;
pub mod editing;
pub mod help;
pub mod password;
pub mod profile;
pub mod welcome;

pub use appearance::{AppearanceState, draw_appearance};
pub use dashboard::{DashboardState, draw_dashboard};
pub use help::{HelpState, draw_help};
pub use password::{PasswordState, draw_password};
pub use profile::{ProfileState, draw_profile};
pub use welcome::{WelcomeState, draw_welcome};
