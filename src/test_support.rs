//! Shared helpers for unit tests.

use crate::Panel;
use crate::core::state::App;

/// A fresh `App` with a fixed identity, opened on the Live panel.
pub fn test_app() -> App {
    App::new(Panel::Live, "user_test0000".to_string())
}
