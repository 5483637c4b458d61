//! Web Context
//!
//! App-wide settings the page layer needs on every request. The translator
//! middleware puts an `Arc<WebContext>` into the request extensions so
//! extractors can reach it without knowing the router state type.

use crate::flash::FlashStore;

#[derive(Debug, Clone)]
pub struct WebContext {
    /// Shown in the page title and navbar
    pub app_name: String,
    /// Hides internal error text from responses
    pub production: bool,
    pub flash: FlashStore,
}

impl Default for WebContext {
    fn default() -> Self {
        Self {
            app_name: "Application".to_string(),
            production: true,
            flash: FlashStore::default(),
        }
    }
}
