use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;
use crate::types::Gesture;

/// Browser automation capability the page layer is built on.
///
/// Lookups return immediately with whatever matches at call time; waiting is
/// the page layer's job. Window handles are plain strings.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Reference to a live element; serializes to the WebDriver element
    /// reference so it can be passed as a script argument
    type Element: Clone + Send + Sync + Serialize;

    async fn goto(&self, url: &str) -> Result<()>;
    async fn back(&self) -> Result<()>;
    async fn forward(&self) -> Result<()>;
    async fn refresh(&self) -> Result<()>;
    async fn current_url(&self) -> Result<String>;
    async fn title(&self) -> Result<String>;
    async fn source(&self) -> Result<String>;

    async fn window(&self) -> Result<String>;
    async fn windows(&self) -> Result<Vec<String>>;
    async fn switch_to_window(&self, handle: &str) -> Result<()>;
    /// Close the current window; the caller must switch to another one afterwards
    async fn close_window(&self) -> Result<()>;
    async fn enter_frame(&self, frame: &Self::Element) -> Result<()>;
    async fn enter_default_content(&self) -> Result<()>;

    /// All elements matching `xpath` in the current browsing context, possibly none
    async fn find_all(&self, xpath: &str) -> Result<Vec<Self::Element>>;
    /// All descendants of `parent` matching the relative `xpath`
    async fn find_all_within(&self, parent: &Self::Element, xpath: &str)
    -> Result<Vec<Self::Element>>;

    async fn click(&self, element: &Self::Element) -> Result<()>;
    async fn clear(&self, element: &Self::Element) -> Result<()>;
    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;
    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;
    async fn text(&self, element: &Self::Element) -> Result<String>;
    async fn is_displayed(&self, element: &Self::Element) -> Result<bool>;
    async fn is_enabled(&self, element: &Self::Element) -> Result<bool>;
    async fn is_selected(&self, element: &Self::Element) -> Result<bool>;

    /// Run `script` as a function body with `args` bound to `arguments`
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value>;
    async fn perform(&self, gesture: Gesture<Self::Element>) -> Result<()>;

    async fn accept_alert(&self) -> Result<()>;
    async fn dismiss_alert(&self) -> Result<()>;
    async fn alert_text(&self) -> Result<String>;
    async fn send_alert_text(&self, text: &str) -> Result<()>;
}
