//! # pagekit
#![allow(clippy::uninlined_format_args)]
//!
//! Page-object helpers for browser UI tests driven over WebDriver.
//!
//! Page objects keep their XPath locators as templates and hand them to a
//! [`Page`] together with the values to fill in. The page looks the element up
//! right before acting, waits explicitly where asked and never panics or
//! returns `Err`: every operation yields a [`Checked`] carrying the result (or
//! a default) and an [`Outcome`].
//!
//! ## Locator templates
//!
//! ```text
//! //table[@id='%s']//tr[%s]/td     sequential values
//! //div[%2$s]//span[text()='%1$s'] positional values, 1-based
//! //span[contains(., '50%%')]      literal percent sign
//! ```
//!
//! ## Starting a session
//!
//! `geckodriver --port 4444` (or `chromedriver --port 9515`) must be running.
//! The session is configured from `PAGEKIT_BROWSER`, `PAGEKIT_WEBDRIVER_URL`,
//! `PAGEKIT_HEADLESS` and `PAGEKIT_VIEWPORT`; wait durations from
//! `PAGEKIT_SHORT_TIMEOUT_MS`, `PAGEKIT_LONG_TIMEOUT_MS`,
//! `PAGEKIT_POLL_INTERVAL_MS` and `PAGEKIT_PAUSE_MS`.
//!
//! ## Library Usage
//!
//! ```no_run
//! use pagekit::{Dropdown, Page, SessionConfig, SortDirection, Timeouts, WebDriverSession};
//!
//! const SEARCH_BOX: &str = "//input[@name='q']";
//! const RESULT_ROW: &str = "//table[@id='%s']//tr/td[%s]";
//! const CATEGORY: &str = "//select[@id='category']";
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = WebDriverSession::connect(&SessionConfig::from_env()?).await?;
//! let page = Page::with_timeouts(session, Timeouts::from_env()?);
//!
//! page.open_url("https://shop.example.com/search").await;
//! page.select_option(&Dropdown::native(CATEGORY), "Books").await;
//! page.set_text(SEARCH_BOX, &[], "rust").await;
//! page.wait_for_all_elements_visible(RESULT_ROW, &["results", "2"]).await;
//!
//! let sorted = page
//!     .is_number_sorted(RESULT_ROW, &["results", "3"], SortDirection::Ascending)
//!     .await;
//! assert!(sorted.is_ok() && *sorted.get());
//!
//! page.into_driver().close().await?;
//! # Ok(())
//! # }
//! ```

/// Wait durations and session settings
pub mod config;

/// Browser automation capability the page layer drives
pub mod driver;

/// Error and outcome types
pub mod errors;

/// XPath locator templates
pub mod locator;

/// Sort-order and keyword checks
pub mod ordering;

/// The page-object facade
pub mod page;

/// Shared value types
pub mod types;

/// fantoccini-backed WebDriver session
pub mod webdriver;

#[cfg(test)]
pub(crate) mod mock_driver;

pub use config::{SessionConfig, TimeoutClass, Timeouts};
pub use driver::Driver;
pub use errors::{Checked, Outcome, PageError};
pub use fantoccini::key::Key;
pub use page::Page;
pub use types::{
    DocumentProperty, Dropdown, Gesture, SortDirection, ViewportSize, WaitCondition,
};
pub use webdriver::{BrowserType, WebDriverSession};
