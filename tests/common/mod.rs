// Common test utilities for browser tests

use pagekit::{BrowserType, Page, SessionConfig, Timeouts, WebDriverSession};
use std::sync::Once;
use std::time::Duration;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pagekit=debug".into()),
            )
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Get the browser to use for testing from TEST_BROWSER env var
/// Defaults to firefox if not set
pub fn get_test_browser() -> BrowserType {
    match std::env::var("TEST_BROWSER") {
        Ok(browser) if browser == "chrome" => BrowserType::Chrome,
        _ => BrowserType::Firefox,
    }
}

/// Timeouts short enough to keep failing browser tests quick
pub fn test_timeouts() -> Timeouts {
    Timeouts {
        short: Duration::from_secs(2),
        long: Duration::from_secs(5),
        poll_interval: Duration::from_millis(100),
        pause: Duration::from_millis(50),
    }
}

/// Headless page on the browser named by TEST_BROWSER
pub async fn open_page() -> Page<WebDriverSession> {
    init_tracing();
    let config = SessionConfig {
        browser: get_test_browser(),
        ..SessionConfig::default()
    };
    let session = WebDriverSession::connect(&config)
        .await
        .expect("Failed to start WebDriver session");
    Page::with_timeouts(session, test_timeouts())
}
