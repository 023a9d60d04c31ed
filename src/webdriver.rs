use anyhow::Context;
use async_trait::async_trait;
use fantoccini::actions::{
    InputSource, KeyAction, KeyActions, MOUSE_BUTTON_LEFT, MOUSE_BUTTON_RIGHT, MouseActions,
    PointerAction,
};
use fantoccini::elements::Element;
use fantoccini::wd::{TimeoutConfiguration, WindowHandle};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::driver::Driver;
use crate::errors::{PageError, Result};
use crate::types::Gesture;

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Where geckodriver/chromedriver listen by default
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }

    fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// W3C capabilities for a new session
    pub(crate) fn capabilities(
        &self,
        config: &SessionConfig,
    ) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if config.headless {
                    args.push("--headless".to_string());
                }
                if let Some(vp) = &config.viewport {
                    args.push(format!("--width={}", vp.width));
                    args.push(format!("--height={}", vp.height));
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if config.headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                if let Some(vp) = &config.viewport {
                    args.push(format!("--window-size={},{}", vp.width, vp.height));
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

/// WebDriver session backing a [`crate::Page`]
#[derive(Clone)]
pub struct WebDriverSession {
    client: Client,
    browser_type: BrowserType,
}

impl WebDriverSession {
    /// Start a new browser session.
    ///
    /// The session's implicit wait is set to zero: every lookup answers
    /// immediately and the page layer does its own explicit waiting.
    pub async fn connect(config: &SessionConfig) -> anyhow::Result<Self> {
        let browser_type = config.browser;
        let webdriver_url = config.webdriver_url();
        info!("Connecting to {:?} WebDriver at {}", browser_type, webdriver_url);

        if !Self::is_webdriver_running(&webdriver_url).await {
            let driver_name = browser_type.driver_name();
            anyhow::bail!(
                "Cannot connect to {} WebDriver at {}.\n\
                Please ensure {} is running:\n\
                  For Firefox: geckodriver --port 4444\n\
                  For Chrome: chromedriver --port 9515",
                driver_name,
                webdriver_url,
                driver_name
            );
        }

        let client = ClientBuilder::rustls()
            .capabilities(browser_type.capabilities(config))
            .connect(&webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        if let Some(vp) = &config.viewport {
            debug!("Setting viewport to {}x{}", vp.width, vp.height);
            if let Err(e) = client.set_window_size(vp.width, vp.height).await {
                debug!("Note: Could not set window size: {}", e);
            }
        }

        client
            .update_timeouts(TimeoutConfiguration::new(None, None, Some(Duration::ZERO)))
            .await
            .context("Failed to disable implicit wait")?;

        Ok(Self {
            client,
            browser_type,
        })
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url.trim_end_matches('/'));

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    /// Underlying fantoccini client for anything the page layer does not cover
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn close(self) -> anyhow::Result<()> {
        info!("Closing {:?} session", self.browser_type);
        self.client.close().await?;
        Ok(())
    }

    async fn perform_mouse(&self, actions: Vec<PointerAction>) -> Result<()> {
        let mut mouse = MouseActions::new("mouse".to_string());
        for action in actions {
            mouse = mouse.then(action);
        }
        self.client.perform_actions(mouse).await?;
        Ok(())
    }

    async fn perform_key(&self, action: KeyAction) -> Result<()> {
        let keys = KeyActions::new("keyboard".to_string()).then(action);
        self.client.perform_actions(keys).await?;
        Ok(())
    }
}

fn move_to(element: Element) -> PointerAction {
    PointerAction::MoveToElement {
        element,
        duration: None,
        x: 0,
        y: 0,
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        self.client.back().await?;
        Ok(())
    }

    async fn forward(&self) -> Result<()> {
        self.client.forward().await?;
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        self.client.refresh().await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.client.title().await?)
    }

    async fn source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn window(&self) -> Result<String> {
        Ok(String::from(self.client.window().await?))
    }

    async fn windows(&self) -> Result<Vec<String>> {
        let handles = self.client.windows().await?;
        Ok(handles.into_iter().map(String::from).collect())
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        let handle = WindowHandle::try_from(handle.to_string())
            .map_err(|_| PageError::WindowNotFound(handle.to_string()))?;
        self.client.switch_to_window(handle).await?;
        Ok(())
    }

    async fn close_window(&self) -> Result<()> {
        self.client.close_window().await?;
        Ok(())
    }

    async fn enter_frame(&self, frame: &Element) -> Result<()> {
        frame.clone().enter_frame().await?;
        Ok(())
    }

    async fn enter_default_content(&self) -> Result<()> {
        self.client.enter_frame(None).await?;
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Element>> {
        debug!("Finding elements with xpath: {}", xpath);
        Ok(self.client.find_all(Locator::XPath(xpath)).await?)
    }

    async fn find_all_within(&self, parent: &Element, xpath: &str) -> Result<Vec<Element>> {
        Ok(parent.find_all(Locator::XPath(xpath)).await?)
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn clear(&self, element: &Element) -> Result<()> {
        element.clear().await?;
        Ok(())
    }

    async fn send_keys(&self, element: &Element, text: &str) -> Result<()> {
        element.send_keys(text).await?;
        Ok(())
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        Ok(element.attr(name).await?)
    }

    async fn text(&self, element: &Element) -> Result<String> {
        Ok(element.text().await?)
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool> {
        Ok(element.is_displayed().await?)
    }

    async fn is_enabled(&self, element: &Element) -> Result<bool> {
        Ok(element.is_enabled().await?)
    }

    async fn is_selected(&self, element: &Element) -> Result<bool> {
        Ok(element.is_selected().await?)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        debug!("Executing script: {}", script);
        self.client
            .execute(script, args)
            .await
            .map_err(|e| PageError::ScriptExecution(e.to_string()))
    }

    async fn perform(&self, gesture: Gesture<Element>) -> Result<()> {
        match gesture {
            Gesture::Hover(element) => self.perform_mouse(vec![move_to(element)]).await,
            Gesture::DoubleClick(element) => {
                self.perform_mouse(vec![
                    move_to(element),
                    PointerAction::Down {
                        button: MOUSE_BUTTON_LEFT,
                    },
                    PointerAction::Up {
                        button: MOUSE_BUTTON_LEFT,
                    },
                    PointerAction::Down {
                        button: MOUSE_BUTTON_LEFT,
                    },
                    PointerAction::Up {
                        button: MOUSE_BUTTON_LEFT,
                    },
                ])
                .await
            }
            Gesture::ContextClick(element) => {
                self.perform_mouse(vec![
                    move_to(element),
                    PointerAction::Down {
                        button: MOUSE_BUTTON_RIGHT,
                    },
                    PointerAction::Up {
                        button: MOUSE_BUTTON_RIGHT,
                    },
                ])
                .await
            }
            Gesture::ClickAndHold(element) => {
                self.perform_mouse(vec![
                    move_to(element),
                    PointerAction::Down {
                        button: MOUSE_BUTTON_LEFT,
                    },
                ])
                .await
            }
            Gesture::DragAndDrop { source, target } => {
                self.perform_mouse(vec![
                    move_to(source),
                    PointerAction::Down {
                        button: MOUSE_BUTTON_LEFT,
                    },
                    move_to(target),
                    PointerAction::Up {
                        button: MOUSE_BUTTON_LEFT,
                    },
                ])
                .await
            }
            Gesture::KeyDown(value) => self.perform_key(KeyAction::Down { value }).await,
            Gesture::KeyUp(value) => self.perform_key(KeyAction::Up { value }).await,
        }
    }

    async fn accept_alert(&self) -> Result<()> {
        self.client.accept_alert().await?;
        Ok(())
    }

    async fn dismiss_alert(&self) -> Result<()> {
        self.client.dismiss_alert().await?;
        Ok(())
    }

    async fn alert_text(&self) -> Result<String> {
        Ok(self.client.get_alert_text().await?)
    }

    async fn send_alert_text(&self, text: &str) -> Result<()> {
        self.client.send_alert_text(text).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
