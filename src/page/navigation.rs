use tracing::{debug, info};

use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, PageError, Result};

impl<D: Driver> Page<D> {
    pub async fn open_url(&self, url: &str) -> Checked<()> {
        let result: Result<()> = async {
            let parsed = url::Url::parse(url)
                .map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", url, e))?;
            self.driver.goto(parsed.as_str()).await
        }
        .await;
        settle("open_url", result)
    }

    pub async fn current_url(&self) -> Checked<String> {
        settle("current_url", self.driver.current_url().await)
    }

    pub async fn back(&self) -> Checked<()> {
        settle("back", self.driver.back().await)
    }

    pub async fn forward(&self) -> Checked<()> {
        settle("forward", self.driver.forward().await)
    }

    pub async fn refresh(&self) -> Checked<()> {
        settle("refresh", self.driver.refresh().await)
    }

    pub async fn title(&self) -> Checked<String> {
        settle("title", self.driver.title().await)
    }

    pub async fn page_source(&self) -> Checked<String> {
        settle("page_source", self.driver.source().await)
    }

    /// Handle of the current window
    pub async fn window_id(&self) -> Checked<String> {
        settle("window_id", self.driver.window().await)
    }

    pub async fn window_ids(&self) -> Checked<Vec<String>> {
        settle("window_ids", self.driver.windows().await)
    }

    /// Switch away from `parent` to another open window.
    ///
    /// With several candidates the last one in handle order wins.
    pub async fn switch_to_other_window(&self, parent: &str) -> Checked<()> {
        let result: Result<()> = async {
            let other = self
                .driver
                .windows()
                .await?
                .into_iter()
                .rev()
                .find(|handle| handle != parent)
                .ok_or_else(|| PageError::WindowNotFound(format!("any window other than {}", parent)))?;
            self.driver.switch_to_window(&other).await
        }
        .await;
        settle("switch_to_other_window", result)
    }

    /// Switch to the first window whose title is exactly `title`
    pub async fn switch_window_by_title(&self, title: &str) -> Checked<()> {
        let result: Result<()> = async {
            for handle in self.driver.windows().await? {
                self.driver.switch_to_window(&handle).await?;
                let current = self.driver.title().await?;
                debug!(handle = %handle, title = %current, "inspecting window");
                if current == title {
                    return Ok(());
                }
            }
            Err(PageError::WindowNotFound(format!("title '{}'", title)))
        }
        .await;
        settle("switch_window_by_title", result)
    }

    /// Close every window except `parent`, then switch back to it
    pub async fn close_other_windows(&self, parent: &str) -> Checked<()> {
        let result: Result<()> = async {
            for handle in self.driver.windows().await? {
                if handle == parent {
                    continue;
                }
                self.driver.switch_to_window(&handle).await?;
                self.pause().await;
                info!(handle = %handle, "closing window");
                self.driver.close_window().await?;
            }
            self.driver.switch_to_window(parent).await
        }
        .await;
        settle("close_other_windows", result)
    }

    pub async fn switch_to_frame(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result: Result<()> = async {
            let frame = self.locate(locator, values).await?;
            self.driver.enter_frame(&frame).await
        }
        .await;
        settle("switch_to_frame", result)
    }

    pub async fn switch_to_default_content(&self) -> Checked<()> {
        settle("switch_to_default_content", self.driver.enter_default_content().await)
    }
}
