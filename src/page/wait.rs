use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

use super::{Page, settle};
use crate::config::TimeoutClass;
use crate::driver::Driver;
use crate::errors::{Checked, PageError, Result};
use crate::locator;
use crate::types::WaitCondition;

impl<D: Driver> Page<D> {
    /// Poll `condition` until it holds or `timeout` elapses
    pub async fn wait_until(&self, condition: &WaitCondition, timeout: Duration) -> Checked<()> {
        debug!(locator = condition.locator(), ?timeout, "waiting");
        let result = self
            .poll(&condition.to_string(), timeout, || async {
                self.evaluate(condition)
                    .await
                    .map(|holds| holds.then_some(()))
            })
            .await;
        settle("wait_until", result)
    }

    /// Check `condition` once against the current page
    pub async fn evaluate(&self, condition: &WaitCondition) -> Result<bool> {
        match condition {
            WaitCondition::AllElementsVisible(xpath) => {
                let found = self.driver.find_all(xpath).await?;
                if found.is_empty() {
                    return Ok(false);
                }
                for element in &found {
                    if !self.driver.is_displayed(element).await? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            WaitCondition::ElementVisible(xpath) => match self.first(xpath).await? {
                Some(element) => self.driver.is_displayed(&element).await,
                None => Ok(false),
            },
            WaitCondition::ElementClickable(xpath) => match self.first(xpath).await? {
                Some(element) => Ok(self.driver.is_displayed(&element).await?
                    && self.driver.is_enabled(&element).await?),
                None => Ok(false),
            },
            WaitCondition::ElementInvisible(xpath) => match self.first(xpath).await? {
                Some(element) => Ok(!self.driver.is_displayed(&element).await?),
                None => Ok(true),
            },
            WaitCondition::ElementPresent(xpath) | WaitCondition::AllElementsPresent(xpath) => {
                Ok(!self.driver.find_all(xpath).await?.is_empty())
            }
            WaitCondition::AlertPresent => Ok(self.driver.alert_text().await.is_ok()),
        }
    }

    pub async fn wait_for_all_elements_visible(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::AllElementsVisible, locator, values, TimeoutClass::Long)
            .await
    }

    pub async fn wait_for_element_visible(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::ElementVisible, locator, values, TimeoutClass::Long)
            .await
    }

    pub async fn wait_for_element_clickable(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::ElementClickable, locator, values, TimeoutClass::Long)
            .await
    }

    /// Wait on the short timeout so an absent element is reported quickly
    pub async fn wait_for_element_invisible(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::ElementInvisible, locator, values, TimeoutClass::Short)
            .await
    }

    pub async fn wait_for_element_present(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::ElementPresent, locator, values, TimeoutClass::Long)
            .await
    }

    pub async fn wait_for_all_elements_present(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.wait_for(WaitCondition::AllElementsPresent, locator, values, TimeoutClass::Long)
            .await
    }

    pub async fn wait_for_alert_present(&self) -> Checked<()> {
        self.wait_until(&WaitCondition::AlertPresent, self.timeouts.long)
            .await
    }

    async fn wait_for(
        &self,
        condition: fn(String) -> WaitCondition,
        template: &str,
        values: &[&str],
        class: TimeoutClass,
    ) -> Checked<()> {
        match locator::resolve(template, values) {
            Ok(xpath) => {
                self.wait_until(&condition(xpath), self.timeouts.get(class))
                    .await
            }
            Err(e) => settle("wait_until", Err(e)),
        }
    }

    async fn first(&self, xpath: &str) -> Result<Option<D::Element>> {
        Ok(self.driver.find_all(xpath).await?.into_iter().next())
    }

    /// Run `check` until it yields a value, at least once.
    ///
    /// Errors from `check` count as "not yet"; a malformed locator fails at once.
    pub(crate) async fn poll<T, F, Fut>(
        &self,
        condition: &str,
        timeout: Duration,
        mut check: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match check().await {
                Ok(Some(value)) => {
                    debug!(condition, attempts, "wait satisfied");
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e @ PageError::LocatorFormat { .. }) => return Err(e),
                Err(e) => debug!(condition, error = %e, "wait check failed, retrying"),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(PageError::WaitTimeout {
                    condition: condition.to_string(),
                    timeout,
                });
            }
            self.sleep(self.timeouts.poll_interval.min(timeout - elapsed))
                .await;
        }
    }
}

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;
