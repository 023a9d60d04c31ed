//! The page-object base: every operation page objects build on.
//!
//! Operations never return `Err`. A failure is logged and the operation yields
//! the default value for its type inside a [`Checked`], whose
//! [`outcome`](Checked::outcome) tells what went wrong.

mod alerts;
mod dropdown;
mod elements;
mod interaction;
mod navigation;
mod script;
mod verify;
mod wait;

use std::time::Duration;
use tracing::{debug, error};

use crate::config::Timeouts;
use crate::driver::Driver;
use crate::errors::{Checked, PageError, Result};
use crate::locator;

/// Locator-driven facade over a browser session
pub struct Page<D: Driver> {
    driver: D,
    timeouts: Timeouts,
}

impl<D: Driver> Page<D> {
    pub fn new(driver: D) -> Self {
        Self::with_timeouts(driver, Timeouts::default())
    }

    pub fn with_timeouts(driver: D, timeouts: Timeouts) -> Self {
        Self { driver, timeouts }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Sleep for the configured pause
    pub async fn pause(&self) {
        self.sleep(self.timeouts.pause).await;
    }

    pub async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Resolve a locator template and return every match
    pub(crate) async fn locate_all(&self, template: &str, values: &[&str]) -> Result<Vec<D::Element>> {
        let xpath = locator::resolve(template, values)?;
        self.driver.find_all(&xpath).await
    }

    /// Resolve a locator template and return the first match
    pub(crate) async fn locate(&self, template: &str, values: &[&str]) -> Result<D::Element> {
        let xpath = locator::resolve(template, values)?;
        self.locate_xpath(&xpath).await
    }

    pub(crate) async fn locate_xpath(&self, xpath: &str) -> Result<D::Element> {
        self.driver
            .find_all(xpath)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::ElementNotFound(xpath.to_string()))
    }

    pub(crate) fn element_arg(element: &D::Element) -> Result<serde_json::Value> {
        serde_json::to_value(element)
            .map_err(|e| PageError::ScriptExecution(format!("cannot pass element to script: {}", e)))
    }
}

/// Turn an operation result into a [`Checked`], logging the failure
pub(crate) fn settle<T: Default>(operation: &'static str, result: Result<T>) -> Checked<T> {
    match result {
        Ok(value) => {
            debug!(operation, "page operation succeeded");
            Checked::ok(value)
        }
        Err(e) => {
            error!(operation, outcome = %e.outcome(), error = %e, "page operation failed");
            Checked::failed(T::default(), &e)
        }
    }
}
