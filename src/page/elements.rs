use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, Result};

impl<D: Driver> Page<D> {
    /// First element matching the locator
    pub async fn element(&self, locator: &str, values: &[&str]) -> Checked<Option<D::Element>> {
        let result = self.locate(locator, values).await.map(Some);
        settle("element", result)
    }

    /// Every element matching the locator; empty when nothing matches
    pub async fn elements(&self, locator: &str, values: &[&str]) -> Checked<Vec<D::Element>> {
        settle("elements", self.locate_all(locator, values).await)
    }

    pub async fn count(&self, locator: &str, values: &[&str]) -> Checked<usize> {
        let result = self.locate_all(locator, values).await.map(|found| found.len());
        settle("count", result)
    }

    /// Trimmed visible text of the first match
    pub async fn text(&self, locator: &str, values: &[&str]) -> Checked<String> {
        let result: Result<String> = async {
            let element = self.locate(locator, values).await?;
            let text = self.driver.text(&element).await?;
            Ok(text.trim().to_string())
        }
        .await;
        settle("text", result)
    }

    /// Trimmed visible text of every match, in document order
    pub async fn texts(&self, locator: &str, values: &[&str]) -> Checked<Vec<String>> {
        settle("texts", self.read_texts(locator, values).await)
    }

    pub(crate) async fn read_texts(
        &self,
        locator: &str,
        values: &[&str],
    ) -> Result<Vec<String>> {
        let found = self.locate_all(locator, values).await?;
        let mut texts = Vec::with_capacity(found.len());
        for element in &found {
            texts.push(self.driver.text(element).await?.trim().to_string());
        }
        Ok(texts)
    }

    pub async fn attribute(
        &self,
        locator: &str,
        values: &[&str],
        name: &str,
    ) -> Checked<Option<String>> {
        let result: Result<Option<String>> = async {
            let element = self.locate(locator, values).await?;
            self.driver.attribute(&element, name).await
        }
        .await;
        settle("attribute", result)
    }

    pub async fn is_displayed(&self, locator: &str, values: &[&str]) -> Checked<bool> {
        let result: Result<bool> = async {
            let element = self.locate(locator, values).await?;
            self.driver.is_displayed(&element).await
        }
        .await;
        settle("is_displayed", result)
    }

    /// True when nothing matches or the first match is hidden.
    ///
    /// Answers immediately; use [`Page::wait_for_element_invisible`] to wait.
    pub async fn is_undisplayed(&self, locator: &str, values: &[&str]) -> Checked<bool> {
        let result: Result<bool> = async {
            match self.locate_all(locator, values).await?.first() {
                None => Ok(true),
                Some(element) => Ok(!self.driver.is_displayed(element).await?),
            }
        }
        .await;
        settle("is_undisplayed", result)
    }

    pub async fn is_enabled(&self, locator: &str, values: &[&str]) -> Checked<bool> {
        let result: Result<bool> = async {
            let element = self.locate(locator, values).await?;
            self.driver.is_enabled(&element).await
        }
        .await;
        settle("is_enabled", result)
    }

    pub async fn is_selected(&self, locator: &str, values: &[&str]) -> Checked<bool> {
        let result: Result<bool> = async {
            let element = self.locate(locator, values).await?;
            self.driver.is_selected(&element).await
        }
        .await;
        settle("is_selected", result)
    }
}
