use std::time::Duration;
use tracing::{debug, info};

use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, PageError, Result};
use crate::locator;
use crate::types::{Dropdown, WaitCondition};

const ALL_OPTIONS: &str = ".//option";
const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";

fn option_xpath(text: &str) -> String {
    format!(
        ".//option[normalize-space(.) = {}]",
        locator::xpath_literal(text.trim())
    )
}

impl<D: Driver> Page<D> {
    /// Choose the option whose visible text is `text`
    pub async fn select_option(&self, dropdown: &Dropdown<'_>, text: &str) -> Checked<()> {
        settle("select_option", self.select(dropdown, text).await)
    }

    /// Choose each of `texts` in turn; stops at the first one that cannot be chosen.
    ///
    /// A custom list is opened once and stays open while its items are clicked.
    pub async fn select_options(&self, dropdown: &Dropdown<'_>, texts: &[&str]) -> Checked<()> {
        let result: Result<()> = async {
            match dropdown {
                Dropdown::Native { .. } => {
                    for text in texts {
                        self.select(dropdown, text).await?;
                    }
                }
                Dropdown::Custom { parent, items } => {
                    let options = self.open_custom(parent, items).await?;
                    for text in texts {
                        self.pick_custom(&options, items, text).await?;
                    }
                }
            }
            Ok(())
        }
        .await;
        settle("select_options", result)
    }

    /// Unselect the options whose visible text is `text` in a multi-select
    pub async fn deselect_option(&self, dropdown: &Dropdown<'_>, text: &str) -> Checked<()> {
        let result: Result<()> = async {
            let select = self.multi_select(dropdown).await?;
            for option in self.driver.find_all_within(&select, &option_xpath(text)).await? {
                if self.driver.is_selected(&option).await? {
                    self.driver.click(&option).await?;
                }
            }
            Ok(())
        }
        .await;
        settle("deselect_option", result)
    }

    /// Unselect every option of a multi-select
    pub async fn deselect_all(&self, dropdown: &Dropdown<'_>) -> Checked<()> {
        let result: Result<()> = async {
            let select = self.multi_select(dropdown).await?;
            for option in self.driver.find_all_within(&select, ALL_OPTIONS).await? {
                if self.driver.is_selected(&option).await? {
                    self.driver.click(&option).await?;
                }
            }
            Ok(())
        }
        .await;
        settle("deselect_all", result)
    }

    /// Trimmed text of the first selected option
    pub async fn first_selected_option(&self, dropdown: &Dropdown<'_>) -> Checked<String> {
        let result: Result<String> = async {
            let select = self.native_select(dropdown).await?;
            for option in self.driver.find_all_within(&select, ALL_OPTIONS).await? {
                if self.driver.is_selected(&option).await? {
                    return Ok(self.driver.text(&option).await?.trim().to_string());
                }
            }
            Err(PageError::ElementNotFound("selected option".to_string()))
        }
        .await;
        settle("first_selected_option", result)
    }

    pub async fn is_dropdown_multiple(&self, dropdown: &Dropdown<'_>) -> Checked<bool> {
        let result: Result<bool> = async {
            let select = self.native_select(dropdown).await?;
            self.is_multiple(&select).await
        }
        .await;
        settle("is_dropdown_multiple", result)
    }

    async fn select(&self, dropdown: &Dropdown<'_>, text: &str) -> Result<()> {
        match dropdown {
            Dropdown::Native { .. } => {
                let select = self.native_select(dropdown).await?;
                let options = self.driver.find_all_within(&select, &option_xpath(text)).await?;
                if options.is_empty() {
                    return Err(PageError::ElementNotFound(format!("option '{}'", text)));
                }

                let multiple = self.is_multiple(&select).await?;
                for option in &options {
                    if !self.driver.is_selected(option).await? {
                        self.driver.click(option).await?;
                    }
                    if !multiple {
                        break;
                    }
                }
                Ok(())
            }
            Dropdown::Custom { parent, items } => self.select_custom(parent, items, text).await,
        }
    }

    /// Open the list, wait for its items and click the one reading `text`
    async fn select_custom(&self, parent: &str, items: &str, text: &str) -> Result<()> {
        let options = self.open_custom(parent, items).await?;
        self.pick_custom(&options, items, text).await
    }

    /// Click the toggle once and wait until the list items render
    async fn open_custom(&self, parent: &str, items: &str) -> Result<Vec<D::Element>> {
        let toggle = self.locate(parent, &[]).await?;
        self.driver.click(&toggle).await?;

        let present = WaitCondition::AllElementsPresent(items.to_string());
        self.poll(&present.to_string(), self.timeouts.long, || async {
            self.driver
                .find_all(items)
                .await
                .map(|found| (!found.is_empty()).then_some(found))
        })
        .await
    }

    async fn pick_custom(&self, options: &[D::Element], items: &str, text: &str) -> Result<()> {
        for option in options {
            let option_text = self.driver.text(option).await?;
            debug!(option = %option_text.trim(), "custom dropdown item");
            if option_text.trim() != text {
                continue;
            }

            self.driver
                .execute(SCROLL_INTO_VIEW, vec![Self::element_arg(option)?])
                .await?;
            self.wait_clickable(option, text, self.timeouts.long).await?;
            self.pause().await;
            self.driver.click(option).await?;
            self.pause().await;
            info!(option = text, "selected custom dropdown item");
            return Ok(());
        }

        Err(PageError::ElementNotFound(format!("dropdown item '{}' in {}", text, items)))
    }

    async fn wait_clickable(&self, element: &D::Element, text: &str, timeout: Duration) -> Result<()> {
        self.poll(&format!("item '{}' clickable", text), timeout, || async {
            let clickable = self.driver.is_displayed(element).await?
                && self.driver.is_enabled(element).await?;
            Ok::<_, PageError>(clickable.then_some(()))
        })
        .await
    }

    async fn native_select(&self, dropdown: &Dropdown<'_>) -> Result<D::Element> {
        match dropdown {
            Dropdown::Native { locator, values } => self.locate(locator, values).await,
            Dropdown::Custom { parent, .. } => Err(PageError::UnsupportedOperation(format!(
                "{} is not a <select> element",
                parent
            ))),
        }
    }

    async fn multi_select(&self, dropdown: &Dropdown<'_>) -> Result<D::Element> {
        let select = self.native_select(dropdown).await?;
        if !self.is_multiple(&select).await? {
            return Err(PageError::UnsupportedOperation(
                "You may only deselect options of a multi-select".to_string(),
            ));
        }
        Ok(select)
    }

    async fn is_multiple(&self, select: &D::Element) -> Result<bool> {
        let multiple = self.driver.attribute(select, "multiple").await?;
        Ok(multiple.is_some_and(|value| value != "false"))
    }
}

#[cfg(test)]
#[path = "dropdown_test.rs"]
mod dropdown_test;
