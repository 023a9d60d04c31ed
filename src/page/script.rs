use serde_json::Value;
use tracing::info;

use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, PageError, Result};
use crate::types::DocumentProperty;

const CLICK: &str = "arguments[0].click();";
const SET_VALUE: &str = "arguments[0].setAttribute('value', arguments[1]);";
const REMOVE_ATTRIBUTE: &str = "arguments[0].removeAttribute(arguments[1]);";
const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";
const SET_STYLE: &str = "arguments[0].setAttribute('style', arguments[1]);";
const IMAGE_LOADED: &str = "return arguments[0].complete \
    && typeof arguments[0].naturalWidth != 'undefined' \
    && arguments[0].naturalWidth > 0;";
const SCROLL_TO_TOP: &str = "window.scrollTo(0, 0);";
const SCROLL_TO_BOTTOM: &str = "window.scrollBy(0, document.body.scrollHeight);";
const LOCAL_STORAGE_ITEM: &str = "return window.localStorage.getItem(arguments[0]);";
const NAVIGATE: &str = "window.location = arguments[0];";
const OPEN_TAB: &str = "window.open();";

const HIGHLIGHT_STYLE: &str = "border: 2px dashed red;";

impl<D: Driver> Page<D> {
    /// Click through `HTMLElement.click()`, bypassing overlays and visibility checks
    pub async fn click_via_script(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self.run_on(locator, values, CLICK, None).await.map(drop);
        settle("click_via_script", result)
    }

    /// Set the `value` attribute directly, e.g. on a read-only date picker
    pub async fn set_value_via_script(&self, locator: &str, values: &[&str], value: &str) -> Checked<()> {
        let result = self
            .run_on(locator, values, SET_VALUE, Some(value))
            .await
            .map(drop);
        settle("set_value_via_script", result)
    }

    pub async fn remove_attribute(&self, locator: &str, values: &[&str], name: &str) -> Checked<()> {
        let result = self
            .run_on(locator, values, REMOVE_ATTRIBUTE, Some(name))
            .await
            .map(drop);
        settle("remove_attribute", result)
    }

    pub async fn scroll_into_view(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self
            .run_on(locator, values, SCROLL_INTO_VIEW, None)
            .await
            .map(drop);
        settle("scroll_into_view", result)
    }

    /// Outline the element for one pause, then restore its original style
    pub async fn highlight(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            let original = self
                .driver
                .attribute(&element, "style")
                .await?
                .unwrap_or_default();
            let arg = Self::element_arg(&element)?;

            self.driver
                .execute(SET_STYLE, vec![arg.clone(), Value::from(HIGHLIGHT_STYLE)])
                .await?;
            self.pause().await;
            self.driver
                .execute(SET_STYLE, vec![arg, Value::from(original)])
                .await?;
            Ok(())
        }
        .await;
        settle("highlight", result)
    }

    /// The image has finished loading and has a non-zero natural width
    pub async fn is_image_loaded(&self, locator: &str, values: &[&str]) -> Checked<bool> {
        let result = self
            .run_on(locator, values, IMAGE_LOADED, None)
            .await
            .map(|loaded| loaded.as_bool().unwrap_or(false));
        settle("is_image_loaded", result)
    }

    pub async fn scroll_to_top(&self) -> Checked<()> {
        let result = self.driver.execute(SCROLL_TO_TOP, Vec::new()).await.map(drop);
        settle("scroll_to_top", result)
    }

    pub async fn scroll_to_bottom(&self) -> Checked<()> {
        let result = self
            .driver
            .execute(SCROLL_TO_BOTTOM, Vec::new())
            .await
            .map(drop);
        settle("scroll_to_bottom", result)
    }

    pub async fn document_property(&self, property: DocumentProperty) -> Checked<Value> {
        settle(
            "document_property",
            self.driver.execute(property.script(), Vec::new()).await,
        )
    }

    /// Raw `localStorage` entry; `Null` when the key is missing
    pub async fn local_storage_item(&self, key: &str) -> Checked<Value> {
        settle(
            "local_storage_item",
            self.driver
                .execute(LOCAL_STORAGE_ITEM, vec![Value::from(key)])
                .await,
        )
    }

    /// Assign `window.location`, letting the page's own scripts see the navigation
    pub async fn navigate_via_script(&self, url: &str) -> Checked<()> {
        info!("Navigating via script to {}", url);
        let result = self
            .driver
            .execute(NAVIGATE, vec![Value::from(url)])
            .await
            .map(drop);
        settle("navigate_via_script", result)
    }

    /// Open a blank tab and switch to it, returning its handle
    pub async fn open_new_tab_via_script(&self) -> Checked<String> {
        let result: Result<String> = async {
            let before = self.driver.windows().await?;
            self.driver.execute(OPEN_TAB, Vec::new()).await?;
            let opened = self
                .driver
                .windows()
                .await?
                .into_iter()
                .find(|handle| !before.contains(handle))
                .ok_or_else(|| PageError::WindowNotFound("newly opened tab".to_string()))?;
            self.driver.switch_to_window(&opened).await?;
            Ok(opened)
        }
        .await;
        settle("open_new_tab_via_script", result)
    }

    /// Run a script written by the page object; `arguments` holds `args`
    pub async fn execute_script(&self, script: &str, args: Vec<Value>) -> Checked<Value> {
        settle("execute_script", self.driver.execute(script, args).await)
    }

    /// Run `script` with the first match as `arguments[0]` and `text` as `arguments[1]`
    async fn run_on(
        &self,
        locator: &str,
        values: &[&str],
        script: &str,
        text: Option<&str>,
    ) -> Result<Value> {
        let element = self.locate(locator, values).await?;
        let mut args = vec![Self::element_arg(&element)?];
        args.extend(text.map(Value::from));
        self.driver.execute(script, args).await
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;
