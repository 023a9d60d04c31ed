use fantoccini::key::Key;
use tracing::debug;

use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::{Checked, Result};
use crate::types::Gesture;

impl<D: Driver> Page<D> {
    pub async fn click(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            self.driver.click(&element).await
        }
        .await;
        settle("click", result)
    }

    /// Click the first match `times` times, e.g. the arrow of a number spinner
    pub async fn click_times(&self, locator: &str, values: &[&str], times: usize) -> Checked<()> {
        let result: Result<()> = async {
            for _ in 0..times {
                let element = self.locate(locator, values).await?;
                self.driver.click(&element).await?;
            }
            Ok(())
        }
        .await;
        settle("click_times", result)
    }

    /// Replace the field's content with `text`
    pub async fn set_text(&self, locator: &str, values: &[&str], text: &str) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            self.driver.clear(&element).await?;
            self.driver.send_keys(&element, text).await
        }
        .await;
        settle("set_text", result)
    }

    pub async fn clear(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            self.driver.clear(&element).await
        }
        .await;
        settle("clear", result)
    }

    /// Bring a checkbox or radio to `checked`, clicking only when it differs
    pub async fn set_checkbox(&self, locator: &str, values: &[&str], checked: bool) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            if self.driver.is_selected(&element).await? != checked {
                self.driver.click(&element).await?;
            } else {
                debug!(checked, "checkbox already in requested state");
            }
            Ok(())
        }
        .await;
        settle("set_checkbox", result)
    }

    pub async fn check(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.set_checkbox(locator, values, true).await
    }

    pub async fn uncheck(&self, locator: &str, values: &[&str]) -> Checked<()> {
        self.set_checkbox(locator, values, false).await
    }

    pub async fn hover(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self.gesture_on(locator, values, Gesture::Hover).await;
        settle("hover", result)
    }

    pub async fn double_click(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self.gesture_on(locator, values, Gesture::DoubleClick).await;
        settle("double_click", result)
    }

    pub async fn context_click(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self.gesture_on(locator, values, Gesture::ContextClick).await;
        settle("context_click", result)
    }

    /// Press the left button over the element without releasing it
    pub async fn click_and_hold(&self, locator: &str, values: &[&str]) -> Checked<()> {
        let result = self.gesture_on(locator, values, Gesture::ClickAndHold).await;
        settle("click_and_hold", result)
    }

    /// Drag the first match of `source` onto the first match of `target`
    pub async fn drag_and_drop(&self, source: &str, target: &str) -> Checked<()> {
        let result: Result<()> = async {
            let source = self.locate(source, &[]).await?;
            let target = self.locate(target, &[]).await?;
            self.driver
                .perform(Gesture::DragAndDrop { source, target })
                .await
        }
        .await;
        settle("drag_and_drop", result)
    }

    /// Type a single special key into the element, e.g. `Key::Enter`
    pub async fn send_key(&self, locator: &str, values: &[&str], key: Key) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            self.driver
                .send_keys(&element, &char::from(key).to_string())
                .await
        }
        .await;
        settle("send_key", result)
    }

    /// Type `text` while `modifier` is held, e.g. `Key::Control` with `"a"`
    pub async fn send_key_combo(
        &self,
        locator: &str,
        values: &[&str],
        modifier: Key,
        text: &str,
    ) -> Checked<()> {
        let result: Result<()> = async {
            let element = self.locate(locator, values).await?;
            // Null releases every held modifier
            let chord = format!("{}{}{}", char::from(modifier), text, char::from(Key::Null));
            self.driver.send_keys(&element, &chord).await
        }
        .await;
        settle("send_key_combo", result)
    }

    /// Press a key without releasing it, for modifier chords
    pub async fn key_down(&self, key: Key) -> Checked<()> {
        let result = self.driver.perform(Gesture::KeyDown(char::from(key))).await;
        settle("key_down", result)
    }

    pub async fn key_up(&self, key: Key) -> Checked<()> {
        let result = self.driver.perform(Gesture::KeyUp(char::from(key))).await;
        settle("key_up", result)
    }

    async fn gesture_on(
        &self,
        locator: &str,
        values: &[&str],
        gesture: fn(D::Element) -> Gesture<D::Element>,
    ) -> Result<()> {
        let element = self.locate(locator, values).await?;
        self.driver.perform(gesture(element)).await
    }
}
