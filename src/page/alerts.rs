use super::{Page, settle};
use crate::driver::Driver;
use crate::errors::Checked;

impl<D: Driver> Page<D> {
    pub async fn accept_alert(&self) -> Checked<()> {
        settle("accept_alert", self.driver.accept_alert().await)
    }

    pub async fn dismiss_alert(&self) -> Checked<()> {
        settle("dismiss_alert", self.driver.dismiss_alert().await)
    }

    pub async fn alert_text(&self) -> Checked<String> {
        settle("alert_text", self.driver.alert_text().await)
    }

    /// Type into an open prompt
    pub async fn set_alert_text(&self, text: &str) -> Checked<()> {
        settle("set_alert_text", self.driver.send_alert_text(text).await)
    }
}
