//! In-memory [`Driver`] for unit tests.
//!
//! Elements are registered under the exact XPath strings the page layer will
//! query, so tests stay independent of a real XPath engine.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::driver::Driver;
use crate::errors::{PageError, Result};
use crate::types::Gesture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MockElement(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Plain,
    Checkbox,
    Option,
}

#[derive(Debug, Clone)]
pub struct MockNode {
    pub kind: NodeKind,
    pub text: String,
    pub value: String,
    pub attributes: HashMap<String, String>,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    pub parent: Option<usize>,
}

impl MockNode {
    pub fn new(text: &str) -> Self {
        Self {
            kind: NodeKind::Plain,
            text: text.to_string(),
            value: String::new(),
            attributes: HashMap::new(),
            displayed: true,
            enabled: true,
            selected: false,
            parent: None,
        }
    }

    pub fn checkbox() -> Self {
        Self {
            kind: NodeKind::Checkbox,
            ..Self::new("")
        }
    }

    pub fn option(text: &str) -> Self {
        Self {
            kind: NodeKind::Option,
            ..Self::new(text)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct MockState {
    nodes: Vec<MockNode>,
    queries: HashMap<String, Vec<usize>>,
    child_queries: HashMap<(usize, String), Vec<usize>>,
    appear_after: HashMap<String, usize>,
    vanish_after: HashMap<String, usize>,
    calls: Vec<String>,
    scripts: Vec<(String, Vec<Value>)>,
    script_results: HashMap<String, Value>,
    failing_scripts: HashSet<String>,
    gestures: Vec<Gesture<MockElement>>,
    history: Vec<String>,
    history_index: usize,
    page_title: String,
    page_source: String,
    windows: Vec<(String, String)>,
    current_window: Option<usize>,
    opened_windows: usize,
    alert: Option<String>,
    alert_input: Option<String>,
}

#[derive(Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` as a match of `xpath`, after any existing matches
    pub fn add(&self, xpath: &str, node: MockNode) -> MockElement {
        let mut state = self.state.lock().unwrap();
        let id = state.nodes.len();
        state.nodes.push(node);
        state.queries.entry(xpath.to_string()).or_default().push(id);
        MockElement(id)
    }

    /// Register `node` as a match of `xpath` relative to `parent`
    pub fn add_child(&self, parent: MockElement, xpath: &str, mut node: MockNode) -> MockElement {
        let mut state = self.state.lock().unwrap();
        let id = state.nodes.len();
        node.parent = Some(parent.0);
        state.nodes.push(node);
        state
            .child_queries
            .entry((parent.0, xpath.to_string()))
            .or_default()
            .push(id);
        MockElement(id)
    }

    /// Make `existing` also match `xpath`
    pub fn alias(&self, xpath: &str, existing: MockElement) {
        let mut state = self.state.lock().unwrap();
        state
            .queries
            .entry(xpath.to_string())
            .or_default()
            .push(existing.0);
    }

    /// Make `existing` also match `xpath` relative to `parent`
    pub fn alias_child(&self, parent: MockElement, xpath: &str, existing: MockElement) {
        let mut state = self.state.lock().unwrap();
        state
            .child_queries
            .entry((parent.0, xpath.to_string()))
            .or_default()
            .push(existing.0);
    }

    /// Lookups of `xpath` come back empty for the next `lookups` calls
    pub fn appear_after(&self, xpath: &str, lookups: usize) {
        let mut state = self.state.lock().unwrap();
        state.appear_after.insert(xpath.to_string(), lookups);
    }

    /// Lookups of `xpath` come back empty once `lookups` calls have been made
    pub fn vanish_after(&self, xpath: &str, lookups: usize) {
        let mut state = self.state.lock().unwrap();
        state.vanish_after.insert(xpath.to_string(), lookups);
    }

    pub fn update(&self, element: MockElement, change: impl FnOnce(&mut MockNode)) {
        let mut state = self.state.lock().unwrap();
        change(&mut state.nodes[element.0]);
    }

    pub fn node(&self, element: MockElement) -> MockNode {
        self.state.lock().unwrap().nodes[element.0].clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clicks(&self, element: MockElement) -> usize {
        let expected = format!("click {}", element.0);
        self.calls().iter().filter(|call| **call == expected).count()
    }

    pub fn lookups(&self, xpath: &str) -> usize {
        let expected = format!("find {}", xpath);
        self.calls().iter().filter(|call| **call == expected).count()
    }

    pub fn scripts(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().unwrap().scripts.clone()
    }

    pub fn gestures(&self) -> Vec<Gesture<MockElement>> {
        self.state.lock().unwrap().gestures.clone()
    }

    pub fn set_script_result(&self, script: &str, result: Value) {
        let mut state = self.state.lock().unwrap();
        state.script_results.insert(script.to_string(), result);
    }

    pub fn fail_script(&self, script: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_scripts.insert(script.to_string());
    }

    pub fn set_page(&self, url: &str, title: &str, source: &str) {
        let mut state = self.state.lock().unwrap();
        state.history = vec![url.to_string()];
        state.history_index = 0;
        state.page_title = title.to_string();
        state.page_source = source.to_string();
    }

    pub fn add_window(&self, handle: &str, title: &str) {
        let mut state = self.state.lock().unwrap();
        state.windows.push((handle.to_string(), title.to_string()));
        if state.current_window.is_none() {
            state.current_window = Some(state.windows.len() - 1);
        }
    }

    pub fn window_handles(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.windows.iter().map(|(handle, _)| handle.clone()).collect()
    }

    pub fn set_alert(&self, text: &str) {
        self.state.lock().unwrap().alert = Some(text.to_string());
    }

    pub fn alert(&self) -> Option<String> {
        self.state.lock().unwrap().alert.clone()
    }

    pub fn alert_input(&self) -> Option<String> {
        self.state.lock().unwrap().alert_input.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl MockState {
    fn click(&mut self, id: usize) {
        self.calls.push(format!("click {}", id));
        let (kind, parent) = (self.nodes[id].kind, self.nodes[id].parent);
        match kind {
            NodeKind::Plain => {}
            NodeKind::Checkbox => self.nodes[id].selected = !self.nodes[id].selected,
            NodeKind::Option => {
                let multiple = parent
                    .map(|p| self.nodes[p].attributes.contains_key("multiple"))
                    .unwrap_or(false);
                if multiple {
                    self.nodes[id].selected = !self.nodes[id].selected;
                } else {
                    for node in self.nodes.iter_mut() {
                        if node.kind == NodeKind::Option && node.parent == parent {
                            node.selected = false;
                        }
                    }
                    self.nodes[id].selected = true;
                }
            }
        }
    }

    fn current_url(&self) -> String {
        self.history
            .get(self.history_index)
            .cloned()
            .unwrap_or_else(|| "about:blank".to_string())
    }
}

#[async_trait]
impl Driver for MockDriver {
    type Element = MockElement;

    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("goto {}", url));
        let keep = if state.history.is_empty() {
            0
        } else {
            state.history_index + 1
        };
        state.history.truncate(keep);
        state.history.push(url.to_string());
        state.history_index = state.history.len() - 1;
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("back".to_string());
        state.history_index = state.history_index.saturating_sub(1);
        Ok(())
    }

    async fn forward(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("forward".to_string());
        if state.history_index + 1 < state.history.len() {
            state.history_index += 1;
        }
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        self.record("refresh".to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().current_url())
    }

    async fn title(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        match state.current_window {
            Some(index) => Ok(state.windows[index].1.clone()),
            None => Ok(state.page_title.clone()),
        }
    }

    async fn source(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().page_source.clone())
    }

    async fn window(&self) -> Result<String> {
        let state = self.state.lock().unwrap();
        state
            .current_window
            .map(|index| state.windows[index].0.clone())
            .ok_or_else(|| PageError::WindowNotFound("current window".to_string()))
    }

    async fn windows(&self) -> Result<Vec<String>> {
        Ok(self.window_handles())
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("switch {}", handle));
        let index = state
            .windows
            .iter()
            .position(|(h, _)| h == handle)
            .ok_or_else(|| PageError::WindowNotFound(handle.to_string()))?;
        state.current_window = Some(index);
        Ok(())
    }

    async fn close_window(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .current_window
            .take()
            .ok_or_else(|| PageError::WindowNotFound("current window".to_string()))?;
        let (handle, _) = state.windows.remove(index);
        state.calls.push(format!("close {}", handle));
        Ok(())
    }

    async fn enter_frame(&self, frame: &MockElement) -> Result<()> {
        self.record(format!("frame {}", frame.0));
        Ok(())
    }

    async fn enter_default_content(&self) -> Result<()> {
        self.record("default content".to_string());
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<MockElement>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find {}", xpath));

        if let Some(remaining) = state.appear_after.get_mut(xpath)
            && *remaining > 0
        {
            *remaining -= 1;
            return Ok(Vec::new());
        }
        if let Some(remaining) = state.vanish_after.get_mut(xpath) {
            if *remaining == 0 {
                return Ok(Vec::new());
            }
            *remaining -= 1;
        }

        Ok(state
            .queries
            .get(xpath)
            .map(|ids| ids.iter().copied().map(MockElement).collect())
            .unwrap_or_default())
    }

    async fn find_all_within(&self, parent: &MockElement, xpath: &str) -> Result<Vec<MockElement>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find {} in {}", xpath, parent.0));
        Ok(state
            .child_queries
            .get(&(parent.0, xpath.to_string()))
            .map(|ids| ids.iter().copied().map(MockElement).collect())
            .unwrap_or_default())
    }

    async fn click(&self, element: &MockElement) -> Result<()> {
        self.state.lock().unwrap().click(element.0);
        Ok(())
    }

    async fn clear(&self, element: &MockElement) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear {}", element.0));
        state.nodes[element.0].value.clear();
        Ok(())
    }

    async fn send_keys(&self, element: &MockElement, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("keys {} {}", element.0, text));
        state.nodes[element.0].value.push_str(text);
        Ok(())
    }

    async fn attribute(&self, element: &MockElement, name: &str) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        let node = &state.nodes[element.0];
        if name == "value" {
            return Ok(Some(node.value.clone()));
        }
        Ok(node.attributes.get(name).cloned())
    }

    async fn text(&self, element: &MockElement) -> Result<String> {
        Ok(self.state.lock().unwrap().nodes[element.0].text.clone())
    }

    async fn is_displayed(&self, element: &MockElement) -> Result<bool> {
        Ok(self.state.lock().unwrap().nodes[element.0].displayed)
    }

    async fn is_enabled(&self, element: &MockElement) -> Result<bool> {
        Ok(self.state.lock().unwrap().nodes[element.0].enabled)
    }

    async fn is_selected(&self, element: &MockElement) -> Result<bool> {
        Ok(self.state.lock().unwrap().nodes[element.0].selected)
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push((script.to_string(), args));
        if state.failing_scripts.contains(script) {
            return Err(PageError::ScriptExecution(format!(
                "javascript error in: {}",
                script
            )));
        }
        if script.starts_with("window.open(") {
            state.opened_windows += 1;
            let handle = format!("opened-{}", state.opened_windows);
            state.windows.push((handle, String::new()));
        }
        Ok(state
            .script_results
            .get(script)
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn perform(&self, gesture: Gesture<MockElement>) -> Result<()> {
        self.state.lock().unwrap().gestures.push(gesture);
        Ok(())
    }

    async fn accept_alert(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .alert
            .take()
            .map(|_| ())
            .ok_or_else(|| PageError::Other(anyhow::anyhow!("no such alert")))
    }

    async fn dismiss_alert(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("dismiss alert".to_string());
        state
            .alert
            .take()
            .map(|_| ())
            .ok_or_else(|| PageError::Other(anyhow::anyhow!("no such alert")))
    }

    async fn alert_text(&self) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .alert
            .clone()
            .ok_or_else(|| PageError::Other(anyhow::anyhow!("no such alert")))
    }

    async fn send_alert_text(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.alert.is_none() {
            return Err(PageError::Other(anyhow::anyhow!("no such alert")));
        }
        state.alert_input = Some(text.to_string());
        Ok(())
    }
}

/// Page over `driver` with waits short enough for unit tests
pub fn test_page(driver: MockDriver) -> crate::page::Page<MockDriver> {
    use std::time::Duration;

    crate::page::Page::with_timeouts(
        driver,
        crate::config::Timeouts {
            short: Duration::from_millis(20),
            long: Duration::from_millis(60),
            poll_interval: Duration::from_millis(1),
            pause: Duration::ZERO,
        },
    )
}
