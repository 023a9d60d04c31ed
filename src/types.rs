use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser viewport dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let (width, height) = s
            .split_once('x')
            .ok_or_else(|| anyhow::anyhow!("Invalid viewport format. Use WIDTHxHEIGHT (e.g., 1920x1080)"))?;

        let width = width
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid width in viewport size"))?;
        let height = height
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid height in viewport size"))?;

        Ok(ViewportSize { width, height })
    }
}

/// Condition polled by an explicit wait, with its resolved XPath
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// At least one element matches and every match is displayed
    AllElementsVisible(String),
    /// The first match is displayed
    ElementVisible(String),
    /// The first match is displayed and enabled
    ElementClickable(String),
    /// Nothing matches, or the first match is hidden
    ElementInvisible(String),
    /// At least one element matches
    ElementPresent(String),
    /// At least one element matches; yields the whole list
    AllElementsPresent(String),
    /// A user prompt is open
    AlertPresent,
}

impl WaitCondition {
    /// Resolved XPath the condition looks at, if any
    pub fn locator(&self) -> Option<&str> {
        match self {
            WaitCondition::AllElementsVisible(xpath)
            | WaitCondition::ElementVisible(xpath)
            | WaitCondition::ElementClickable(xpath)
            | WaitCondition::ElementInvisible(xpath)
            | WaitCondition::ElementPresent(xpath)
            | WaitCondition::AllElementsPresent(xpath) => Some(xpath),
            WaitCondition::AlertPresent => None,
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::AllElementsVisible(xpath) => write!(f, "all elements visible: {}", xpath),
            WaitCondition::ElementVisible(xpath) => write!(f, "element visible: {}", xpath),
            WaitCondition::ElementClickable(xpath) => write!(f, "element clickable: {}", xpath),
            WaitCondition::ElementInvisible(xpath) => write!(f, "element invisible: {}", xpath),
            WaitCondition::ElementPresent(xpath) => write!(f, "element present: {}", xpath),
            WaitCondition::AllElementsPresent(xpath) => {
                write!(f, "all elements present: {}", xpath)
            }
            WaitCondition::AlertPresent => f.write_str("alert present"),
        }
    }
}

/// Expected order of a column or list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Document-level property read through a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentProperty {
    Domain,
    Title,
    Url,
    /// Rendered text of the whole document
    InnerText,
}

impl DocumentProperty {
    pub(crate) fn script(&self) -> &'static str {
        match self {
            DocumentProperty::Domain => "return document.domain;",
            DocumentProperty::Title => "return document.title;",
            DocumentProperty::Url => "return document.URL;",
            DocumentProperty::InnerText => "return document.documentElement.innerText;",
        }
    }
}

/// Pointer or keyboard input performed through the driver's action API.
///
/// Keys are W3C WebDriver code points, e.g. `char::from(Key::Control)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture<E> {
    Hover(E),
    DoubleClick(E),
    ContextClick(E),
    ClickAndHold(E),
    DragAndDrop { source: E, target: E },
    KeyDown(char),
    KeyUp(char),
}

/// A control that chooses options by their visible text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown<'a> {
    /// A `<select>` element
    Native {
        locator: &'a str,
        values: &'a [&'a str],
    },
    /// A script-rendered list: clicking `parent` opens it, `items` matches every option
    Custom { parent: &'a str, items: &'a str },
}

impl<'a> Dropdown<'a> {
    pub fn native(locator: &'a str) -> Self {
        Dropdown::Native {
            locator,
            values: &[],
        }
    }

    pub fn custom(parent: &'a str, items: &'a str) -> Self {
        Dropdown::Custom { parent, items }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
