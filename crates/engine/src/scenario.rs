//! Declarative scenario definitions: ordered steps over named locators

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Default bound for wait steps
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// How a step finds the element it works on.
///
/// Locators are plain strings; they are resolved against the live page
/// every time they are used, never cached as element handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Locator {
    /// Element id attribute
    Id(String),
    /// CSS selector, first match wins
    Css(String),
    /// Index into the collection matched by `list`, optionally descending
    /// into a child selector of that element
    Nth {
        list: String,
        index: usize,
        within: Option<String>,
    },
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn css(css: impl Into<String>) -> Self {
        Locator::Css(css.into())
    }

    pub fn nth(list: impl Into<String>, index: usize) -> Self {
        Locator::Nth {
            list: list.into(),
            index,
            within: None,
        }
    }

    pub fn nth_within(list: impl Into<String>, index: usize, within: impl Into<String>) -> Self {
        Locator::Nth {
            list: list.into(),
            index,
            within: Some(within.into()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{id}"),
            Locator::Css(css) => write!(f, "{css}"),
            Locator::Nth { list, index, within } => {
                write!(f, "{list}[{index}]")?;
                if let Some(within) = within {
                    write!(f, " {within}")?;
                }
                Ok(())
            }
        }
    }
}

/// Where the text observed by a read step is accumulated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Capture {
    /// Parse the text as a money amount and add it to the named total
    Amount { key: String },
    /// Remember the text verbatim under the named key
    Text { key: String },
}

/// Check applied to the value a step observed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expectation {
    /// Observed text equals this exactly
    TextEquals(String),
    /// Observed text contains this as a substring
    TextContains(String),
    /// Observed text equals a string remembered by an earlier step
    MatchesRemembered { key: String },
    /// Observed text contains the canonical `Total: $X.YY` rendering of
    /// the named running total plus a fixed surcharge
    TotalEquals { key: String, surcharge: Money },
    /// Observed element count equals this
    CountEquals(usize),
}

/// The interaction a step performs against the driver session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepAction {
    Navigate { url: String },
    Type { locator: Locator, text: String },
    Click { locator: Locator },
    Select { locator: Locator, value: String },
    WaitVisible { locator: Locator, timeout_ms: u64 },
    ReadText { locator: Locator, capture: Option<Capture> },
    Count { locator: Locator },
}

/// One unit of work: a labelled action plus an optional expected outcome.
///
/// The label doubles as the step-log line recorded when the step succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub action: StepAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,
}

impl Step {
    fn new(label: impl Into<String>, action: StepAction) -> Self {
        Self {
            label: label.into(),
            action,
            expect: None,
        }
    }

    pub fn navigate(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label, StepAction::Navigate { url: url.into() })
    }

    pub fn type_text(label: impl Into<String>, locator: Locator, text: impl Into<String>) -> Self {
        Self::new(
            label,
            StepAction::Type {
                locator,
                text: text.into(),
            },
        )
    }

    pub fn click(label: impl Into<String>, locator: Locator) -> Self {
        Self::new(label, StepAction::Click { locator })
    }

    pub fn select(label: impl Into<String>, locator: Locator, value: impl Into<String>) -> Self {
        Self::new(
            label,
            StepAction::Select {
                locator,
                value: value.into(),
            },
        )
    }

    /// Wait for the element to become visible, with the default bound.
    pub fn wait_visible(label: impl Into<String>, locator: Locator) -> Self {
        Self::wait_visible_for(label, locator, DEFAULT_WAIT_TIMEOUT_MS)
    }

    pub fn wait_visible_for(label: impl Into<String>, locator: Locator, timeout_ms: u64) -> Self {
        Self::new(label, StepAction::WaitVisible { locator, timeout_ms })
    }

    pub fn read_text(label: impl Into<String>, locator: Locator) -> Self {
        Self::new(
            label,
            StepAction::ReadText {
                locator,
                capture: None,
            },
        )
    }

    /// Read text, parse it as a price and add it to the named total.
    pub fn read_amount(
        label: impl Into<String>,
        locator: Locator,
        total_key: impl Into<String>,
    ) -> Self {
        Self::new(
            label,
            StepAction::ReadText {
                locator,
                capture: Some(Capture::Amount {
                    key: total_key.into(),
                }),
            },
        )
    }

    /// Read text and remember it verbatim for a later cross-check.
    pub fn read_remember(
        label: impl Into<String>,
        locator: Locator,
        key: impl Into<String>,
    ) -> Self {
        Self::new(
            label,
            StepAction::ReadText {
                locator,
                capture: Some(Capture::Text { key: key.into() }),
            },
        )
    }

    pub fn count(label: impl Into<String>, locator: Locator) -> Self {
        Self::new(label, StepAction::Count { locator })
    }

    /// Attach an expected-outcome check to this step.
    pub fn expecting(mut self, expect: Expectation) -> Self {
        self.expect = Some(expect);
        self
    }
}

/// A complete user journey: an ordered, immutable list of steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_url: String,
    pub steps: Vec<Step>,
}
