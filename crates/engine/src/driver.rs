//! The driver-session boundary: everything the engine asks of a browser

use async_trait::async_trait;
use thiserror::Error;

use crate::scenario::Locator;

/// Failures raised by a driver backend
#[derive(Error, Debug)]
pub enum DriverError {
    /// The locator matched nothing. Distinct from a backend fault so the
    /// run result can say which element went missing.
    #[error("element not found: {0}")]
    NotFound(String),

    /// An indexed locator pointed past the end of its collection.
    #[error("index {index} out of range for {selector}: {count} element(s) present")]
    IndexOutOfRange {
        selector: String,
        index: usize,
        count: usize,
    },

    /// The automation backend itself failed (lost connection, protocol
    /// error, browser crash).
    #[error("webdriver backend error: {0}")]
    Backend(String),
}

/// Opaque handle to a live browser, consumed one operation at a time.
///
/// Implementations resolve locators freshly on every call; element handles
/// never cross this boundary, so a click that re-renders a list cannot
/// leave a later step holding a stale reference.
#[async_trait]
pub trait DriverSession: Send {
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Send keystrokes to the located input.
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), DriverError>;

    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    /// Choose the option with the given value attribute in a dropdown.
    async fn select_value(&self, locator: &Locator, value: &str) -> Result<(), DriverError>;

    async fn read_text(&self, locator: &Locator) -> Result<String, DriverError>;

    /// Number of elements currently matching the locator. Zero matches is
    /// a count, not an error.
    async fn count(&self, locator: &Locator) -> Result<usize, DriverError>;

    /// Whether the element exists and is displayed right now. Absence is
    /// reported as `Ok(false)` so wait predicates can poll for arrival.
    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError>;

    /// Tear the session down. Idempotent; must not raise after an earlier
    /// termination.
    async fn close(&mut self) -> Result<(), DriverError>;
}
