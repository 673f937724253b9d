//! WebDriver-backed driver session using thirtyfour

use async_trait::async_trait;
use thirtyfour::components::SelectElement;
use thirtyfour::error::WebDriverError;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};
use tracing::{debug, warn};

use crate::driver::{DriverError, DriverSession};
use crate::error::{EngineError, EngineResult};
use crate::scenario::Locator;

/// Connection settings for the WebDriver server
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// Address of a running chromedriver (or compatible) instance
    pub server_url: String,
    pub headless: bool,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

/// Driver session backed by a real browser over the WebDriver protocol
pub struct WebDriverSession {
    driver: Option<WebDriver>,
}

impl WebDriverSession {
    /// Open a new browser session.
    ///
    /// Failure here is a setup failure: no scenario has started yet and no
    /// report will be produced for it.
    pub async fn connect(config: &WebDriverConfig) -> EngineResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()
                .map_err(|e| EngineError::Setup(e.to_string()))?;
        }
        let driver = WebDriver::new(&config.server_url, caps)
            .await
            .map_err(|e| EngineError::Setup(format!("{}: {}", config.server_url, e)))?;
        debug!("browser session opened via {}", config.server_url);
        Ok(Self {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> Result<&WebDriver, DriverError> {
        self.driver
            .as_ref()
            .ok_or_else(|| DriverError::Backend("session already closed".to_string()))
    }

    async fn resolve(&self, locator: &Locator) -> Result<WebElement, DriverError> {
        let driver = self.driver()?;
        match locator {
            Locator::Id(id) => driver
                .find(By::Id(id.as_str()))
                .await
                .map_err(|e| locate_error(e, locator)),
            Locator::Css(css) => driver
                .find(By::Css(css.as_str()))
                .await
                .map_err(|e| locate_error(e, locator)),
            Locator::Nth { list, index, within } => {
                let matches = driver
                    .find_all(By::Css(list.as_str()))
                    .await
                    .map_err(|e| locate_error(e, locator))?;
                let count = matches.len();
                let element =
                    matches
                        .into_iter()
                        .nth(*index)
                        .ok_or_else(|| DriverError::IndexOutOfRange {
                            selector: list.clone(),
                            index: *index,
                            count,
                        })?;
                match within {
                    Some(child) => element
                        .find(By::Css(child.as_str()))
                        .await
                        .map_err(|e| locate_error(e, locator)),
                    None => Ok(element),
                }
            }
        }
    }
}

#[async_trait]
impl DriverSession for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.driver()?.goto(url).await.map_err(backend)
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        let element = self.resolve(locator).await?;
        element.send_keys(text).await.map_err(backend)
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        let element = self.resolve(locator).await?;
        element.click().await.map_err(backend)
    }

    async fn select_value(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        let element = self.resolve(locator).await?;
        let select = SelectElement::new(&element).await.map_err(backend)?;
        select.select_by_value(value).await.map_err(backend)
    }

    async fn read_text(&self, locator: &Locator) -> Result<String, DriverError> {
        let element = self.resolve(locator).await?;
        element.text().await.map_err(backend)
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        let driver = self.driver()?;
        // For indexed locators the underlying collection is what gets counted.
        let by = match locator {
            Locator::Id(id) => By::Id(id.as_str()),
            Locator::Css(css) => By::Css(css.as_str()),
            Locator::Nth { list, .. } => By::Css(list.as_str()),
        };
        Ok(driver.find_all(by).await.map_err(backend)?.len())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        match self.resolve(locator).await {
            Ok(element) => element.is_displayed().await.map_err(backend),
            Err(DriverError::NotFound(_)) | Err(DriverError::IndexOutOfRange { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.quit().await {
                warn!("browser session did not shut down cleanly: {e}");
            }
        }
        Ok(())
    }
}

fn backend(err: WebDriverError) -> DriverError {
    DriverError::Backend(err.to_string())
}

fn locate_error(err: WebDriverError, locator: &Locator) -> DriverError {
    match err {
        WebDriverError::NoSuchElement(_) => DriverError::NotFound(locator.to_string()),
        other => DriverError::Backend(other.to_string()),
    }
}
