use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;

use crate::driver::ElementHandle;
use crate::error::DriverError;
use crate::lookup::Lookup;

/// A DOM node on the session's tab.
pub struct ChromeElement(Element);

impl ChromeElement {
    pub(super) fn new(element: Element) -> Self {
        Self(element)
    }
}

#[async_trait]
impl ElementHandle for ChromeElement {
    async fn find_scoped(&self, selector: &str) -> Result<Lookup<Self>, DriverError> {
        let first = self
            .0
            .find_elements(selector)
            .await
            .map_err(classify)?
            .into_iter()
            .next();
        Ok(Lookup::from(first.map(ChromeElement)))
    }

    async fn text(&self) -> Result<String, DriverError> {
        let text = self.0.inner_text().await.map_err(classify)?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Lookup<String>, DriverError> {
        let value = self.0.attribute(name).await.map_err(classify)?;
        Ok(Lookup::from(value))
    }
}

/// Maps a CDP failure onto the driver error taxonomy. Chrome reports
/// detached nodes as node-id lookup failures.
pub(super) fn classify(err: CdpError) -> DriverError {
    let message = err.to_string();
    if message.contains("Could not find node")
        || message.contains("No node with given id")
        || message.contains("Node is detached")
    {
        DriverError::StaleElement
    } else {
        DriverError::Browser(message)
    }
}
