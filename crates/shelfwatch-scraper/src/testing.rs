//! In-memory [`BrowserDriver`] for exercising the listing engine without a
//! browser.
//!
//! A [`FakeDriver`] maps URLs to [`FakePage`]s. Navigating to a URL that was
//! never registered behaves like a page whose product grid never renders,
//! so the readiness wait times out.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::{BrowserDriver, ElementHandle};
use crate::error::DriverError;
use crate::lookup::Lookup;
use crate::selectors;

/// A DOM node inside a product tile.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    text: String,
    attrs: HashMap<String, String>,
}

impl FakeNode {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            attrs: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_owned(), value.to_owned());
        self
    }
}

/// One product tile: descendant nodes keyed by the selector that finds them.
#[derive(Debug, Clone, Default)]
pub struct FakeItem {
    nodes: HashMap<String, FakeNode>,
    stale: bool,
}

impl FakeItem {
    /// A tile with no descendants; every field extracts as its sentinel.
    #[must_use]
    pub fn bare() -> Self {
        Self::default()
    }

    /// A tile with name, packaging and link but no promotion badge or dates.
    #[must_use]
    pub fn product(name: &str, packaging: &str, href: &str) -> Self {
        Self::bare()
            .with_node(selectors::PRODUCT_NAME, FakeNode::text(name))
            .with_node(selectors::PACKAGING_DETAILS, FakeNode::text(packaging))
            .with_node(
                selectors::PRODUCT_LINK,
                FakeNode::default().with_attr(selectors::PRODUCT_LINK_ATTR, href),
            )
    }

    /// Adds the promotion badge and validity nodes.
    #[must_use]
    pub fn promoted(self, label: &str, validity: &str) -> Self {
        self.with_node(selectors::PROMOTION_LABEL, FakeNode::text(label))
            .with_node(selectors::PROMOTION_VALIDITY, FakeNode::text(validity))
    }

    #[must_use]
    pub fn with_node(mut self, selector: &str, node: FakeNode) -> Self {
        self.nodes.insert(selector.to_owned(), node);
        self
    }

    #[must_use]
    pub fn without(mut self, selector: &str) -> Self {
        self.nodes.remove(selector);
        self
    }

    /// Marks the tile as detached: every read on it fails with
    /// [`DriverError::StaleElement`].
    #[must_use]
    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }
}

/// A listing page as the fake browser renders it.
#[derive(Debug, Clone)]
pub struct FakePage {
    ready: bool,
    items: Vec<FakeItem>,
    has_next: bool,
}

impl FakePage {
    /// A rendered page holding `items`, with no next-page control.
    #[must_use]
    pub fn with_items(items: Vec<FakeItem>) -> Self {
        Self {
            ready: true,
            items,
            has_next: false,
        }
    }

    /// A page whose readiness wait succeeds but whose grid query returns
    /// nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    /// A page whose product grid never appears.
    #[must_use]
    pub fn never_ready() -> Self {
        Self {
            ready: false,
            items: Vec::new(),
            has_next: false,
        }
    }

    #[must_use]
    pub fn with_next_page(mut self) -> Self {
        self.has_next = true;
        self
    }
}

#[derive(Default)]
struct Session {
    current: Option<String>,
    navigations: Vec<String>,
    scripts: Vec<String>,
}

/// Scripted browser tab backed by a URL-to-page table.
#[derive(Default)]
pub struct FakeDriver {
    pages: HashMap<String, FakePage>,
    failing_urls: HashSet<String>,
    session: Mutex<Session>,
}

impl FakeDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_owned(), page);
        self
    }

    /// Makes navigation to `url` fail with [`DriverError::Navigation`].
    #[must_use]
    pub fn failing_navigation(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_owned());
        self
    }

    /// Every URL passed to `navigate`, in call order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    /// Every script passed to `execute_script`, in call order.
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        self.lock().scripts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_page(&self) -> Option<&FakePage> {
        let current = self.lock().current.clone()?;
        self.pages.get(&current)
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut session = self.lock();
        session.navigations.push(url.to_owned());
        if self.failing_urls.contains(url) {
            session.current = None;
            return Err(DriverError::Navigation {
                url: url.to_owned(),
                reason: "net::ERR_CONNECTION_RESET".to_owned(),
            });
        }
        session.current = Some(url.to_owned());
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<(), DriverError> {
        self.lock().scripts.push(script.to_owned());
        Ok(())
    }

    async fn wait_for_presence(
        &self,
        selector: &str,
        deadline: Duration,
    ) -> Result<(), DriverError> {
        match self.current_page() {
            Some(page) if page.ready => Ok(()),
            _ => Err(DriverError::Timeout {
                selector: selector.to_owned(),
                waited: deadline,
            }),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>, DriverError> {
        let Some(page) = self.current_page() else {
            return Ok(Vec::new());
        };
        let found = match selector {
            selectors::PRODUCT_ITEM => page.items.iter().cloned().map(FakeElement::Item).collect(),
            selectors::NEXT_PAGE if page.has_next => vec![FakeElement::Node(FakeNode::default())],
            _ => Vec::new(),
        };
        Ok(found)
    }
}

/// Element handle returned by [`FakeDriver`].
#[derive(Debug, Clone)]
pub enum FakeElement {
    Item(FakeItem),
    Node(FakeNode),
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn find_scoped(&self, selector: &str) -> Result<Lookup<Self>, DriverError> {
        match self {
            FakeElement::Item(item) if item.stale => Err(DriverError::StaleElement),
            FakeElement::Item(item) => Ok(Lookup::from(
                item.nodes.get(selector).cloned().map(FakeElement::Node),
            )),
            FakeElement::Node(_) => Ok(Lookup::Absent),
        }
    }

    async fn text(&self) -> Result<String, DriverError> {
        match self {
            FakeElement::Item(item) if item.stale => Err(DriverError::StaleElement),
            FakeElement::Item(_) => Ok(String::new()),
            FakeElement::Node(node) => Ok(node.text.clone()),
        }
    }

    async fn attribute(&self, name: &str) -> Result<Lookup<String>, DriverError> {
        match self {
            FakeElement::Item(item) if item.stale => Err(DriverError::StaleElement),
            FakeElement::Item(_) => Ok(Lookup::Absent),
            FakeElement::Node(node) => Ok(Lookup::from(node.attrs.get(name).cloned())),
        }
    }
}
