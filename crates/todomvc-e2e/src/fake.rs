//! In-memory TodoMVC used as a [`Driver`] double.
//!
//! `FakeTodoApp` models the rendered page of one variant closely enough for
//! the scenarios to run without a browser: it honours that variant's
//! selectors and count wording, trims submitted text, hides the footer while
//! the list is empty and only reveals an item's destroy button after the
//! pointer hovers the item. Selectors it does not know resolve to nothing,
//! like a real page would.
//!
//! One `FakeTodoApp` is one browser session. Within it, typescript-react
//! keeps its list in local storage, so a reload brings the items back, and
//! a `goto` that only changes the URL fragment does not reload at all.
//! classic keeps its list in memory and loses it on reload.

use async_trait::async_trait;

use crate::driver::{ensure_single, keys, Driver};
use crate::locator::{Locator, Step};
use crate::registry::{Filter, Variant};
use crate::result::{TodoError, TodoResult};

const PLACEHOLDER: &str = "What needs to be done?";

/// One todo held by the fake page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeItem {
    /// Label text as rendered
    pub text: String,
    /// Completion flag
    pub completed: bool,
}

/// A node of the fake document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Document,
    Title,
    Input,
    ToggleAll,
    Item(usize),
    Toggle(usize),
    Destroy(usize),
    Footer,
    Count,
    FilterLink(Filter),
    ClearCompleted,
}

/// In-memory TodoMVC page for one variant
#[derive(Debug)]
pub struct FakeTodoApp {
    variant: Variant,
    url: Option<String>,
    input: String,
    items: Vec<FakeItem>,
    filter: Filter,
    hovered: Option<usize>,
    history: Vec<String>,
}

impl FakeTodoApp {
    /// Create a fake page for `variant`; nothing is rendered until `goto`
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            url: None,
            input: String::new(),
            items: Vec::new(),
            filter: Filter::All,
            hovered: None,
            history: Vec::new(),
        }
    }

    /// Variant being modelled
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Items in insertion order, regardless of the active filter
    #[must_use]
    pub fn items(&self) -> &[FakeItem] {
        &self.items
    }

    /// Calls received, e.g. `click:.clear-completed`
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Whether a call with this prefix was received
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history.iter().any(|c| c.starts_with(method))
    }

    fn record(&mut self, call: String) {
        self.history.push(call);
    }

    fn active_count(&self) -> usize {
        self.items.iter().filter(|i| !i.completed).count()
    }

    /// Nodes in document order
    fn document(&self) -> Vec<Node> {
        if self.url.is_none() {
            return Vec::new();
        }
        let mut nodes = vec![Node::Title, Node::Input];
        if self.items.is_empty() {
            return nodes;
        }
        if self.variant.selectors().toggle_all.is_some() {
            nodes.push(Node::ToggleAll);
        }
        for (i, item) in self.items.iter().enumerate() {
            if self.filter.shows(item.completed) {
                nodes.extend([Node::Item(i), Node::Toggle(i), Node::Destroy(i)]);
            }
        }
        nodes.push(Node::Footer);
        nodes.push(Node::Count);
        nodes.extend(Filter::ALL.map(Node::FilterLink));
        if self.renders_clear_completed() {
            nodes.push(Node::ClearCompleted);
        }
        nodes
    }

    /// classic keeps the button in the footer (disabled when idle);
    /// typescript-react only renders it once something is completed
    fn renders_clear_completed(&self) -> bool {
        match self.variant {
            Variant::Classic => true,
            Variant::TypescriptReact => self.items.iter().any(|i| i.completed),
        }
    }

    fn descendants(&self, node: Node) -> Vec<Node> {
        match node {
            Node::Document => self.document(),
            Node::Item(i) => vec![Node::Toggle(i), Node::Destroy(i)],
            Node::Footer => self
                .document()
                .into_iter()
                .filter(|n| {
                    matches!(n, Node::Count | Node::FilterLink(_) | Node::ClearCompleted)
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn matches(&self, node: Node, sel: &str) -> bool {
        let s = self.variant.selectors();
        match node {
            Node::Document => false,
            Node::Title => sel == s.title,
            Node::Input => {
                sel == s.new_todo_input || Some(sel) == s.read_todo_input || sel == "input"
            }
            Node::ToggleAll => Some(sel) == s.toggle_all,
            Node::Item(_) => sel == s.todo_list_item || sel == "li",
            Node::Toggle(_) => sel == s.toggle_checkbox || sel == "input",
            Node::Destroy(_) => sel == s.destroy_button,
            Node::Footer => sel == s.footer,
            Node::Count => sel == s.todo_count,
            Node::FilterLink(f) => sel == s.filter_links || sel == s.filters.get(f) || sel == "a",
            Node::ClearCompleted => sel == s.clear_completed,
        }
    }

    fn node_text(&self, node: Node) -> String {
        match node {
            Node::Title => "todos".to_string(),
            Node::Item(i) => self.items[i].text.clone(),
            Node::Count => self.variant.remaining_text(self.active_count()),
            Node::FilterLink(f) => f.label().to_string(),
            Node::ClearCompleted => "Clear completed".to_string(),
            Node::Footer | Node::Document => self
                .descendants(node)
                .into_iter()
                .map(|n| self.node_text(n))
                .collect(),
            Node::Input | Node::ToggleAll | Node::Toggle(_) | Node::Destroy(_) => String::new(),
        }
    }

    fn node_attribute(&self, node: Node, name: &str) -> Option<String> {
        match (node, name) {
            (Node::Input, "placeholder") => Some(PLACEHOLDER.to_string()),
            (Node::Input, "value") => Some(self.input.clone()),
            (Node::Item(i), "class") => {
                Some(if self.items[i].completed { "completed" } else { "" }.to_string())
            }
            (Node::Toggle(_) | Node::ToggleAll, "type") => Some("checkbox".to_string()),
            (Node::Toggle(i), "checked") => self.items[i].completed.then(String::new),
            (Node::FilterLink(f), "href") => Some(f.route().to_string()),
            (Node::FilterLink(f), "class") => {
                Some(if f == self.filter { "selected" } else { "" }.to_string())
            }
            _ => None,
        }
    }

    fn node_visible(&self, node: Node) -> bool {
        match node {
            Node::Destroy(i) => self.hovered == Some(i),
            _ => true,
        }
    }

    fn resolve(&self, locator: &Locator) -> Vec<Node> {
        let mut nodes = vec![Node::Document];
        for step in locator.steps() {
            nodes = match step {
                Step::Css(sel) => {
                    let mut found: Vec<Node> = Vec::new();
                    for parent in &nodes {
                        for n in self.descendants(*parent) {
                            if self.matches(n, sel) && !found.contains(&n) {
                                found.push(n);
                            }
                        }
                    }
                    found
                }
                Step::Nth(i) => nodes.get(*i).copied().into_iter().collect(),
                Step::HasText(t) => nodes
                    .into_iter()
                    .filter(|n| self.node_text(*n).contains(t.as_str()))
                    .collect(),
            };
        }
        nodes.retain(|n| *n != Node::Document);
        nodes
    }

    fn resolve_one(&self, locator: &Locator) -> TodoResult<Node> {
        let nodes = self.resolve(locator);
        ensure_single(locator, nodes.len())?;
        Ok(nodes[0])
    }

    fn action_error(action: &'static str, locator: &Locator, message: &str) -> TodoError {
        TodoError::Action {
            action,
            locator: locator.to_string(),
            message: message.to_string(),
        }
    }

    fn submit(&mut self) {
        let text = self.input.trim().to_string();
        if !text.is_empty() {
            self.items.push(FakeItem {
                text,
                completed: false,
            });
        }
        self.input.clear();
    }

    /// classic keeps todos in memory; typescript-react persists them
    const fn persists_items(&self) -> bool {
        matches!(self.variant, Variant::TypescriptReact)
    }

    fn remove(&mut self, index: usize) {
        let _ = self.items.remove(index);
        self.hovered = None;
    }
}

fn split_fragment(url: &str) -> (&str, Option<&str>) {
    match url.find('#') {
        Some(i) => (&url[..i], Some(&url[i..])),
        None => (url, None),
    }
}

#[async_trait]
impl Driver for FakeTodoApp {
    async fn goto(&mut self, url: &str) -> TodoResult<()> {
        self.record(format!("goto:{url}"));
        if url != self.variant.base_url() {
            return Err(TodoError::Navigation {
                url: url.to_string(),
                message: format!("fake {} page only serves its own URL", self.variant),
            });
        }
        let (root, fragment) = split_fragment(url);
        let same_document = fragment.is_some()
            && self
                .url
                .as_deref()
                .is_some_and(|current| split_fragment(current).0 == root);
        if !same_document {
            self.input.clear();
            self.hovered = None;
            if !self.persists_items() {
                self.items.clear();
            }
        }
        self.url = Some(url.to_string());
        self.filter = Filter::from_route(fragment.unwrap_or_default());
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> TodoResult<usize> {
        Ok(self.resolve(locator).len())
    }

    async fn text(&self, locator: &Locator) -> TodoResult<String> {
        let node = self.resolve_one(locator)?;
        Ok(self.node_text(node))
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> TodoResult<Option<String>> {
        let node = self.resolve_one(locator)?;
        Ok(self.node_attribute(node, name))
    }

    async fn is_visible(&self, locator: &Locator) -> TodoResult<bool> {
        let node = self.resolve_one(locator)?;
        Ok(self.node_visible(node))
    }

    async fn is_editable(&self, locator: &Locator) -> TodoResult<bool> {
        let node = self.resolve_one(locator)?;
        Ok(node == Node::Input)
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> TodoResult<()> {
        self.record(format!("fill:{locator}"));
        match self.resolve_one(locator)? {
            Node::Input => {
                self.input = text.to_string();
                Ok(())
            }
            _ => Err(Self::action_error("fill", locator, "element is not an input")),
        }
    }

    async fn press(&mut self, locator: &Locator, key: &str) -> TodoResult<()> {
        self.record(format!("press:{locator}:{key}"));
        let node = self.resolve_one(locator)?;
        if node == Node::Input && key == keys::ENTER {
            self.submit();
        } else if node == Node::Input && key == keys::ESCAPE {
            self.input.clear();
        }
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> TodoResult<()> {
        self.record(format!("click:{locator}"));
        let node = self.resolve_one(locator)?;
        if !self.node_visible(node) {
            return Err(Self::action_error("click", locator, "element is not visible"));
        }
        match node {
            Node::Toggle(i) => self.items[i].completed = !self.items[i].completed,
            Node::Destroy(i) => self.remove(i),
            Node::ClearCompleted => {
                self.items.retain(|i| !i.completed);
                self.hovered = None;
            }
            Node::FilterLink(f) => {
                self.filter = f;
                self.hovered = None;
            }
            Node::ToggleAll => {
                let all_done = self.items.iter().all(|i| i.completed);
                for item in &mut self.items {
                    item.completed = !all_done;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn hover(&mut self, locator: &Locator) -> TodoResult<()> {
        self.record(format!("hover:{locator}"));
        self.hovered = match self.resolve_one(locator)? {
            Node::Item(i) | Node::Toggle(i) | Node::Destroy(i) => Some(i),
            _ => None,
        };
        Ok(())
    }

    async fn check(&mut self, locator: &Locator) -> TodoResult<()> {
        self.record(format!("check:{locator}"));
        match self.resolve_one(locator)? {
            Node::Toggle(i) => {
                self.items[i].completed = true;
                Ok(())
            }
            Node::ToggleAll => {
                for item in &mut self.items {
                    item.completed = true;
                }
                Ok(())
            }
            _ => Err(Self::action_error("check", locator, "element is not a checkbox")),
        }
    }

    async fn current_url(&self) -> TodoResult<String> {
        let base = self.url.as_deref().unwrap_or("about:blank");
        if self.url.is_none() {
            return Ok(base.to_string());
        }
        let root = base.split('#').next().unwrap_or(base);
        Ok(format!("{root}{}", self.filter.route()))
    }
}
