//! Locator abstraction for element selection.
//!
//! A locator is a lazy chain of steps. Nothing is resolved until a driver
//! acts or asserts on it, so the same locator can be reused after the list
//! re-renders (items deleted, filters switched).

use std::fmt;

/// One resolution step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// CSS selector, matched from the document root on the first step and
    /// as descendants of the current matches afterwards
    Css(String),
    /// Keep only the n-th current match (0-based)
    Nth(usize),
    /// Keep current matches whose text content contains the string
    HasText(String),
}

/// A lazily resolved element query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    /// Create a locator from a root CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Css(selector.into())],
        }
    }

    /// Scope a descendant CSS selector under the current matches
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Self {
        self.with_step(Step::Css(selector.into()))
    }

    /// Narrow to the n-th match
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        self.with_step(Step::Nth(index))
    }

    /// Narrow to the first match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Keep matches containing `text`
    #[must_use]
    pub fn has_text(&self, text: impl Into<String>) -> Self {
        self.with_step(Step::HasText(text.into()))
    }

    /// Resolution steps in order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn with_step(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// JavaScript expression evaluating to the array of matched elements
    #[must_use]
    pub fn to_js(&self) -> String {
        let mut js = String::from("(() => { let els = [document];");
        for step in &self.steps {
            match step {
                Step::Css(sel) => {
                    js.push_str(&format!(
                        " els = Array.from(new Set(els.flatMap(e => Array.from(e.querySelectorAll({})))));",
                        js_string(sel)
                    ));
                }
                Step::Nth(i) => {
                    js.push_str(&format!(" els = els.length > {i} ? [els[{i}]] : [];"));
                }
                Step::HasText(t) => {
                    js.push_str(&format!(
                        " els = els.filter(e => (e.textContent || '').includes({}));",
                        js_string(t)
                    ));
                }
            }
        }
        js.push_str(" return els; })()");
        js
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            match step {
                Step::Css(sel) => f.write_str(sel)?,
                Step::Nth(n) => write!(f, "nth={n}")?,
                Step::HasText(t) => write!(f, "has-text={t:?}")?,
            }
        }
        Ok(())
    }
}

/// Quote a string as a JavaScript literal
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}
