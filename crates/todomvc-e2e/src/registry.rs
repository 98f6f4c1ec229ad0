//! Selector registry for the TodoMVC variants under test.
//!
//! Each [`Variant`] maps to one immutable [`Selectors`] table. Fields that only
//! exist in some builds are `Option`s, so asking for them on the wrong variant
//! is an explicit configuration error rather than a silent empty locator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::result::{TodoError, TodoResult};

/// A TodoMVC build under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// React build served from `examples/react/dist`
    Classic,
    /// TypeScript + React build
    TypescriptReact,
}

impl Variant {
    /// Every known variant
    pub const ALL: [Self; 2] = [Self::Classic, Self::TypescriptReact];

    /// Registry key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::TypescriptReact => "typescript-react",
        }
    }

    /// Hosted entry point
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Classic => "https://todomvc.com/examples/react/dist/",
            Self::TypescriptReact => "https://todomvc.com/examples/typescript-react/#/",
        }
    }

    /// Selector table for this variant
    #[must_use]
    pub const fn selectors(self) -> &'static Selectors {
        match self {
            Self::Classic => &CLASSIC,
            Self::TypescriptReact => &TYPESCRIPT_REACT,
        }
    }

    /// Wording that follows "N item(s)" in the footer count
    #[must_use]
    pub const fn count_suffix(self) -> &'static str {
        match self {
            Self::Classic => "left!",
            Self::TypescriptReact => "left",
        }
    }

    /// Expected footer text for `remaining` active items
    #[must_use]
    pub fn remaining_text(self, remaining: usize) -> String {
        let noun = if remaining == 1 { "item" } else { "items" };
        format!("{remaining} {noun} {}", self.count_suffix())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = TodoError;

    fn from_str(s: &str) -> TodoResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "typescript-react" | "typescriptreact" | "typescript_react" => {
                Ok(Self::TypescriptReact)
            }
            _ => Err(TodoError::UnknownVariant { key: s.to_string() }),
        }
    }
}

/// Filter links in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every item
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl Filter {
    /// Footer order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Visible link label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Hash route the link points to
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    /// Filter selected by a URL fragment; anything unrecognised is `All`
    #[must_use]
    pub fn from_route(fragment: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.route() == fragment)
            .unwrap_or(Self::All)
    }

    /// Whether an item with the given completion state is shown
    #[must_use]
    pub const fn shows(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

/// Filter link selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelectors {
    /// "All" link
    pub all: &'static str,
    /// "Active" link
    pub active: &'static str,
    /// "Completed" link
    pub completed: &'static str,
}

impl FilterSelectors {
    /// Selector for one filter
    #[must_use]
    pub const fn get(&self, filter: Filter) -> &'static str {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Selector table for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selectors {
    /// Input used to type new items
    pub new_todo_input: &'static str,
    /// Alternate read locator for the input
    pub read_todo_input: Option<&'static str>,
    /// One rendered list item
    pub todo_list_item: &'static str,
    /// Completion toggle, relative to a list item
    pub toggle_checkbox: &'static str,
    /// Mark-all control
    pub toggle_all: Option<&'static str>,
    /// Delete control, relative to a list item
    pub destroy_button: &'static str,
    /// Clear-completed control
    pub clear_completed: &'static str,
    /// Remaining-count display
    pub todo_count: &'static str,
    /// Footer region, absent while the list is empty
    pub footer: &'static str,
    /// Page heading
    pub title: &'static str,
    /// Any filter link
    pub filter_links: &'static str,
    /// Individual filter links
    pub filters: FilterSelectors,
}

impl Selectors {
    /// Unwrap an optional selector or report it as unsupported for `variant`
    pub fn require(
        variant: Variant,
        selector: Option<&'static str>,
        name: &'static str,
    ) -> TodoResult<&'static str> {
        selector.ok_or_else(|| TodoError::UnsupportedSelector {
            variant: variant.key().to_string(),
            selector: name,
        })
    }
}

const FILTERS: FilterSelectors = FilterSelectors {
    all: r##"a[href="#/"]"##,
    active: r##"a[href="#/active"]"##,
    completed: r##"a[href="#/completed"]"##,
};

static CLASSIC: Selectors = Selectors {
    new_todo_input: "#todo-input",
    read_todo_input: Some("input.new-todo"),
    todo_list_item: ".todo-list li",
    toggle_checkbox: ".toggle",
    toggle_all: Some(".toggle-all"),
    destroy_button: ".destroy",
    clear_completed: ".clear-completed",
    todo_count: ".todo-count",
    footer: ".footer",
    title: "h1",
    filter_links: ".filters a",
    filters: FILTERS,
};

static TYPESCRIPT_REACT: Selectors = Selectors {
    new_todo_input: r#"input[placeholder="What needs to be done?"]"#,
    read_todo_input: None,
    todo_list_item: ".todo-list li",
    toggle_checkbox: r#"input[type="checkbox"]"#,
    toggle_all: None,
    destroy_button: ".destroy",
    clear_completed: "button.clear-completed",
    todo_count: ".todo-count",
    footer: ".footer",
    title: "h1",
    filter_links: ".filters a",
    filters: FILTERS,
};

#[cfg(test)]
mod tests {
    use super::*;

    mod variant_tests {
        use super::*;

        #[test]
        fn test_parse_known_keys() {
            assert_eq!("classic".parse::<Variant>().unwrap(), Variant::Classic);
            assert_eq!(
                "typescript-react".parse::<Variant>().unwrap(),
                Variant::TypescriptReact
            );
            assert_eq!(
                "typescriptReact".parse::<Variant>().unwrap(),
                Variant::TypescriptReact
            );
        }

        #[test]
        fn test_unknown_key_is_config_error() {
            let err = "angular".parse::<Variant>().unwrap_err();
            assert!(err.is_config());
            assert!(err.to_string().contains("angular"));
        }

        #[test]
        fn test_key_round_trips_through_display() {
            for v in Variant::ALL {
                assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
            }
        }

        #[test]
        fn test_remaining_wording_diverges() {
            assert_eq!(Variant::Classic.remaining_text(3), "3 items left!");
            assert_eq!(Variant::TypescriptReact.remaining_text(3), "3 items left");
            assert_eq!(Variant::TypescriptReact.remaining_text(1), "1 item left");
        }

        #[test]
        fn test_base_urls() {
            assert!(Variant::Classic.base_url().ends_with("/react/dist/"));
            assert!(Variant::TypescriptReact
                .base_url()
                .contains("typescript-react"));
        }
    }

    mod selector_tests {
        use super::*;

        #[test]
        fn test_required_selectors_non_empty() {
            for v in Variant::ALL {
                let s = v.selectors();
                for sel in [
                    s.new_todo_input,
                    s.todo_list_item,
                    s.toggle_checkbox,
                    s.destroy_button,
                    s.clear_completed,
                    s.todo_count,
                    s.footer,
                    s.title,
                    s.filter_links,
                ] {
                    assert!(!sel.is_empty(), "{v}: empty selector");
                }
                for f in Filter::ALL {
                    assert!(s.filters.get(f).contains(f.route()));
                }
            }
        }

        #[test]
        fn test_optional_selectors() {
            let ts = Variant::TypescriptReact.selectors();
            assert!(Selectors::require(Variant::TypescriptReact, ts.toggle_all, "toggle_all")
                .unwrap_err()
                .is_config());
            let classic = Variant::Classic.selectors();
            assert_eq!(
                Selectors::require(Variant::Classic, classic.toggle_all, "toggle_all").unwrap(),
                ".toggle-all"
            );
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn test_from_route() {
            assert_eq!(Filter::from_route("#/active"), Filter::Active);
            assert_eq!(Filter::from_route("#/completed"), Filter::Completed);
            assert_eq!(Filter::from_route("#/"), Filter::All);
            assert_eq!(Filter::from_route(""), Filter::All);
        }

        #[test]
        fn test_shows() {
            assert!(Filter::All.shows(true) && Filter::All.shows(false));
            assert!(Filter::Active.shows(false) && !Filter::Active.shows(true));
            assert!(Filter::Completed.shows(true) && !Filter::Completed.shows(false));
        }
    }
}
