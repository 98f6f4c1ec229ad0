//! Scenario catalog.
//!
//! Every scenario is self-contained: it navigates to a fresh page, builds
//! its own fixture, acts through [`TodoPage`] and asserts on what the page
//! renders. Wording that differs between variants comes from the registry
//! rather than being assumed uniform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::driver::Driver;
use crate::page::TodoPage;
use crate::registry::{Filter, Variant};
use crate::result::{TodoError, TodoResult};

/// Three-item fixture used by the functional scenarios
pub const TODOS: [&str; 3] = ["Buy groceries", "Buy groceries2", "JGVJG"];

/// Input with surrounding and inner spaces
pub const SPACED_TEXT: &str = "   hello world   a  ";

/// Placeholder shown in the new-item input
pub const PLACEHOLDER: &str = "What needs to be done?";

/// Scenario grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Core list behaviour
    Functional,
    /// Unusual but valid input
    EdgeInput,
    /// Input the page must reject
    Negative,
}

impl Category {
    /// Every category
    pub const ALL: [Self; 3] = [Self::Functional, Self::EdgeInput, Self::Negative];

    /// Key used on the command line
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::EdgeInput => "edge-input",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = TodoError;

    fn from_str(s: &str) -> TodoResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TodoError::config(format!("unknown category '{s}'")))
    }
}

/// What a scenario does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Fixture items render with their exact texts
    AddedTexts,
    /// Rendered item count equals the fixture length
    ItemCount,
    /// Footer count wording matches the fixture length
    RemainingCountText,
    /// Completing one item shows only it under the Completed filter
    CompleteOne,
    /// Completing several items shows them under the Completed filter
    CompleteMany,
    /// Clear completed leaves the active items in order
    ClearCompleted,
    /// The All filter shows everything with the right completion classes
    AllFilter,
    /// The Active filter hides completed items
    ActiveFilter,
    /// The Completed filter keeps the original relative order
    CompletedFilterOrder,
    /// Heading is visible and reads "todos"
    Title,
    /// Footer filter links and clear-completed are visible and labelled
    FooterControls,
    /// New-item input is visible, editable and has its placeholder
    InputField,
    /// A long string renders without truncation
    LongInput(usize),
    /// An emoji sequence renders unchanged
    EmojiInput,
    /// Leading and trailing spaces are trimmed
    TrimmedInput,
    /// Enter on an empty input adds nothing
    BlankSubmission,
    /// Whitespace-only input adds nothing
    WhitespaceOnly,
    /// Deleting through the hover-revealed control removes one item
    DeleteItem,
    /// A new browser session starts from an empty list even after an
    /// earlier session of the same variant added items
    NewSessionStartsEmpty,
    /// The count tracks completions
    RemainingAfterToggle,
    /// Mark-all completes every item
    ToggleAll,
}

/// One independent test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Stable identifier, e.g. `TC04`
    pub id: String,
    /// Human-readable name
    pub name: &'static str,
    /// Variant it runs against
    pub variant: Variant,
    /// Grouping
    pub category: Category,
    /// Behaviour under test
    pub check: Check,
}

impl Scenario {
    /// Whether `filter` matches the id or name (case-insensitive substring)
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_ascii_lowercase();
        self.id.to_ascii_lowercase().contains(&filter)
            || self.name.to_ascii_lowercase().contains(&filter)
    }

    /// Whether the scenario expects an earlier, separate session to have
    /// been seeded with [`Scenario::seed_prior_session`]
    #[must_use]
    pub const fn needs_prior_session(&self) -> bool {
        matches!(self.check, Check::NewSessionStartsEmpty)
    }

    /// Leave state behind in a session other than the one `run` gets.
    /// No-op for scenarios that do not need a prior session.
    pub async fn seed_prior_session<D: Driver>(&self, page: &mut TodoPage<D>) -> TodoResult<()> {
        self.ensure_variant(page)?;
        if self.needs_prior_session() {
            with_fixture(page).await?;
            page.expect(page.todo_items()).to_have_count(TODOS.len()).await?;
        }
        Ok(())
    }

    /// Run against `page`, which must be bound to this scenario's variant
    pub async fn run<D: Driver>(&self, page: &mut TodoPage<D>) -> TodoResult<()> {
        self.ensure_variant(page)?;
        run_check(self.check, page).await
    }

    fn ensure_variant<D: Driver>(&self, page: &TodoPage<D>) -> TodoResult<()> {
        if page.variant() == self.variant {
            Ok(())
        } else {
            Err(TodoError::config(format!(
                "{} targets {} but the page is bound to {}",
                self.id,
                self.variant,
                page.variant()
            )))
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}] {}", self.id, self.variant, self.category, self.name)
    }
}

struct Entry {
    name: &'static str,
    category: Category,
    check: Check,
}

const fn entry(name: &'static str, category: Category, check: Check) -> Entry {
    Entry {
        name,
        category,
        check,
    }
}

fn core_entries(variant: Variant) -> Vec<Entry> {
    let long_len = match variant {
        Variant::Classic => 2000,
        Variant::TypescriptReact => 200,
    };
    vec![
        entry("Add todos and validate exact texts", Category::Functional, Check::AddedTexts),
        entry("Validate the count of list items", Category::Functional, Check::ItemCount),
        entry(
            "Validate text in the bottom-left matches list length",
            Category::Functional,
            Check::RemainingCountText,
        ),
        entry(
            "Mark one item as completed and validate it is crossed out in Completed filter",
            Category::Functional,
            Check::CompleteOne,
        ),
        entry(
            "Mark multiple items as completed and validate they are crossed out in Completed filter",
            Category::Functional,
            Check::CompleteMany,
        ),
        entry(
            "Click Clear Completed and validate only active items remain",
            Category::Functional,
            Check::ClearCompleted,
        ),
        entry(
            "All filter shows all todos regardless of status",
            Category::Functional,
            Check::AllFilter,
        ),
        entry(
            "Active filter only shows uncompleted todos",
            Category::Functional,
            Check::ActiveFilter,
        ),
        entry(
            "Completed filter only shows marked complete todos",
            Category::Functional,
            Check::CompletedFilterOrder,
        ),
        entry("Validate title \"todos\" is visible and correct", Category::Functional, Check::Title),
        entry(
            "Validate footer filters and Clear completed are visible and correctly labeled",
            Category::Functional,
            Check::FooterControls,
        ),
        entry("Validate input field and placeholder text", Category::Functional, Check::InputField),
        entry("Add a long input string", Category::EdgeInput, Check::LongInput(long_len)),
        entry(
            "Add input with emojis and verify proper rendering",
            Category::EdgeInput,
            Check::EmojiInput,
        ),
        entry(
            "Input with leading/trailing spaces is trimmed",
            Category::EdgeInput,
            Check::TrimmedInput,
        ),
        entry("Submitting an empty input adds nothing", Category::Negative, Check::BlankSubmission),
    ]
}

fn extra_entries(variant: Variant) -> Vec<Entry> {
    let mut entries = vec![
        entry("Whitespace-only input adds nothing", Category::Negative, Check::WhitespaceOnly),
        entry("Delete an item via its hover control", Category::Functional, Check::DeleteItem),
        entry(
            "A new session starts from an empty list",
            Category::Functional,
            Check::NewSessionStartsEmpty,
        ),
        entry(
            "Remaining count tracks completed items",
            Category::Functional,
            Check::RemainingAfterToggle,
        ),
    ];
    if variant.selectors().toggle_all.is_some() {
        entries.push(entry("Mark all items as completed", Category::Functional, Check::ToggleAll));
    }
    entries
}

/// Every scenario for every variant
#[must_use]
pub fn catalog() -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    let mut next_id = 1;
    let mut push = |variant: Variant, entries: Vec<Entry>, scenarios: &mut Vec<Scenario>| {
        for e in entries {
            scenarios.push(Scenario {
                id: format!("TC{next_id:02}"),
                name: e.name,
                variant,
                category: e.category,
                check: e.check,
            });
            next_id += 1;
        }
    };

    // Historical numbering: typescript-react first, then classic, then additions;
    // later additions are appended so existing ids stay stable
    push(
        Variant::TypescriptReact,
        core_entries(Variant::TypescriptReact),
        &mut scenarios,
    );
    push(Variant::Classic, core_entries(Variant::Classic), &mut scenarios);
    push(
        Variant::TypescriptReact,
        extra_entries(Variant::TypescriptReact),
        &mut scenarios,
    );
    push(Variant::Classic, extra_entries(Variant::Classic), &mut scenarios);
    push(
        Variant::TypescriptReact,
        vec![entry(
            "Add a 2000-character input string",
            Category::EdgeInput,
            Check::LongInput(2000),
        )],
        &mut scenarios,
    );
    scenarios
}

/// Scenarios for one variant
#[must_use]
pub fn for_variant(variant: Variant) -> Vec<Scenario> {
    catalog()
        .into_iter()
        .filter(|s| s.variant == variant)
        .collect()
}

/// Scenario by id (case-insensitive)
#[must_use]
pub fn find(id: &str) -> Option<Scenario> {
    catalog().into_iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

// =============================================================================
// Checks
// =============================================================================

fn mismatch(what: String, expected: impl fmt::Debug, actual: impl fmt::Debug) -> TodoError {
    TodoError::AssertionFailed {
        locator: what,
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    }
}

async fn with_fixture<D: Driver>(page: &mut TodoPage<D>) -> TodoResult<()> {
    page.navigate().await?;
    page.add_items(&TODOS).await
}

async fn toggle_all_of<D: Driver>(page: &mut TodoPage<D>, indices: &[usize]) -> TodoResult<()> {
    for &i in indices {
        page.toggle_item(i).await?;
    }
    Ok(())
}

/// Expect exactly `texts`, in order, each with the given completion class
async fn expect_items<D: Driver>(
    page: &TodoPage<D>,
    texts: &[&str],
    completed: Option<bool>,
) -> TodoResult<()> {
    let items = page.todo_items();
    page.expect(items.clone()).to_have_count(texts.len()).await?;
    for (i, text) in texts.iter().enumerate() {
        let item = page.expect(items.nth(i));
        item.to_have_text(text).await?;
        match completed {
            Some(true) => item.to_have_class("completed").await?,
            Some(false) => item.not_to_have_class("completed").await?,
            None => {}
        }
    }
    Ok(())
}

async fn expect_empty<D: Driver>(page: &TodoPage<D>) -> TodoResult<()> {
    page.expect(page.todo_items()).to_have_count(0).await?;
    page.expect(page.footer()).to_have_count(0).await
}

async fn single_item<D: Driver>(page: &mut TodoPage<D>, text: &str, shown: &str) -> TodoResult<()> {
    page.navigate().await?;
    page.add_item(text).await?;
    expect_items(page, &[shown], None).await
}

async fn run_check<D: Driver>(check: Check, page: &mut TodoPage<D>) -> TodoResult<()> {
    let variant = page.variant();
    match check {
        Check::AddedTexts => {
            with_fixture(page).await?;
            expect_items(page, &TODOS, None).await
        }
        Check::ItemCount => {
            with_fixture(page).await?;
            let items = page.todo_items();
            let actual = page.driver().count(&items).await?;
            if actual == TODOS.len() {
                Ok(())
            } else {
                Err(mismatch(items.to_string(), TODOS.len(), actual))
            }
        }
        Check::RemainingCountText => {
            with_fixture(page).await?;
            page.expect(page.todo_count())
                .to_have_text(&variant.remaining_text(TODOS.len()))
                .await
        }
        Check::CompleteOne => {
            with_fixture(page).await?;
            page.toggle_item(1).await?;
            page.select_filter(Filter::Completed).await?;
            expect_items(page, &[TODOS[1]], Some(true)).await
        }
        Check::CompleteMany => {
            with_fixture(page).await?;
            toggle_all_of(page, &[0, 2]).await?;
            page.select_filter(Filter::Completed).await?;
            expect_items(page, &["Buy groceries", "JGVJG"], Some(true)).await
        }
        Check::ClearCompleted => {
            with_fixture(page).await?;
            toggle_all_of(page, &[0, 2]).await?;
            page.clear_completed().await?;
            expect_items(page, &[TODOS[1]], None).await
        }
        Check::AllFilter => {
            let completed = [1];
            with_fixture(page).await?;
            toggle_all_of(page, &completed).await?;
            page.select_filter(Filter::All).await?;
            let items = page.todo_items();
            page.expect(items.clone()).to_have_count(TODOS.len()).await?;
            for i in 0..TODOS.len() {
                let item = page.expect(items.nth(i));
                if completed.contains(&i) {
                    item.to_have_class("completed").await?;
                } else {
                    item.not_to_have_class("completed").await?;
                }
            }
            Ok(())
        }
        Check::ActiveFilter => {
            with_fixture(page).await?;
            toggle_all_of(page, &[0, 2]).await?;
            page.select_filter(Filter::Active).await?;
            expect_items(page, &[TODOS[1]], Some(false)).await
        }
        Check::CompletedFilterOrder => {
            let completed = [0, 2];
            with_fixture(page).await?;
            toggle_all_of(page, &completed).await?;
            page.select_filter(Filter::Completed).await?;
            let expected: Vec<&str> = completed.iter().map(|&i| TODOS[i]).collect();
            expect_items(page, &expected, Some(true)).await
        }
        Check::Title => {
            with_fixture(page).await?;
            let title = page.expect(page.title());
            title.to_be_visible().await?;
            title.to_have_text("todos").await
        }
        Check::FooterControls => {
            with_fixture(page).await?;
            for filter in Filter::ALL {
                let link = page.expect(page.filter_by_label(filter));
                link.to_be_visible().await?;
                link.to_have_text(filter.label()).await?;
            }
            // typescript-react only renders the control once something is completed
            if variant == Variant::TypescriptReact {
                let toggle = page
                    .todo_items()
                    .has_text(TODOS[1])
                    .locator(variant.selectors().toggle_checkbox);
                page.check(&toggle).await?;
            }
            let clear = page.expect(page.clear_completed_button());
            clear.to_be_visible().await?;
            clear.to_have_text("Clear completed").await
        }
        Check::InputField => {
            page.navigate().await?;
            let input = page.expect(page.new_todo_input());
            input.to_be_visible().await?;
            input.to_be_editable().await?;
            input.to_have_attribute("placeholder", PLACEHOLDER).await
        }
        Check::LongInput(len) => {
            let text = "a".repeat(len);
            single_item(page, &text, &text).await
        }
        Check::EmojiInput => {
            let text = "🙂".repeat(50);
            single_item(page, &text, &text).await
        }
        Check::TrimmedInput => single_item(page, SPACED_TEXT, SPACED_TEXT.trim()).await,
        Check::BlankSubmission => {
            page.navigate().await?;
            page.submit_empty().await?;
            expect_empty(page).await
        }
        Check::WhitespaceOnly => {
            page.navigate().await?;
            page.add_item("     ").await?;
            expect_empty(page).await
        }
        Check::DeleteItem => {
            with_fixture(page).await?;
            page.delete_item(1).await?;
            expect_items(page, &[TODOS[0], TODOS[2]], None).await?;
            page.expect(page.todo_count())
                .to_have_text(&variant.remaining_text(2))
                .await
        }
        Check::NewSessionStartsEmpty => {
            page.navigate().await?;
            expect_empty(page).await
        }
        Check::RemainingAfterToggle => {
            with_fixture(page).await?;
            page.toggle_item(0).await?;
            page.expect(page.todo_count())
                .to_have_text(&variant.remaining_text(TODOS.len() - 1))
                .await
        }
        Check::ToggleAll => {
            with_fixture(page).await?;
            page.toggle_all().await?;
            expect_items(page, &TODOS, Some(true)).await?;
            page.expect(page.todo_count())
                .to_have_text(&variant.remaining_text(0))
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod catalog_tests {
        use super::*;

        #[test]
        fn test_original_numbering() {
            let all = catalog();
            let tc01 = &all[0];
            assert_eq!(tc01.id, "TC01");
            assert_eq!(tc01.variant, Variant::TypescriptReact);
            let tc17 = find("tc17").unwrap();
            assert_eq!(tc17.variant, Variant::Classic);
            assert_eq!(tc17.check, Check::AddedTexts);
            assert_eq!(find("TC16").unwrap().check, Check::BlankSubmission);
            assert_eq!(find("TC32").unwrap().check, Check::BlankSubmission);
        }

        #[test]
        fn test_ids_unique() {
            let all = catalog();
            let ids: HashSet<_> = all.iter().map(|s| s.id.clone()).collect();
            assert_eq!(ids.len(), all.len());
        }

        #[test]
        fn test_long_input_lengths_per_variant() {
            assert_eq!(find("TC13").unwrap().check, Check::LongInput(200));
            assert_eq!(find("TC29").unwrap().check, Check::LongInput(2000));
        }

        #[test]
        fn test_every_variant_has_a_2000_char_input() {
            for variant in Variant::ALL {
                let longest = for_variant(variant)
                    .iter()
                    .filter_map(|s| match s.check {
                        Check::LongInput(n) => Some(n),
                        _ => None,
                    })
                    .max();
                assert_eq!(longest, Some(2000), "{variant}");
            }
            assert_eq!(find("TC42").unwrap().check, Check::LongInput(2000));
            assert_eq!(find("TC42").unwrap().variant, Variant::TypescriptReact);
        }

        #[test]
        fn test_only_isolation_check_needs_prior_session() {
            let needing: Vec<String> = catalog()
                .into_iter()
                .filter(Scenario::needs_prior_session)
                .map(|s| s.id)
                .collect();
            assert_eq!(needing, vec!["TC35", "TC39"]);
        }

        #[test]
        fn test_toggle_all_only_where_supported() {
            assert!(for_variant(Variant::Classic)
                .iter()
                .any(|s| s.check == Check::ToggleAll));
            assert!(!for_variant(Variant::TypescriptReact)
                .iter()
                .any(|s| s.check == Check::ToggleAll));
        }

        #[test]
        fn test_blank_and_whitespace_are_separate() {
            for variant in Variant::ALL {
                let checks: Vec<Check> = for_variant(variant).iter().map(|s| s.check).collect();
                assert!(checks.contains(&Check::BlankSubmission));
                assert!(checks.contains(&Check::WhitespaceOnly));
            }
        }

        #[test]
        fn test_matches() {
            let s = find("TC04").unwrap();
            assert!(s.matches("tc04"));
            assert!(s.matches("completed filter"));
            assert!(!s.matches("emoji"));
        }

        #[test]
        fn test_category_parse() {
            assert_eq!("edge-input".parse::<Category>().unwrap(), Category::EdgeInput);
            assert!("smoke".parse::<Category>().unwrap_err().is_config());
        }
    }
}
