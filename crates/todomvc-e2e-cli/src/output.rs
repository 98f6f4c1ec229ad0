//! Console output

use console::{style, Term};
use todomvc_e2e::{Scenario, ScenarioOutcome, SuiteReport};

/// Writes scenario lists and run results
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a reporter writing listings to stdout and results to stderr
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Green on success, red otherwise. Styling is forced once color is
    /// chosen, since results go to stderr even when it is not a terminal.
    fn paint(&self, text: &str, ok: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let styled = style(text).bold().force_styling(true);
        let styled = if ok { styled.green() } else { styled.red() };
        styled.to_string()
    }

    fn mark(&self, passed: bool) -> String {
        match (self.use_color, passed) {
            (true, true) => self.paint("✓", true),
            (true, false) => self.paint("✗", false),
            (false, true) => "PASS".to_string(),
            (false, false) => "FAIL".to_string(),
        }
    }

    /// One line per scenario
    #[must_use]
    pub fn scenario_line(scenario: &Scenario) -> String {
        format!(
            "{:<5} {:<16} {:<10} {}",
            scenario.id,
            scenario.variant.key(),
            scenario.category.key(),
            scenario.name
        )
    }

    /// Print a scenario listing
    pub fn list(&self, scenarios: &[Scenario]) {
        for scenario in scenarios {
            let _ = self.out.write_line(&Self::scenario_line(scenario));
        }
        if !self.quiet {
            let _ = self.err.write_line(&format!("{} scenarios", scenarios.len()));
        }
    }

    /// Print one outcome; failures print even in quiet mode
    pub fn outcome(&self, outcome: &ScenarioOutcome) {
        if outcome.passed {
            if self.quiet {
                return;
            }
            let _ = self.err.write_line(&format!(
                "{} {} {} ({:.2?})",
                self.mark(true),
                outcome.id, outcome.name, outcome.duration
            ));
        } else {
            let _ = self.err.write_line(&format!(
                "{} {} {}",
                self.mark(false),
                outcome.id,
                outcome.name
            ));
            if let Some(error) = &outcome.error {
                for line in error.lines() {
                    let _ = self.err.write_line(&format!("    {line}"));
                }
            }
        }
    }

    /// Print the closing summary
    pub fn summary(&self, report: &SuiteReport) {
        let line = format!(
            "{} passed, {} failed, {} total in {:.2?}",
            report.passed_count(),
            report.failed_count(),
            report.total(),
            report.duration
        );
        let _ = self.err.write_line("");
        let _ = self.err.write_line(&self.paint(&line, report.all_passed()));
    }
}
