//! Console rendering of test set summaries.

use std::fmt;

use autobone_optim::Termination;

use crate::TestSetSummary;

impl fmt::Display for TestSetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: trials={}", self.name, self.trials)?;
        writeln!(f, "Average iterations: {:.2}", self.average_iterations)?;
        writeln!(
            f,
            "Average final accuracy: {:.4}%",
            self.average_final_accuracy * 100.0
        )?;
        writeln!(
            f,
            "Average improvement: {:.4}%",
            self.average_improvement * 100.0
        )?;
        writeln!(f, "Improved trials: {}/{}", self.improved_trials, self.trials)?;
        write!(f, "Terminations:")?;
        for t in Termination::ALL {
            write!(f, " {}={}", t.as_str(), self.terminations.get(t))?;
        }
        Ok(())
    }
}

/// All summaries, separated by blank lines.
pub fn format_report(summaries: &[TestSetSummary]) -> String {
    summaries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
