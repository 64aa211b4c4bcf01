//! Output formatting and terminal rendering

use colored::{ColoredString, Colorize};
use prioritizer::{IssueSeverity, PriorityAssignment, PriorityTier, ValidationIssue};

/// Output handler for terminal display
pub struct OutputHandler {
    pub show_indicators: bool,
}

impl OutputHandler {
    pub fn new(color: bool, show_indicators: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { show_indicators }
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    /// Print a success message
    pub fn print_success(&self, text: &str) {
        println!("{} {}", "✓".bright_green(), text.bright_white());
    }

    /// Print an error message
    pub fn print_error(&self, text: &str) {
        println!("{} {}", "✗".bright_red(), text.bright_red());
    }

    /// Print a warning message
    pub fn print_warning(&self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text.yellow());
    }

    /// Print an info message
    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text);
    }

    /// Print the assignments table
    pub fn print_assignments_table(&self, assignments: &[PriorityAssignment]) {
        println!();
        println!(
            "{}",
            format!("{:<16} {:<40} {:>6} {:<9} {}", "ID", "Title", "Score", "Tier", "Flags")
                .bright_white()
                .bold()
        );
        println!("{}", "─".repeat(90).dimmed());

        for assignment in assignments {
            let title = truncate(assignment.display_name(), 38);
            let flags = if self.show_indicators {
                assignment.indicators.to_string()
            } else {
                String::new()
            };

            println!(
                "{:<16} {:<40} {:>6} {:<9} {}",
                assignment.id.bright_white(),
                title,
                format!("{:.1}", assignment.score).bright_cyan(),
                colored_tier(assignment.tier),
                flags.dimmed()
            );
        }
        println!();
    }

    /// Print a validation finding
    pub fn print_issue(&self, issue: &ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.print_error(&issue.message),
            IssueSeverity::Warning => self.print_warning(&issue.message),
        }
        if let Some(fix) = &issue.suggested_fix {
            println!("    {} {}", "→".dimmed(), fix.dimmed());
        }
    }
}

/// Tier label colored by urgency
pub fn colored_tier(tier: PriorityTier) -> ColoredString {
    let label = format!("{:<9}", tier.as_str());
    match tier {
        PriorityTier::Critical => label.bright_red().bold(),
        PriorityTier::High => label.bright_yellow(),
        PriorityTier::Medium => label.bright_blue(),
        PriorityTier::Low => label.normal(),
        PriorityTier::Deferred => label.dimmed(),
    }
}

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
