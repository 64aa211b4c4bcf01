//! Markdown summary document

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use prioritizer::{PriorityTier, PrioritySummary};

/// Render the tier counts and tier-grouped tables as markdown
pub fn render_markdown(summary: &PrioritySummary, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Requirement Priorities");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "_Generated {} from {} requirements ({} blocked by unmet dependencies)._",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.total,
        summary.blocked
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "| Tier | Count |");
    let _ = writeln!(out, "|------|------:|");
    for tier in PriorityTier::ALL {
        let _ = writeln!(out, "| {} | {} |", tier, summary.count(tier));
    }

    for tier in PriorityTier::ALL {
        let group = summary.in_tier(tier);
        if group.is_empty() {
            continue;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "## {} ({})", tier, group.len());
        let _ = writeln!(out);
        let _ = writeln!(out, "| ID | Title | Score | Indicators |");
        let _ = writeln!(out, "|----|-------|------:|------------|");
        for assignment in group {
            let _ = writeln!(
                out,
                "| {} | {} | {:.1} | {} |",
                assignment.id,
                escape_cell(assignment.display_name()),
                assignment.score,
                assignment.indicators
            );
        }
    }

    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use prioritizer::{PriorityEngine, RequirementRecord};

    #[test]
    fn test_render_groups_by_tier() {
        let run = PriorityEngine::default().run(vec![
            RequirementRecord::new("REQ-1")
                .with_title("Login | SSO")
                .with_foundational(true),
            RequirementRecord::new("REQ-2").with_dependencies(["REQ-1"]),
            RequirementRecord::new("REQ-3").with_status("Completed"),
        ]);
        let generated_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();
        let doc = render_markdown(&run.summary(), generated_at);

        assert!(doc.starts_with("# Requirement Priorities\n"));
        assert!(doc.contains("_Generated 2026-01-02 03:04 UTC from 3 requirements (1 blocked by unmet dependencies)._"));
        assert!(doc.contains("| Medium | 1 |"));
        assert!(doc.contains("| Low | 2 |"));
        assert!(doc.contains("| Critical | 0 |"));
        assert!(doc.contains("## Medium (1)"));
        assert!(doc.contains("| REQ-1 | Login \\| SSO | 6.0 | 🏗 ↳1 |"));
        assert!(!doc.contains("## Critical"));

        let low = doc.find("## Low (2)").unwrap();
        let req2 = doc.find("| REQ-2 |").unwrap();
        let req3 = doc.find("| REQ-3 |").unwrap();
        assert!(low < req2 && req2 < req3);
    }
}
