//! Requirement file discovery and parsing

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use prioritizer::RequirementRecord;

use crate::frontmatter;

/// A requirement record and the file it was read from
#[derive(Debug, Clone)]
pub struct LoadedRequirement {
    pub path: PathBuf,
    pub record: RequirementRecord,
}

/// Outcome of scanning a requirements directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub requirements: Vec<LoadedRequirement>,
    /// Markdown files without frontmatter or without an id
    pub skipped: Vec<PathBuf>,
    /// Files whose frontmatter failed to parse, with the parse error
    pub invalid: Vec<(PathBuf, String)>,
}

impl LoadReport {
    pub fn records(&self) -> Vec<RequirementRecord> {
        self.requirements.iter().map(|r| r.record.clone()).collect()
    }

    pub fn path_of(&self, id: &str) -> Option<&Path> {
        self.requirements
            .iter()
            .find(|r| r.record.id == id)
            .map(|r| r.path.as_path())
    }
}

/// Load every requirement under `root`, sorted by path
pub fn load_requirements(root: &Path) -> Result<LoadReport> {
    let mut files = collect_md_files(root)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    files.sort();

    let mut report = LoadReport::default();
    for path in files {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match parse_requirement(&content) {
            Ok(Some(record)) => report.requirements.push(LoadedRequirement { path, record }),
            Ok(None) => {
                tracing::debug!(path = %path.display(), "No requirement frontmatter, skipping");
                report.skipped.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid frontmatter, skipping");
                report.invalid.push((path, e.to_string()));
            }
        }
    }

    tracing::info!(
        loaded = report.requirements.len(),
        skipped = report.skipped.len(),
        invalid = report.invalid.len(),
        "Loaded requirements from {}",
        root.display()
    );
    Ok(report)
}

/// Parse one document. `Ok(None)` when it carries no frontmatter or no id.
pub fn parse_requirement(content: &str) -> Result<Option<RequirementRecord>> {
    let Some(yaml) = frontmatter::extract(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let record: RequirementRecord = serde_yaml::from_str(&yaml)?;
    if record.id.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(record))
}

/// Markdown files under `root`. Hidden entries are skipped and symlinks are
/// not followed.
fn collect_md_files(root: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        let path = entry.into_path();
        if is_file && path.extension().and_then(|s| s.to_str()) == Some("md") {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_full_frontmatter() {
        let doc = r#"---
id: REQ-010
title: Audit trail
dependencies:
  - REQ-001
  - REQ-002
status: Approved
foundational: true
safetyRelated: true
complianceStandards: [21-CFR-Part-11]
riskLevel: High
priorityScore: 9.3
---
# Audit trail
"#;
        let record = parse_requirement(doc).unwrap().unwrap();
        assert_eq!(record.id, "REQ-010");
        assert_eq!(record.display_name(), "Audit trail");
        assert_eq!(record.dependencies, vec!["REQ-001", "REQ-002"]);
        assert!(record.foundational);
        assert!(record.has_compliance_standard("21-CFR-Part-11"));
        assert_eq!(record.priority_score, Some(9.3));
    }

    #[test]
    fn test_parse_without_id_is_skipped() {
        assert!(parse_requirement("---\nstatus: Draft\n---\n").unwrap().is_none());
        assert!(parse_requirement("---\n---\nbody").unwrap().is_none());
        assert!(parse_requirement("# No frontmatter\n").unwrap().is_none());
    }

    #[test]
    fn test_parse_sentinel_dependency() {
        let record = parse_requirement("---\nid: A\ndependencies: ['']\n---\n")
            .unwrap()
            .unwrap();
        assert_eq!(record.dependency_ids().count(), 0);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(parse_requirement("---\nid: [unclosed\n---\n").is_err());
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b/REQ-2.md", "---\nid: REQ-2\ndependencies: REQ-1\n---\n");
        write(dir.path(), "a/REQ-1.md", "---\nid: REQ-1\nstatus: Implemented\n---\n");
        write(dir.path(), "README.md", "# Requirements\n");
        write(dir.path(), "broken.md", "---\nid: [oops\n---\n");
        write(dir.path(), ".hidden/REQ-9.md", "---\nid: REQ-9\n---\n");
        write(dir.path(), "notes.txt", "---\nid: REQ-8\n---\n");

        let report = load_requirements(dir.path()).unwrap();
        let ids: Vec<&str> = report
            .requirements
            .iter()
            .map(|r| r.record.id.as_str())
            .collect();

        assert_eq!(ids, vec!["REQ-1", "REQ-2"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(
            report.path_of("REQ-2"),
            Some(dir.path().join("b/REQ-2.md").as_path())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_parent_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "reqs/REQ-1.md", "---\nid: REQ-1\n---\n");
        std::os::unix::fs::symlink("..", dir.path().join("reqs/parent")).unwrap();

        let report = load_requirements(&dir.path().join("reqs")).unwrap();
        let ids: Vec<&str> = report
            .requirements
            .iter()
            .map(|r| r.record.id.as_str())
            .collect();

        assert_eq!(ids, vec!["REQ-1"]);
        assert!(report.skipped.is_empty());
    }
}
