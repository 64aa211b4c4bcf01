//! YAML frontmatter handling
//!
//! Requirement files are markdown documents that open with a `---` fenced
//! YAML block. Parsing goes through `serde_yaml`; write-back is line based so
//! the rest of the file (comments, key order, body) is left untouched.

/// Location of the frontmatter block inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// Index of the first YAML line (just after the opening fence)
    pub start_line: usize,
    /// Index of the closing fence line
    pub end_line: usize,
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Find the frontmatter block; `None` when the document has none or it is unterminated
pub fn locate(content: &str) -> Option<FrontmatterSpan> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    if !is_fence(lines.next()?) {
        return None;
    }

    lines
        .position(is_fence)
        .map(|offset| FrontmatterSpan {
            start_line: 1,
            end_line: offset + 1,
        })
}

/// The raw YAML between the fences
pub fn extract(content: &str) -> Option<String> {
    let span = locate(content)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    Some(
        content
            .lines()
            .skip(span.start_line)
            .take(span.end_line - span.start_line)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Set top-level `key: value` pairs in the frontmatter.
///
/// Existing keys are replaced in place, missing keys are appended before the
/// closing fence. Returns `None` when the document has no frontmatter.
pub fn set_fields(content: &str, fields: &[(&str, String)]) -> Option<String> {
    let span = locate(content)?;
    let bom = content.starts_with('\u{feff}');
    let body = content.strip_prefix('\u{feff}').unwrap_or(content);
    let newline = if body.contains("\r\n") { "\r\n" } else { "\n" };

    let mut lines: Vec<String> = body.lines().map(str::to_string).collect();
    let mut end_line = span.end_line;

    for (key, value) in fields {
        let prefix = format!("{}:", key);
        let rendered = format!("{}: {}", key, value);
        let existing = (span.start_line..end_line).find(|&i| lines[i].starts_with(&prefix));

        match existing {
            Some(i) => lines[i] = rendered,
            None => {
                lines.insert(end_line, rendered);
                end_line += 1;
            }
        }
    }

    let mut out = String::with_capacity(content.len() + 64);
    if bom {
        out.push('\u{feff}');
    }
    out.push_str(&lines.join(newline));
    if body.ends_with('\n') {
        out.push_str(newline);
    }
    Some(out)
}
