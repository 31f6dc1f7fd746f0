//! Source ingestion for plain and literate program files.
//!
//! Any file ending in `.md` is literate: only fenced code blocks tagged
//! `urm` are program text and everything else is prose. Other files are
//! read whole. Extracted lines keep their line numbers in the original file
//! so diagnostics point at what the author actually wrote.

use std::path::Path;

/// Info string that marks a fenced block as program text.
pub const LITERATE_TAG: &str = "urm";

/// One line of program text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line text without its terminator.
    pub text: String,
    /// 1-based line number in the original file.
    pub original_line: usize,
}

/// Program text extracted from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContent {
    /// Extracted lines in document order.
    pub lines: Vec<SourceLine>,
    /// Path the content was read from.
    pub file_path: String,
}

impl SourceContent {
    /// Joins the extracted lines into one parseable text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Maps a 1-based line of [`Self::text`] back to the file.
    ///
    /// Lines past the end map to the line after the last extracted one.
    #[must_use]
    pub fn original_line(&self, line: usize) -> usize {
        match self.lines.get(line.saturating_sub(1)) {
            Some(source) => source.original_line,
            None => self.lines.last().map_or(line, |last| last.original_line + 1),
        }
    }
}

/// Extracts program text from `content` read from `file_path`.
#[must_use]
pub fn extract_source(file_path: &Path, content: &str) -> SourceContent {
    let lines = if is_literate_file(file_path) {
        extract_literate_source(content)
    } else {
        extract_plain_source(content)
    };

    SourceContent {
        lines,
        file_path: file_path.to_string_lossy().into_owned(),
    }
}

/// Returns true if the file should be read as Markdown.
#[must_use]
pub fn is_literate_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn extract_plain_source(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| SourceLine {
            text: line.to_string(),
            original_line: idx + 1,
        })
        .collect()
}

fn extract_literate_source(content: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    // Length of the fence that opened the current program block.
    let mut open_fence: Option<usize> = None;

    for (idx, line) in content.lines().enumerate() {
        let fence = fence_length(line);
        match (open_fence, fence) {
            (Some(open), Some(len)) if len >= open => open_fence = None,
            (None, Some(len)) => {
                let info = &line.trim_start()[len..];
                if info.split_whitespace().next() == Some(LITERATE_TAG) {
                    open_fence = Some(len);
                }
            }
            (Some(_), _) => lines.push(SourceLine {
                text: line.to_string(),
                original_line: idx + 1,
            }),
            (None, None) => {}
        }
    }

    lines
}

/// Number of backticks opening `line`, if it is a fence.
fn fence_length(line: &str) -> Option<usize> {
    let count = line.trim_start().chars().take_while(|&c| c == '`').count();
    (count >= 3).then_some(count)
}
