//! Unified diff rendering
//!
//! ```text
//! diff --git a/<f> b/<f>
//! --- a/<f>
//! +++ b/<f>
//! @@ -L1[,N1] +L2[,N2] @@
//! -deleted line
//! +inserted line
//! ```
//!
//! A missing side is labelled `/dev/null`. Line numbers are 1-based unless the
//! hunk side is empty, and the count is omitted when it is exactly one.

use crate::artifacts::diff::NULL_PATH;
use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, Hunk, MyersDiff};
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    a_label: String,
    b_label: String,
    a_lines: Vec<String>,
    b_lines: Vec<String>,
}

impl FileDiff {
    /// Compare two versions of `name`; `None` stands for a missing file
    pub fn new(name: &str, a: Option<&[u8]>, b: Option<&[u8]>) -> Self {
        let label = |prefix: &str, side: Option<&[u8]>| match side {
            Some(_) => format!("{prefix}/{name}"),
            None => NULL_PATH.to_string(),
        };

        FileDiff {
            a_label: label("a", a),
            b_label: label("b", b),
            a_lines: Self::split_lines(a),
            b_lines: Self::split_lines(b),
        }
    }

    fn split_lines(content: Option<&[u8]>) -> Vec<String> {
        content
            .map(|content| {
                String::from_utf8_lossy(content)
                    .lines()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn hunks(&self) -> Vec<Hunk> {
        MyersDiff::new(&self.a_lines, &self.b_lines).hunks()
    }

    /// Write the diff of this file, if there is one
    ///
    /// Returns whether anything was written.
    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<bool> {
        let hunks = self.hunks();
        if hunks.is_empty() {
            return Ok(false);
        }

        writeln!(
            writer,
            "{}",
            format!("diff --git {} {}", self.a_label, self.b_label).bold()
        )?;
        writeln!(writer, "{}", format!("--- {}", self.a_label).bold())?;
        writeln!(writer, "{}", format!("+++ {}", self.b_label).bold())?;

        for hunk in &hunks {
            writeln!(writer, "{}", hunk_header(hunk).cyan())?;

            for line in &self.a_lines[hunk.a_start..hunk.a_start + hunk.a_len] {
                writeln!(writer, "{}", format!("-{line}").red())?;
            }
            for line in &self.b_lines[hunk.b_start..hunk.b_start + hunk.b_len] {
                writeln!(writer, "{}", format!("+{line}").green())?;
            }
        }

        Ok(true)
    }
}

/// `@@ -L1[,N1] +L2[,N2] @@`
pub fn hunk_header(hunk: &Hunk) -> String {
    let range = |start: usize, len: usize| {
        let start = if len == 0 { start } else { start + 1 };
        if len == 1 {
            start.to_string()
        } else {
            format!("{start},{len}")
        }
    };

    format!(
        "@@ -{} +{} @@",
        range(hunk.a_start, hunk.a_len),
        range(hunk.b_start, hunk.b_len)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(diff: &FileDiff) -> String {
        colored::control::set_override(false);
        let mut output = Vec::new();
        diff.render(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::single_line_change(Hunk::new(2, 1, 2, 1), "@@ -3 +3 @@")]
    #[case::multi_line_change(Hunk::new(0, 2, 0, 3), "@@ -1,2 +1,3 @@")]
    #[case::pure_insertion(Hunk::new(4, 0, 3, 1), "@@ -4,0 +4 @@")]
    #[case::pure_deletion(Hunk::new(0, 1, 0, 0), "@@ -1 +0,0 @@")]
    fn header_counts_and_offsets(#[case] hunk: Hunk, #[case] expected: &str) {
        assert_eq!(hunk_header(&hunk), expected);
    }

    #[test]
    fn modified_file_renders_every_hunk() {
        let diff = FileDiff::new(
            "foo.txt",
            Some(b"line1\nline2\nline3\n".as_slice()),
            Some(b"line2\nline3 changed\n".as_slice()),
        );

        assert_eq!(
            render(&diff),
            "diff --git a/foo.txt b/foo.txt\n\
             --- a/foo.txt\n\
             +++ b/foo.txt\n\
             @@ -1 +0,0 @@\n\
             -line1\n\
             @@ -3 +2 @@\n\
             -line3\n\
             +line3 changed\n"
        );
    }

    #[test]
    fn deleted_file_targets_dev_null() {
        let diff = FileDiff::new("foo.txt", Some(b"A\n".as_slice()), None);

        assert_eq!(
            render(&diff),
            "diff --git a/foo.txt /dev/null\n\
             --- a/foo.txt\n\
             +++ /dev/null\n\
             @@ -1 +0,0 @@\n\
             -A\n"
        );
    }

    #[test]
    fn identical_contents_render_nothing() {
        let diff = FileDiff::new("foo.txt", Some(b"A\n".as_slice()), Some(b"A".as_slice()));

        assert_eq!(render(&diff), "");
    }
}
