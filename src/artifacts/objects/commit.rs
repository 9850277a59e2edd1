//! Commit object
//!
//! Commits are immutable snapshot nodes of the history graph. Each one records:
//! - The branch it was created on
//! - Its first parent (absent only for the root commit)
//! - A second parent for merge commits
//! - A timestamp and a message
//! - The projection: every tracked file name mapped to its blob fingerprint
//!
//! Parents are stored as fingerprints only; resolving one always goes through
//! the commit index.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! branch <name>
//! parent <parent-sha>
//! merge <second-parent-sha>
//! date <timestamp>
//! file <blob-sha> <name>
//!
//! <commit message>
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Read};

/// Display format of commit timestamps, e.g. `Thu Jan 1 00:00:00 1970 +0000`
pub const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Environment variable overriding the wall clock for new commits
pub const COMMIT_DATE_ENV: &str = "SPRIG_COMMIT_DATE";

/// File name to blob fingerprint mapping of one snapshot
pub type Projection = BTreeMap<String, ObjectId>;

/// Timestamp stamped on the root commit
pub fn root_timestamp() -> String {
    chrono::DateTime::UNIX_EPOCH
        .fixed_offset()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Timestamp for a new non-root commit
///
/// Honors `SPRIG_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`), falling back
/// to the local wall clock.
pub fn current_timestamp() -> anyhow::Result<String> {
    let timestamp = match std::env::var(COMMIT_DATE_ENV) {
        Ok(date_str) => chrono::DateTime::parse_from_rfc2822(&date_str)
            .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
            .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}"))?,
        Err(_) => chrono::Local::now().fixed_offset(),
    };

    Ok(timestamp.format(TIMESTAMP_FORMAT).to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Branch the commit was created on
    branch: BranchName,
    /// First parent, `None` only for the root commit
    parent: Option<ObjectId>,
    /// Second parent of a merge commit
    merge_parent: Option<ObjectId>,
    timestamp: String,
    files: Projection,
    message: String,
}

impl Commit {
    pub fn new(
        branch: BranchName,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        timestamp: String,
        files: Projection,
        message: String,
    ) -> Self {
        Commit {
            branch,
            parent,
            merge_parent,
            timestamp,
            files,
            message,
        }
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Both parent edges, first parent first
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.merge_parent.iter())
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &Projection {
        &self.files
    }

    pub fn file_oid(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Whether any tracked file has exactly this blob fingerprint
    pub fn tracks_oid(&self, oid: &ObjectId) -> bool {
        self.files.values().any(|tracked| tracked == oid)
    }

    fn render(&self) -> anyhow::Result<String> {
        let mut lines = vec![format!("branch {}", self.branch)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge {merge_parent}"));
        }
        lines.push(format!("date {}", self.timestamp));

        for (name, oid) in &self.files {
            if name.contains('\n') {
                anyhow::bail!("file name {name:?} cannot be recorded in a commit");
            }
            lines.push(format!("file {oid} {name}"));
        }

        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(lines.join("\n"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self.render()?;
        Ok(self.object_type().frame(content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: content is not UTF-8")?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = headers.lines().peekable();

        let branch = lines
            .next()
            .and_then(|line| line.strip_prefix("branch "))
            .context("Invalid commit object: missing branch line")?;
        let branch = BranchName::try_parse(branch.to_string())?;

        let parent = match lines.next_if(|line| line.starts_with("parent ")) {
            Some(line) => Some(ObjectId::try_parse(line["parent ".len()..].to_string())?),
            None => None,
        };
        let merge_parent = match lines.next_if(|line| line.starts_with("merge ")) {
            Some(line) => Some(ObjectId::try_parse(line["merge ".len()..].to_string())?),
            None => None,
        };

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("date "))
            .context("Invalid commit object: missing date line")?
            .to_string();

        let mut files = Projection::new();
        for line in lines {
            let (oid, name) = line
                .strip_prefix("file ")
                .and_then(|entry| entry.split_once(' '))
                .with_context(|| format!("Invalid commit object: unexpected line {line:?}"))?;
            files.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(Commit::new(
            branch,
            parent,
            merge_parent,
            timestamp,
            files,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
