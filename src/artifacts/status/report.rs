use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::untracked_files;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modification {
    Modified,
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Modified => write!(f, "modified"),
            Modification::Deleted => write!(f, "deleted"),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    staged: Vec<String>,
    removed: Vec<String>,
    modified: BTreeMap<String, Modification>,
    untracked: Vec<String>,
}

impl StatusReport {
    pub fn new(head: &Commit, staging: &Staging, workspace: &Workspace) -> anyhow::Result<Self> {
        let additions = staging.additions();
        let removals = staging.removals();

        let working_oid = |name: &str| -> anyhow::Result<Option<ObjectId>> {
            if !workspace.file_exists(name) {
                return Ok(None);
            }
            Ok(Some(workspace.parse_blob(name)?.object_id()?))
        };

        let mut modified = BTreeMap::new();

        for (name, head_oid) in head.files() {
            if removals.is_staged(name) {
                continue;
            }

            match working_oid(name)? {
                None => {
                    modified.insert(name.clone(), Modification::Deleted);
                }
                Some(oid) if !additions.is_staged(name) && &oid != head_oid => {
                    modified.insert(name.clone(), Modification::Modified);
                }
                _ => {}
            }
        }

        for (name, staged_oid) in additions.entries() {
            match working_oid(name)? {
                None => {
                    modified.insert(name.clone(), Modification::Deleted);
                }
                Some(oid) if &oid != staged_oid => {
                    modified.insert(name.clone(), Modification::Modified);
                }
                _ => {}
            }
        }

        Ok(StatusReport {
            staged: additions.entries().keys().cloned().collect(),
            removed: removals.entries().keys().cloned().collect(),
            modified,
            untracked: untracked_files(head, staging, workspace)?,
        })
    }

    pub fn staged(&self) -> &[String] {
        &self.staged
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    pub fn modified(&self) -> impl Iterator<Item = (&String, &Modification)> {
        self.modified.iter()
    }

    pub fn untracked(&self) -> &[String] {
        &self.untracked
    }
}
