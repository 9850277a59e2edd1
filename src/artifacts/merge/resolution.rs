//! Three-way reconciliation
//!
//! Every file is classified by comparing its fingerprint in the split point,
//! the current head and the given head. A missing file compares equal to
//! another missing file.
//!
//! | split vs cur | split vs given | given vs cur | outcome                 |
//! |--------------|----------------|--------------|-------------------------|
//! | equal        | different      | -            | take given's version    |
//! | equal        | given lacks it | -            | remove                  |
//! | different    | different      | different    | conflict                |
//! | otherwise    |                |              | keep the current state  |

use crate::artifacts::merge::{CONFLICT_HEAD_MARKER, CONFLICT_SEPARATOR, CONFLICT_TAIL_MARKER};
use crate::artifacts::objects::commit::Projection;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Overwrite the working file with the given head's version and stage it
    TakeGiven { name: String, oid: ObjectId },
    /// Stage the file for removal
    Remove { name: String },
    /// Both sides changed the file differently
    Conflict {
        name: String,
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

#[derive(Debug, Default)]
pub struct MergePlan {
    actions: Vec<MergeAction>,
}

impl MergePlan {
    pub fn new(split: &Projection, current: &Projection, given: &Projection) -> Self {
        let mut actions = Vec::new();

        for (name, given_oid) in given {
            let split_oid = split.get(name);
            if split_oid == current.get(name) && split_oid != Some(given_oid) {
                actions.push(MergeAction::TakeGiven {
                    name: name.clone(),
                    oid: given_oid.clone(),
                });
            }
        }

        for (name, split_oid) in split {
            if current.get(name) == Some(split_oid) && !given.contains_key(name) {
                actions.push(MergeAction::Remove { name: name.clone() });
            }
        }

        let names = given.keys().chain(current.keys()).collect::<BTreeSet<_>>();
        for name in names {
            let (split_oid, current_oid, given_oid) =
                (split.get(name), current.get(name), given.get(name));

            if split_oid != current_oid && split_oid != given_oid && given_oid != current_oid {
                actions.push(MergeAction::Conflict {
                    name: name.clone(),
                    current: current_oid.cloned(),
                    given: given_oid.cloned(),
                });
            }
        }

        MergePlan { actions }
    }

    pub fn actions(&self) -> &[MergeAction] {
        &self.actions
    }

    pub fn has_conflicts(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, MergeAction::Conflict { .. }))
    }
}

/// Whether an untracked working file would be clobbered by the merge
///
/// A file is in the way when the given head changed it since the split point.
pub fn untracked_in_the_way<'n>(
    split: &Projection,
    given: &Projection,
    mut untracked: impl Iterator<Item = &'n String>,
) -> bool {
    untracked.any(|name| split.get(name) != given.get(name))
}

/// Working file content recording both sides of a conflict
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Vec<u8> {
    let mut content = Vec::new();

    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(current.unwrap_or_default());
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given.unwrap_or_default());
    content.extend_from_slice(CONFLICT_TAIL_MARKER.as_bytes());

    content
}
