//! Split point search
//!
//! The split point of two heads is found in two passes:
//!
//! 1. Collect every ancestor of the given head (the head itself included),
//!    following both parent edges. Each commit is expanded once.
//! 2. Walk the ancestors of the current head breadth-first, expanding both
//!    parent edges in FIFO order, and return the first commit found in the
//!    set from step 1.
//!
//! On histories with several equally low common ancestors (criss-cross
//! merges) the first breadth-first hit wins.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Loads the parent fingerprints of a commit, first parent first
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Split point of `current` and `given`, if their histories meet
    pub fn find_split(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let given_ancestors = self.ancestors(given)?;

        let mut queue = VecDeque::from([current.clone()]);
        let mut expanded = HashSet::new();

        while let Some(oid) = queue.pop_front() {
            if given_ancestors.contains(&oid) {
                tracing::debug!(split = %oid, "found split point");
                return Ok(Some(oid));
            }

            if expanded.insert(oid.clone()) {
                queue.extend((self.parents_loader)(&oid)?);
            }
        }

        Ok(None)
    }

    /// `head` and every commit reachable from it
    fn ancestors(&self, head: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::from([head.clone()]);
        let mut pending = vec![head.clone()];

        while let Some(oid) = pending.pop() {
            for parent in (self.parents_loader)(&oid)? {
                if ancestors.insert(parent.clone()) {
                    pending.push(parent);
                }
            }
        }

        Ok(ancestors)
    }
}
