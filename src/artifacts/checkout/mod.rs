//! Working tree replacement for `checkout <branch>` and `reset`

pub mod migration;
