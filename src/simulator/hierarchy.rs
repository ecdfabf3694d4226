//! Parent/child tree derived from PPID links
//!
//! [`build_tree`] turns the flat process table into a [`ProcessNode`] tree for
//! the tree pane. The table is never modified.
//!
//! # Root Selection
//!
//! The record with PPID 0 is the root. Failing that, a single record whose PPID
//! matches no other record is used instead. Any other record whose parent is
//! missing is logged and left out of the tree.

use crate::process::{Pid, ProcessRecord, ProcessStatus, NO_PARENT};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

/// A process and its descendants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessNode {
    pub pid: Pid,
    pub ppid: Pid,
    pub status: ProcessStatus,
    /// Sibling order follows the process table but is not guaranteed
    pub children: Vec<ProcessNode>,
}

impl ProcessNode {
    /// All PIDs in this subtree, pre-order
    pub fn pids(&self) -> Vec<Pid> {
        let mut out = Vec::new();
        self.collect_pids(&mut out);
        out
    }

    fn collect_pids(&self, out: &mut Vec<Pid>) {
        out.push(self.pid);
        for child in &self.children {
            child.collect_pids(out);
        }
    }

    /// Number of nodes in this subtree
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ProcessNode::len).sum::<usize>()
    }

    /// Always false; a node counts itself
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Find a node by PID in this subtree
    pub fn find(&self, pid: Pid) -> Option<&ProcessNode> {
        if self.pid == pid {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pid))
    }
}

/// Build the process tree. Returns `None` for an empty table or when no root
/// can be determined.
pub fn build_tree(records: &[ProcessRecord]) -> Option<ProcessNode> {
    if records.is_empty() {
        return None;
    }

    let known: FxHashSet<Pid> = records.iter().map(|r| r.pid).collect();
    let by_pid: FxHashMap<Pid, &ProcessRecord> = records.iter().map(|r| (r.pid, r)).collect();

    let root = match records.iter().find(|r| r.ppid == NO_PARENT) {
        Some(root) => root,
        None => {
            let mut unparented = records.iter().filter(|r| !known.contains(&r.ppid));
            match (unparented.next(), unparented.next()) {
                (Some(only), None) => only,
                _ => {
                    warn!("no root process found among {} records", records.len());
                    return None;
                }
            }
        }
    };

    // ppid -> child pids, in table order
    let mut children: FxHashMap<Pid, Vec<Pid>> = FxHashMap::default();
    for record in records {
        if record.pid == root.pid {
            continue;
        }
        if known.contains(&record.ppid) {
            children.entry(record.ppid).or_default().push(record.pid);
        } else {
            warn!(
                pid = record.pid,
                ppid = record.ppid,
                "parent PID {} not found for PID {}",
                record.ppid,
                record.pid
            );
        }
    }

    let mut visited = FxHashSet::default();
    Some(link(root, &by_pid, &children, &mut visited))
}

fn link(
    record: &ProcessRecord,
    by_pid: &FxHashMap<Pid, &ProcessRecord>,
    children: &FxHashMap<Pid, Vec<Pid>>,
    visited: &mut FxHashSet<Pid>,
) -> ProcessNode {
    visited.insert(record.pid);
    let kids = children
        .get(&record.pid)
        .map(|pids| {
            pids.iter()
                .filter(|pid| !visited.contains(*pid))
                .filter_map(|pid| by_pid.get(pid).copied())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    ProcessNode {
        pid: record.pid,
        ppid: record.ppid,
        status: record.status,
        children: kids
            .into_iter()
            .map(|child| link(child, by_pid, children, visited))
            .collect(),
    }
}
