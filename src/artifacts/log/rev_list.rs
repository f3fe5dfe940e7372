use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::HashSet;

/// A commit together with the id it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub oid: ObjectId,
    pub commit: Commit,
}

/// Depth-first walk over the parent links of a starting commit.
///
/// Commits are yielded in pre-order, first parent before the others, and each
/// at most once: a commit reachable through several merge paths is visited on
/// the first path only. A commit that cannot be read is yielded as an error and
/// ends the walk.
pub struct RevList<'r> {
    database: &'r Database,
    pending: Vec<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(database: &'r Database, start: ObjectId) -> Self {
        RevList {
            database,
            pending: vec![start],
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let oid = self.pending.pop()?;
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            return match self.database.parse_object_as_commit(&oid) {
                Ok(commit) => {
                    // reversed so the first parent is popped next
                    self.pending.extend(
                        commit
                            .parents()
                            .iter()
                            .rev()
                            .filter(|parent| !self.visited.contains(*parent))
                            .cloned(),
                    );
                    Some(Ok(CommitRecord { oid, commit }))
                }
                Err(error) => {
                    self.pending.clear();
                    Some(Err(error))
                }
            };
        }
    }
}
