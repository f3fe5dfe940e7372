use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusKind {
    Unmodified,
    /// Working tree differs from what is staged (or committed, when unstaged)
    Modified,
    /// Staged content matches the working tree but not the last commit
    Staged,
    Untracked,
}

impl StatusKind {
    /// Classify one path from its commit, index and working-tree digests.
    pub fn classify(
        committed: Option<&ObjectId>,
        staged: Option<&ObjectId>,
        working: &ObjectId,
    ) -> Self {
        match (staged, committed) {
            (Some(staged), Some(committed)) => {
                if staged == working && staged == committed {
                    StatusKind::Unmodified
                } else if staged == working {
                    StatusKind::Staged
                } else {
                    StatusKind::Modified
                }
            }
            (Some(staged), None) if staged == working => StatusKind::Staged,
            (Some(_), None) => StatusKind::Modified,
            (None, Some(committed)) if committed != working => StatusKind::Modified,
            (None, Some(_)) => StatusKind::Unmodified,
            (None, None) => StatusKind::Untracked,
        }
    }

    /// Short-format prefix; empty for unmodified files.
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Unmodified => "",
            StatusKind::Modified => "M",
            StatusKind::Staged => "A",
            StatusKind::Untracked => "??",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileStatus {
    pub path: String,
    pub kind: StatusKind,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.kind.label(), self.path)
    }
}
