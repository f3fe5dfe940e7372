use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Create a branch at the current HEAD commit.
    pub fn create_branch(&self, name: &str) -> Result<ObjectId> {
        let branch = BranchName::try_parse(name)?;

        self.refs().create_branch(&branch)
    }

    pub fn delete_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        let branch = BranchName::try_parse(name)?;
        let oid = self.refs().delete_branch(&branch)?;

        match &oid {
            Some(oid) => self.emit(format!("Deleted branch {branch} (was {}).", oid.to_short_oid()))?,
            None => self.emit(format!("Deleted branch {branch}."))?,
        }

        Ok(oid)
    }

    /// Print every branch, marking the checked-out one with `*`.
    ///
    /// In verbose mode each line also carries the tip's short id and subject.
    pub fn list_branches(&self, verbose: bool) -> Result<Vec<BranchName>> {
        let head = self.refs().read_head()?;
        let branches = self.refs().list_branches()?;

        if let Head::Detached(oid) = &head {
            self.emit(format!("* (HEAD detached at {})", oid.to_short_oid()))?;
        }

        for branch in &branches {
            let prefix = match &head {
                Head::Symbolic(current) if current == branch => "* ",
                _ => "  ",
            };

            if verbose {
                self.emit(format!("{prefix}{branch}{}", self.branch_tip_summary(branch)))?;
            } else {
                self.emit(format!("{prefix}{branch}"))?;
            }
        }

        Ok(branches)
    }

    fn branch_tip_summary(&self, branch: &BranchName) -> String {
        let Ok(oid) = self.refs().resolve_branch(branch) else {
            return String::new();
        };

        match self.database().parse_object_as_commit(&oid) {
            Ok(commit) => format!(" {} {}", oid.to_short_oid(), commit.short_message()),
            Err(_) => format!(" {}", oid.to_short_oid()),
        }
    }
}
