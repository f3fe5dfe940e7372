use crate::areas::config::Config;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{IoResultExt, Result};
use std::fs;

/// What `init` found at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Reinitialized,
}

impl Repository {
    pub fn init(&self) -> Result<InitOutcome> {
        if self.is_initialized() {
            self.emit(format!(
                "Reinitialized existing repository in {}",
                self.meta_path().display()
            ))?;
            return Ok(InitOutcome::Reinitialized);
        }

        let initial_branch = BranchName::try_parse(self.config().initial_branch())?;

        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).with_path(objects_path)?;

        let heads_path = self.refs().heads_path();
        fs::create_dir_all(&heads_path).with_path(&heads_path)?;

        // the branch file itself only appears with the first commit
        self.refs().set_head_symbolic(&initial_branch)?;

        Config::with_defaults(self.config_path()).write_updates()?;

        tracing::info!(path = %self.path().display(), branch = %initial_branch, "repository initialized");
        self.emit(format!(
            "Initialized empty repository in {} on branch {initial_branch}",
            self.meta_path().display()
        ))?;

        Ok(InitOutcome::Created)
    }
}
