use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::{CommitRecord, RevList};
use crate::errors::{Error, Result};
use colored::Colorize;

impl Repository {
    /// Commits reachable from HEAD, printed in medium format.
    pub fn log(&self) -> Result<Vec<CommitRecord>> {
        let head = self.refs().resolve_head()?.ok_or(Error::NoCommitsYet)?;

        let records = RevList::new(self.database(), head).collect::<Result<Vec<_>>>()?;
        for record in &records {
            self.show_commit_medium(record)?;
        }

        Ok(records)
    }

    fn show_commit_medium(&self, record: &CommitRecord) -> Result<()> {
        let author = record.commit.author();

        self.emit(format!("commit {}", record.oid.as_ref().yellow()))?;
        if record.commit.parents().len() > 1 {
            let parents = record
                .commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            self.emit(format!("Merge: {parents}"))?;
        }
        self.emit(format!("Author: {}", author.display_name()))?;
        self.emit(format!("Date:   {}", author.readable_timestamp()))?;
        self.emit("")?;
        for message_line in record.commit.message().lines() {
            self.emit(format!("    {message_line}"))?;
        }
        self.emit("")
    }
}
