//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <<email>> <timestamp> <timezone>
//! committer <name> <<email>> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! Parsing is keyword driven: unknown header lines are skipped so newer writers
//! can add fields without breaking older readers.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::io::{BufRead, Read};

const AUTHOR_NAME_VARS: [&str; 2] = ["GIT_AUTHOR_NAME", "GIT_COMMITTER_NAME"];
const AUTHOR_EMAIL_VARS: [&str; 2] = ["GIT_AUTHOR_EMAIL", "GIT_COMMITTER_EMAIL"];
const AUTHOR_DATE_VAR: &str = "GIT_AUTHOR_DATE";

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time.
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from the environment.
    ///
    /// Reads `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL`, falling back to the
    /// committer variants, and optionally `GIT_AUTHOR_DATE`.
    pub fn load_from_env() -> Result<Self> {
        let lookup = |vars: &[&str]| {
            vars.iter()
                .filter_map(|var| std::env::var(var).ok())
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let name = lookup(&AUTHOR_NAME_VARS).ok_or(Error::MissingAuthorInfo)?;
        let email = lookup(&AUTHOR_EMAIL_VARS).ok_or(Error::MissingAuthorInfo)?;
        let timestamp = std::env::var(AUTHOR_DATE_VAR).ok().and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }

    /// Parse a `name <email> timestamp timezone` line.
    ///
    /// Lines that do not follow the layout keep whatever could be recovered:
    /// the name alone, or name and email with the epoch as timestamp.
    pub fn parse(line: &str) -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();

        let Some((name, rest)) = line.split_once('<') else {
            return Self::new_with_timestamp(line.trim().to_string(), String::new(), epoch);
        };
        let name = name.trim().to_string();

        let Some((email, rest)) = rest.split_once('>') else {
            return Self::new_with_timestamp(name, String::new(), epoch);
        };
        let email = email.to_string();

        let mut fields = rest.split_whitespace();
        let timestamp = match (fields.next(), fields.next()) {
            (Some(seconds), Some(zone)) => Self::parse_timestamp(seconds, zone),
            _ => None,
        };

        Self::new_with_timestamp(name, email, timestamp.unwrap_or(epoch))
    }

    fn parse_timestamp(seconds: &str, zone: &str) -> Option<DateTime<FixedOffset>> {
        let seconds = seconds.parse::<i64>().ok()?;
        let utc = DateTime::from_timestamp(seconds, 0)?;

        match Self::parse_zone(zone) {
            Some(offset) => Some(utc.with_timezone(&offset)),
            None => Some(utc.fixed_offset()),
        }
    }

    /// `+HHMM` / `-HHMM` into a fixed offset
    fn parse_zone(zone: &str) -> Option<FixedOffset> {
        if zone.len() != 5 || !zone.is_ascii() {
            return None;
        }
        let (sign, digits) = zone.split_at(1);
        let hours = digits[..2].parse::<i32>().ok()?;
        let minutes = digits[2..].parse::<i32>().ok()?;
        let seconds = (hours * 60 + minutes) * 60;

        match sign {
            "+" => FixedOffset::east_opt(seconds),
            "-" => FixedOffset::west_opt(seconds),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> timestamp timezone", as stored in commit headers.
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// e.g. "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Empty for a root commit, several for a merge
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a commit whose committer is the author. The message is trimmed.
    pub fn new(parents: Vec<ObjectId>, tree_oid: ObjectId, author: Author, message: &str) -> Self {
        Commit {
            parents,
            tree_oid,
            committer: author.clone(),
            author,
            message: message.trim().to_string(),
        }
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.author.timestamp()
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        lines.extend(self.parents.iter().map(|parent| format!("parent {parent}")));
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = self.header_lines().join("\n");
        content.push_str("\n\n");
        content.push_str(&self.message);
        content.push('\n');

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|_| Error::InvalidObjectFormat("commit is not valid UTF-8".into()))?;

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        let mut lines = content.split('\n');
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(tree) = line.strip_prefix("tree ") {
                tree_oid = Some(ObjectId::try_parse(tree).map_err(|_| {
                    Error::InvalidObjectFormat(format!("invalid tree line '{line}'"))
                })?);
            } else if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent).map_err(|_| {
                    Error::InvalidObjectFormat(format!("invalid parent line '{line}'"))
                })?);
            } else if let Some(line) = line.strip_prefix("author ") {
                author = Some(Author::parse(line));
            } else if let Some(line) = line.strip_prefix("committer ") {
                committer = Some(Author::parse(line));
            }
        }

        let tree_oid = tree_oid
            .ok_or_else(|| Error::InvalidObjectFormat("commit is missing its tree".into()))?;
        let author = author.unwrap_or_else(|| Author::parse(""));
        let committer = committer.unwrap_or_else(|| author.clone());
        let message = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
