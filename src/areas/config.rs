//! Repository configuration file
//!
//! An INI-like file at `<meta>/config`:
//!
//! ```text
//! [core]
//! 	bare = false
//! 	repositoryformatversion = 0
//!
//! [remote "origin"]
//! 	fetch = +refs/heads/*:refs/remotes/origin/*
//! 	url = git@example.com:me/repo.git
//! ```
//!
//! Sections and keys are written back sorted, so the file is stable across
//! rewrites. Remotes are stored as `remote "<name>"` sections.

use crate::errors::{Error, IoResultExt, Result};
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

pub const CORE_SECTION: &str = "core";

type Section = BTreeMap<String, String>;

/// A configured remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: Box<Path>,
    sections: BTreeMap<String, Section>,
}

impl Config {
    /// Default configuration written by `init`.
    pub fn with_defaults(path: Box<Path>) -> Self {
        let core = [
            ("repositoryformatversion", "0"),
            ("filemode", "true"),
            ("bare", "false"),
            ("logallrefupdates", "true"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        Config {
            path,
            sections: BTreeMap::from([(CORE_SECTION.to_string(), core)]),
        }
    }

    /// Read the config file. A missing file is an empty configuration.
    pub fn load(path: Box<Path>) -> Result<Self> {
        let content = if path.exists() {
            std::fs::read_to_string(&path).with_path(&path)?
        } else {
            String::new()
        };

        Ok(Config {
            sections: Self::parse(&content)?,
            path,
        })
    }

    fn parse(content: &str) -> Result<BTreeMap<String, Section>> {
        let mut sections = BTreeMap::<String, Section>::new();
        let mut current_section: Option<String> = None;

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let section = header.trim().to_string();
                sections.entry(section.clone()).or_default();
                current_section = Some(section);
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::ConfigCorrupt {
                    line: number + 1,
                    reason: format!("expected 'key = value', found '{line}'"),
                });
            };

            let Some(section) = &current_section else {
                return Err(Error::ConfigCorrupt {
                    line: number + 1,
                    reason: format!("key-value pair outside section: '{line}'"),
                });
            };

            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(sections)
    }

    /// Split a dotted name into section and key: `core.bare` or
    /// `remote.origin.url` (the middle part becomes a quoted subsection).
    pub fn split_key(dotted: &str) -> Result<(String, String)> {
        let invalid = || Error::InvalidConfigKey(dotted.to_string());

        let (section, rest) = dotted.split_once('.').ok_or_else(invalid)?;
        let (section, key) = match rest.rsplit_once('.') {
            Some((subsection, key)) => (format!("{section} \"{subsection}\""), key),
            None => (section.to_string(), rest),
        };

        if section.is_empty() || key.is_empty() {
            return Err(invalid());
        }

        Ok((section, key.to_string()))
    }

    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
            .ok_or_else(|| Error::ConfigKeyNotFound {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn unset_section(&mut self, section: &str) -> bool {
        self.sections.remove(section).is_some()
    }

    /// Every value as `section.key=value`, subsections rendered dotted.
    pub fn list(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|(section, entries)| {
                let prefix = match section.split_once(' ') {
                    Some((name, subsection)) => format!("{name}.{}", subsection.trim_matches('"')),
                    None => section.clone(),
                };
                entries
                    .iter()
                    .map(move |(key, value)| format!("{prefix}.{key}={value}"))
            })
            .collect()
    }

    pub fn remotes(&self) -> Vec<Remote> {
        self.sections
            .iter()
            .filter_map(|(section, entries)| {
                let name = section.strip_prefix("remote ")?.trim_matches('"');
                Some(Remote {
                    name: name.to_string(),
                    url: entries.get("url").cloned().unwrap_or_default(),
                })
            })
            .collect()
    }

    pub fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        let section = Self::remote_section(name);
        if self.has_section(&section) {
            return Err(Error::RemoteAlreadyExists(name.to_string()));
        }

        self.set(&section, "url", url);
        self.set(&section, "fetch", &format!("+refs/heads/*:refs/remotes/{name}/*"));

        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> Result<()> {
        if !self.unset_section(&Self::remote_section(name)) {
            return Err(Error::RemoteNotFound(name.to_string()));
        }

        Ok(())
    }

    pub fn remote_url(&self, name: &str) -> Result<&str> {
        self.get(&Self::remote_section(name), "url")
            .map_err(|_| Error::RemoteNotFound(name.to_string()))
    }

    pub fn set_remote_url(&mut self, name: &str, url: &str) -> Result<()> {
        let section = Self::remote_section(name);
        if !self.has_section(&section) {
            return Err(Error::RemoteNotFound(name.to_string()));
        }

        self.set(&section, "url", url);
        Ok(())
    }

    fn remote_section(name: &str) -> String {
        format!("remote \"{name}\"")
    }

    fn render(&self) -> String {
        let mut content = String::new();
        for (section, entries) in &self.sections {
            content.push_str(&format!("[{section}]\n"));
            for (key, value) in entries {
                content.push_str(&format!("\t{key} = {value}\n"));
            }
            content.push('\n');
        }
        content
    }

    /// Rewrite the whole file under an exclusive lock.
    pub fn write_updates(&self) -> Result<()> {
        let mut config_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_path(&self.path)?;
        let mut lock = file_guard::lock(&mut config_file, Lock::Exclusive, 0, 1)
            .with_path(&self.path)?;
        lock.deref_mut()
            .write_all(self.render().as_bytes())
            .with_path(&self.path)?;

        Ok(())
    }
}
