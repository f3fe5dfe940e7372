use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidBranchName("branch name cannot be empty".into()));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|e| Error::InvalidBranchName(e.to_string()))?;

        if re.is_match(&name) {
            Err(Error::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    /// Parse the target of a symbolic ref such as `refs/heads/feature/x`.
    pub fn try_parse_ref_path(ref_path: &str) -> Result<Self> {
        let name = ref_path
            .strip_prefix(HEADS_PREFIX)
            .ok_or_else(|| Error::ReferenceNotFound(ref_path.to_string()))?;

        Self::try_parse(name)
    }

    /// `refs/heads/<name>`
    pub fn to_ref_path(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BranchName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}
