use crate::errors::{Error, Result};
use regex::Regex;

/// One parsed line of the ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    matcher: Regex,
    negate: bool,
    dir_only: bool,
    root_anchored: bool,
}

impl IgnoreRule {
    /// Parse a trimmed, non-comment line. `Ok(None)` when nothing but flags remain.
    ///
    /// Flags are stripped in a fixed order: a leading `!` negates the rule, a
    /// trailing `/` restricts it to directories, then a leading `/` anchors it to
    /// the repository root.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut pattern = line;

        let negate = pattern.starts_with('!');
        if negate {
            pattern = &pattern[1..];
        }

        let dir_only = pattern.ends_with('/');
        if dir_only {
            pattern = &pattern[..pattern.len() - 1];
        }

        let root_anchored = pattern.starts_with('/');
        if root_anchored {
            pattern = &pattern[1..];
        }

        if pattern.is_empty() {
            return Ok(None);
        }

        Ok(Some(IgnoreRule {
            pattern: pattern.to_string(),
            matcher: compile_glob(pattern)?,
            negate,
            dir_only,
            root_anchored,
        }))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    pub fn is_root_anchored(&self) -> bool {
        self.root_anchored
    }

    /// Test a `/`-separated path relative to the repository root.
    ///
    /// Unanchored rules also match any suffix that starts at a segment boundary,
    /// so `*.log` reaches `deep/dir/app.log`.
    pub fn matches(&self, relative_path: &str) -> bool {
        if self.root_anchored {
            return self.matcher.is_match(relative_path);
        }

        let mut candidate = relative_path;
        loop {
            if self.matcher.is_match(candidate) {
                return true;
            }
            match candidate.split_once('/') {
                Some((_, rest)) => candidate = rest,
                None => return false,
            }
        }
    }
}

/// Translate a shell glob into an anchored regex.
///
/// `*` matches a run of non-`/` characters, `?` a single one, `[...]` a class
/// (negated with a leading `!` or `^`, ranges with `-`) and `\` escapes the next
/// character.
fn compile_glob(pattern: &str) -> Result<Regex> {
    let invalid = |reason: &str| Error::InvalidIgnorePattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut regex = String::from("^(?:");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            '\\' => {
                let escaped = chars.next().ok_or_else(|| invalid("trailing backslash"))?;
                regex.push_str(&regex::escape(&escaped.to_string()));
            }
            '[' => {
                let negated = matches!(chars.peek(), Some('!' | '^'));
                if negated {
                    chars.next();
                }

                let mut class = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    let low = match c {
                        ']' if !class.is_empty() => {
                            closed = true;
                            break;
                        }
                        '\\' => chars.next().ok_or_else(|| invalid("trailing backslash"))?,
                        other => other,
                    };
                    class.push_str(&regex::escape(&low.to_string()));

                    if chars.peek() == Some(&'-') {
                        chars.next();
                        let high = match chars.next() {
                            Some(']') | None => return Err(invalid("unterminated range")),
                            Some('\\') => chars.next().ok_or_else(|| invalid("trailing backslash"))?,
                            Some(other) => other,
                        };
                        if high < low {
                            return Err(invalid("range out of order"));
                        }
                        class.push('-');
                        class.push_str(&regex::escape(&high.to_string()));
                    }
                }

                if !closed {
                    return Err(invalid("unterminated character class"));
                }

                if negated {
                    regex.push_str(&format!("[^/{class}]"));
                } else {
                    regex.push_str(&format!("[{class}]"));
                }
            }
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push_str(")$");

    Regex::new(&regex).map_err(|e| invalid(&e.to_string()))
}
