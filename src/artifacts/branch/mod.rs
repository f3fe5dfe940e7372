pub mod branch_name;

/// Names rejected by git's ref-format rules: leading dots, `..`, `/.`, leading
/// or trailing slashes, a `.lock` suffix, `@{`, control characters and the
/// glob/revision metacharacters.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Prefix of branch refs relative to the metadata directory
pub const HEADS_PREFIX: &str = "refs/heads/";
