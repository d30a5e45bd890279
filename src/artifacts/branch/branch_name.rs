use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::GoitError;
use anyhow::Context;

/// Prefix of branch refs under the metadata directory
pub const REF_PREFIX: &str = "refs/heads/";

/// Validated branch name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || re.is_match(&name) {
            Err(GoitError::InvalidName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Path of the branch ref file relative to the metadata directory
    pub fn as_ref_path(&self) -> String {
        format!("{}{}", REF_PREFIX, self.0)
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
