use crate::domain::Release;
use crate::error::{Result, SmgrError};
use std::fmt;
use std::str::FromStr;

/// Release increment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Increment {
    Major,
    Minor,
    #[default]
    Patch,
    None,
}

impl Increment {
    fn rank(self) -> u8 {
        match self {
            Increment::None => 0,
            Increment::Patch => 1,
            Increment::Minor => 2,
            Increment::Major => 3,
        }
    }

    /// True when `self` moves a release further than `other` does
    pub fn is_higher_than(self, other: Increment) -> bool {
        self.rank() > other.rank()
    }

    /// The increment that separates `from` and `to`
    ///
    /// Returns `Increment::None` when `to` is not ahead of `from`.
    pub fn between(from: &Release, to: &Release) -> Increment {
        if from.major < to.major {
            Increment::Major
        } else if from.major == to.major && from.minor < to.minor {
            Increment::Minor
        } else if from.major == to.major && from.minor == to.minor && from.patch < to.patch {
            Increment::Patch
        } else {
            Increment::None
        }
    }
}

impl FromStr for Increment {
    type Err = SmgrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Increment::Major),
            "minor" => Ok(Increment::Minor),
            "patch" => Ok(Increment::Patch),
            "none" => Ok(Increment::None),
            _ => Err(SmgrError::InvalidIncrement(s.to_string())),
        }
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Increment::Major => write!(f, "major"),
            Increment::Minor => write!(f, "minor"),
            Increment::Patch => write!(f, "patch"),
            Increment::None => write!(f, "none"),
        }
    }
}
