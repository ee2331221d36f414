//! Domain logic - the SemVer value types, independent of any tag source

pub mod identifier;
pub mod increment;
pub mod pattern;
pub mod release;
pub mod tag;
pub mod version;

pub use identifier::Identifier;
pub use increment::Increment;
pub use pattern::{ReleasePattern, Segment, VersionPattern, WILDCARD};
pub use release::Release;
pub use tag::{TagFormat, VERSION_PLACEHOLDER};
pub use version::{parse_version_list, Version};
