//! Stream selection and version computation over lists of versions

pub mod filter;
pub mod promotion;

pub use filter::{apply_filters, highest, highest_on_stream, sort_descending, Filter};
pub use promotion::{
    increment_kind_between, increment_release, increment_release_from_stream, promote_prerelease,
};
