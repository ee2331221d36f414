//! Workflows run by the `smgr` binary

pub mod orchestration;

pub use orchestration::{
    run_fetch, run_filter, run_increment_stream, run_increment_version, run_promote,
    FilterOptions, HistoryOptions,
};
