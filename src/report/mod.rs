//! Report renderers for expression check results.
//!
//! - [`terminal`]: colored, tabular output; respects `--quiet`.
//!
//! JSON output is produced directly from the [`spdx_checkr::models`] types.

pub mod terminal;
