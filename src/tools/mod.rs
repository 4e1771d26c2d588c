//! The tools module provides helper functions for hfmn.
//!
//! The tools are:
//! - cli: Command line options for the hfmn binary.
//! - freq_count: Frequency count of the input symbols.
//!
pub mod cli;
pub mod freq_count;
