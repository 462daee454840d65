// Common utilities shared by the derive macros
//
// This module contains:
// - parse_utils: attribute argument parsing

mod parse_utils;

pub use parse_utils::*;
