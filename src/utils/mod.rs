//! Shared utility functions.
//!
//! String handling and terminal output helpers used across the
//! application.
//!
//! # Modules
//!
//! - [`string_utils`] - string cleaning for request payloads
//! - [`display_terminal`] - terminal output formatting
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::clean_optional_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let phone = clean_optional_string(raw_phone);
//!
//! print_boxed_title("System Initialized");
//! ```

pub mod string_utils;
pub mod display_terminal;
