//! Small shared helpers for dates and decimal presentation.

pub mod decimal_utils;
pub mod time_utils;
