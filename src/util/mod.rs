//! Utility functions shared by the row mappers and filters.
//!
//! - [`time`] - epoch second formatting and calendar-day boundaries
//! - [`link`] - dashboard deep link construction

pub mod link;
pub mod time;

#[cfg(test)]
pub mod test;
