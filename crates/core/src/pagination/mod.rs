//! Offset pagination for list endpoints without totals or cursors
//!
//! The API takes `offset` and `limit` and returns up to `limit + 1` records.
//! Receiving the extra record is the only evidence that another page exists,
//! so each page keeps `limit` records and the next request starts exactly
//! `limit` further on.
//!
//! - [`PageCursor`]: explicit state machine (offset, done)
//! - [`collect_pages`]: sequential async driver with cancellation

mod cursor;
mod driver;

pub use cursor::{PageCursor, PageRequest};
pub use driver::collect_pages;
