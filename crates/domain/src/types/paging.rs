//! Page window size for list operations

use std::num::NonZeroUsize;

use crate::constants::DEFAULT_LIST_LIMIT;
use crate::errors::HyperStoreError;

/// Number of records the client keeps from each listing page.
///
/// The server returns up to `limit + 1` records per request; the extra record
/// only signals that another page exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(NonZeroUsize);

impl ListLimit {
    /// Build a limit, rejecting zero and negative values.
    pub fn new(limit: i64) -> Result<Self, HyperStoreError> {
        usize::try_from(limit)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| {
                HyperStoreError::Config(format!("list limit must be positive, got {limit}"))
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_LIMIT).unwrap_or(Self(NonZeroUsize::MIN))
    }
}

impl TryFrom<i64> for ListLimit {
    type Error = HyperStoreError;

    fn try_from(limit: i64) -> Result<Self, Self::Error> {
        Self::new(limit)
    }
}

impl std::fmt::Display for ListLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
