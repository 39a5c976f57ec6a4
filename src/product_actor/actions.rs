//! Custom actions for the Product actor.
//!
//! Stock changes go through actions rather than `ProductUpdate` so that the bounds check runs
//! inside the actor against the current value.

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Adds `delta` (negative to remove). Fails, leaving stock unchanged, if the result would
    /// be below zero.
    AdjustStock(i64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// The new stock level.
    AdjustStock(u32),
}
