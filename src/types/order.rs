//! Order-side vocabulary shared by the blotter, the middleware and
//! simulated orders.
//!
//! The middleware only ever inspects two statuses (`Executable` and, by
//! exclusion, everything else); the full set exists so the blotter can tell
//! live orders from finished ones.

use serde::{Deserialize, Serialize};

/// Order identifier, unique within a blotter
pub type OrderId = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Back or Lay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Back - bet that the selection wins; matched at the order price or higher
    #[default]
    Back,
    /// Lay - bet that the selection loses; matched at the order price or lower
    Lay,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Back => Side::Lay,
            Side::Lay => Side::Back,
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, not yet accepted
    #[default]
    Pending,
    /// Resting on the book; eligible for simulated matching
    Executable,
    /// Fully matched, cancelled or lapsed
    ExecutionComplete,
    /// Expired before acceptance
    Expired,
    /// Rejected by a trading control
    Violation,
    /// Cancel in flight
    Cancelling,
    /// Update in flight
    Updating,
    /// Replace in flight
    Replacing,
}

impl OrderStatus {
    /// Finished orders never leave this state
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::ExecutionComplete | OrderStatus::Expired | OrderStatus::Violation
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
