//! Common error infrastructure for crawl-core.
//!
//! Domain-specific errors (e.g., [`crate::scheduler::TurnError`]) are defined
//! in their respective modules alongside the operations they guard. This
//! module only carries the shared severity taxonomy:
//!
//! - **Fatal / Internal**: programmer-contract violations (an empty queue
//!   asked for the next actor, a scheduler desync). These indicate bugs, not
//!   gameplay situations, and callers are expected to stop the turn cycle.
//! - **Recoverable**: data gaps the core resolves defensively (unknown
//!   species kinds, out-of-bounds visibility probes).
//! - Expected gameplay outcomes (a failed spell roll, a buff expiring) are
//!   ordinary control flow and never represented as errors at all.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the core falls back to a defensive default.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency worth investigating.
    Internal,

    /// Fatal error - simulation state corrupted, the turn cycle must stop.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all crawl-core errors.
///
/// Implemented by every error enum in the crate so the owning game loop can
/// decide uniformly whether to terminate the turn cycle or continue.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
