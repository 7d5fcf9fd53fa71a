//! Error types for graph verification.

use thiserror::Error;

/// Result type for graph checks.
pub type GraphResult<T> = Result<T, GraphError>;

/// Structural problems detected by [`ContextGraph::verify`](crate::ContextGraph::verify).
///
/// Controls are reported as `profile/control-id` so the message points at the
/// offending record in the source report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A node lists itself in `extends_from`.
    #[error("{kind} '{node}' extends itself")]
    SelfLink { kind: NodeKind, node: String },

    /// An edge is present in one direction only.
    #[error("{kind} '{from}' extends '{to}' but the reverse edge is missing")]
    MissingMirror {
        kind: NodeKind,
        from: String,
        to: String,
    },

    /// Following `extends_from` from this control comes back to it.
    #[error("control '{control}' is part of an overlay cycle")]
    Cycle { control: String },

    /// A control is not listed exactly once by the profile it claims to belong to.
    #[error("control '{control}' appears {count} times in profile '{profile}'")]
    Ownership {
        profile: String,
        control: String,
        count: usize,
    },
}

impl GraphError {
    /// Returns true for errors that make `root`/`full_code` traversal unsafe.
    pub fn breaks_traversal(&self) -> bool {
        matches!(self, Self::Cycle { .. } | Self::SelfLink { kind: NodeKind::Control, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Profile,
    Control,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile => f.write_str("profile"),
            Self::Control => f.write_str("control"),
        }
    }
}
