//! Overlay resolution for compliance scan reports.
//!
//! A scan evaluation often carries the same logical control several times:
//! once in a baseline profile and again in each overlay profile wrapped
//! around it. This crate rebuilds the `extends` relationships between those
//! profiles and controls so callers can ask which occurrence is
//! authoritative ([`ControlRef::root`]), whether an overlay layer changes
//! anything ([`ControlRef::is_redundant`]) and what the full inherited
//! source of a control is ([`ControlRef::full_code`]).
//!
//! ```text
//! Evaluation ──> contextualize_evaluation ──> ContextualizedEvaluation
//!                  1. wrap profiles                 └─ ContextGraph
//!                  2. link declared parents              ├─ ProfileRef
//!                  3. wrap controls (flat order)         └─ ControlRef
//!                  4. link controls                           root / is_redundant / full_code
//!
//! Profile ────> contextualize_profile ─────> ContextualizedProfile (no links)
//! ```

pub mod contextualize;
pub mod error;
pub mod graph;
mod linker;
pub mod model;
pub mod summary;
mod verify;
mod views;

pub use contextualize::{
    contextualize_evaluation, contextualize_profile, ContextualizedEvaluation,
    ContextualizedProfile,
};
pub use error::{GraphError, GraphResult, NodeKind};
pub use graph::{ContextGraph, ControlId, ControlRef, ProfileId, ProfileRef};
pub use model::{Control, ControlResult, Evaluation, Profile, ResultStatus};
pub use summary::{ControlKey, ControlSummary, GraphStats, GraphSummary, ProfileSummary};
pub use views::profile_banner;
