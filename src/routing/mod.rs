//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (priority-ordered lookup)
//!     → pattern.rs (segment matching)
//!     → Return: RouteMatch or RouteNotFound
//!
//! Route Compilation (at startup):
//!     ModuleConfig.router.routes
//!     → Parse patterns
//!     → Check the fallback rule sits below every other rule
//!     → Sort by priority
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First match wins (ordered by priority, ties keep registration order)
//! - Explicit RouteNotFound rather than silent default

pub mod error;
pub mod pattern;
pub mod rule;
pub mod table;

pub use error::RoutingError;
pub use pattern::{split_path, SegmentPattern};
pub use rule::{RouteDefaults, RouteRule, RouteType};
pub use table::{RouteMatch, RouteTable};
