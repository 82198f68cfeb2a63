//! Date arithmetic and render-loop primitives for the anniversary page.
//!
//! The pure computations (duration breakdown, calendar age, next birthday
//! occurrence) live apart from the scheduling side effect: a [`Ticker`]
//! recomputes a widget's frame once per second from the current wall clock
//! and hands it to a [`Surface`]. Nothing is carried between ticks, so clock
//! changes and suspensions self-correct on the next tick.

pub mod age;
pub mod anchor;
pub mod breakdown;
pub mod ticker;
pub mod widget;

pub use age::AgeBreakdown;
pub use anchor::{AnchorError, TimeAnchor};
pub use breakdown::DurationBreakdown;
pub use ticker::{Surface, Ticker};
pub use widget::{CountdownWidget, ElapsedWidget, Widget, WidgetFrame};
