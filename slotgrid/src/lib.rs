//! A headless grid virtualization engine built on slot recycling.
//!
//! For bar/scroll bindings, tweens and anchoring, see the `slotgrid-adapter` crate.
//!
//! A fixed-size grid of `item_count` uniform cells is shown through a small pool of reusable
//! slots. Only the cells intersecting the viewport (plus one overscan line) are bound; as
//! content scrolls, slots leaving one edge are rebound to the indexes entering the other edge.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ScrollHost`]: viewport size, content position, and a content-size sink
//! - a [`SlotFactory`] producing [`SlotHandle`]s (the reusable views)
//! - `on_show`/`on_hide` callbacks binding data to a slot
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bridge;
mod emitter;
mod error;
mod geometry;
mod grid;
mod options;
mod pool;
mod state;
mod types;
mod window;

#[doc(hidden)]
pub mod math;


pub use bridge::{ScrollHost, ScrollOffsetBridge, ScrollOverride, ScrollRequest};
pub use emitter::{SubscriptionId, Subscribers};
pub use error::LayoutError;
pub use geometry::{FIT_EPSILON, GridGeometry, GridLayout, VisibleCells};
pub use grid::{SlotCallback, VirtualGrid};
pub use options::{DEFAULT_MIN_MOVE_SQ, GridOptions};
pub use pool::{Slot, SlotFactory, SlotHandle, SlotPool};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, Constraint, Padding, ScrollAxis, Vec2};
pub use window::{Recycle, VisibleWindow, WindowBounds, WindowEntry};
