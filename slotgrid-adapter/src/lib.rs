//! Adapter utilities for the `slotgrid` crate.
//!
//! The `slotgrid` crate is UI-agnostic and focuses on the core geometry and slot recycling.
//! This crate provides small, framework-neutral pieces commonly needed around it:
//!
//! - A draggable, steppable proxy scrollbar with press-and-hold repeat
//! - A binding that keeps the bar and the grid in sync
//! - Line snapping for programmatic scrolls
//! - Scroll anchoring (e.g. prepend without visual jumps)
//! - Tween-based smooth scrolling helpers (optional; adapter-driven)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod bar;
mod binding;
mod repeat;
mod snap;
mod tween;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use bar::{
    BarDirection, BarOptions, DEFAULT_BAR_SIZE, DraggableControl, MoveDirection, PointerButton,
    PointerEvent, ScrollProxyBar, quantize,
};
pub use binding::ScrollBinding;
pub use repeat::HoldRepeat;
pub use snap::CellSnap;
pub use tween::{Easing, Tween};
