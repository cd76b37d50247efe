use slotgrid::{ScrollHost, SlotHandle, VirtualGrid};

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - chat/timeline "prepend" (load older items above) without content jumping
/// - any insert/remove where the viewport should stay on the same item
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    /// First item of the top visible line.
    pub index: usize,
    /// How far the viewport has scrolled past the start of that item's line.
    pub offset_in_line: f32,
}

/// Captures an anchor for the first visible item.
///
/// Returns `None` if nothing is visible.
pub fn capture_first_visible_anchor<H: SlotHandle, S: ScrollHost>(
    grid: &VirtualGrid<H, S>,
) -> Option<ScrollAnchor> {
    let first = grid.window().first()?;
    let geometry = grid.geometry();
    let line = geometry.line_of(first.data_index, grid.layout());
    let offset_in_line = grid.scroll_distance() - geometry.line_start(line);
    Some(ScrollAnchor {
        index: first.data_index,
        offset_in_line,
    })
}

/// Applies a previously captured anchor by adjusting the scroll distance.
///
/// The adapter must provide an `old_to_new` index mapping for the *current* data set.
///
/// Returns `true` when the anchor was successfully applied.
pub fn apply_anchor<H: SlotHandle, S: ScrollHost>(
    grid: &mut VirtualGrid<H, S>,
    anchor: &ScrollAnchor,
    mut old_to_new: impl FnMut(usize) -> Option<usize>,
) -> bool {
    let Some(index) = old_to_new(anchor.index) else {
        return false;
    };
    if index >= grid.item_count() {
        return false;
    }
    let geometry = grid.geometry();
    let line = geometry.line_of(index, grid.layout());
    let target = geometry.line_start(line) + anchor.offset_in_line;
    grid.scroll_to_distance(target.clamp(0.0, grid.max_scroll_distance()));
    true
}
