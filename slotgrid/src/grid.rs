use alloc::boxed::Box;
use core::fmt;

use crate::bridge::{ScrollHost, ScrollOffsetBridge, ScrollOverride, ScrollRequest};
use crate::emitter::{SubscriptionId, Subscribers};
use crate::math;
use crate::pool::{SlotFactory, SlotHandle, SlotPool};
use crate::window::{VisibleWindow, WindowEntry};
use crate::{
    Align, Constraint, FrameState, GridGeometry, GridLayout, GridOptions, LayoutError, Padding,
    ScrollAxis, ScrollState, Vec2, ViewportState, VisibleCells,
};

/// A per-index slot callback: `(data_index, slot_handle)`.
pub type SlotCallback<H> = dyn FnMut(usize, &mut H);

const SHOW_CHANNEL: u32 = 0;
const HIDE_CHANNEL: u32 = 1;

/// A headless grid virtualizer that recycles a small pool of slots.
///
/// The grid owns its slot pool and the visible window. The host (`S`) provides the viewport
/// and content position and receives the content size; slot views (`H`) come from a
/// [`SlotFactory`]. Consumers bind their own content to slots through [`Self::on_show`] and
/// unbind it in [`Self::on_hide`].
///
/// Drive it from your frame loop:
/// - call [`Self::update`] once per frame (or [`Self::on_content_moved`] from a scroll
///   callback),
/// - call the setters when data or layout parameters change,
/// - use [`Self::scroll_to`] / [`Self::set_normalized_position`] for programmatic scrolling.
pub struct VirtualGrid<H, S> {
    options: GridOptions,
    host: S,
    factory: Option<Box<dyn SlotFactory<H>>>,
    pool: SlotPool<H>,
    window: VisibleWindow,
    bridge: ScrollOffsetBridge,
    layout: GridLayout,
    visible: VisibleCells,
    viewport: Vec2,
    layout_error: Option<LayoutError>,
    on_show: Subscribers<SlotCallback<H>>,
    on_hide: Subscribers<SlotCallback<H>>,
}

impl<H, S> fmt::Debug for VirtualGrid<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualGrid")
            .field("options", &self.options)
            .field("layout", &self.layout)
            .field("visible", &self.visible)
            .field("viewport", &self.viewport)
            .field("window", &self.window)
            .field("pool_len", &self.pool.len())
            .field("bridge", &self.bridge)
            .field("layout_error", &self.layout_error)
            .finish_non_exhaustive()
    }
}

impl<H: SlotHandle, S: ScrollHost> VirtualGrid<H, S> {
    /// Creates a grid over `host`.
    ///
    /// The host's current content position becomes the scroll origin. Without a slot factory
    /// the geometry is computed (and the content size written back) but no slot is shown.
    pub fn new(options: GridOptions, host: S) -> Self {
        let viewport = host.viewport_size();
        let origin = host.content_position();
        vdebug!(
            item_count = options.item_count,
            viewport_x = viewport.x,
            viewport_y = viewport.y,
            "VirtualGrid::new"
        );
        let mut g = Self {
            bridge: ScrollOffsetBridge::new(origin, options.min_move_sq),
            options,
            host,
            factory: None,
            pool: SlotPool::new(),
            window: VisibleWindow::new(),
            layout: GridLayout::default(),
            visible: VisibleCells::default(),
            viewport,
            layout_error: None,
            on_show: Subscribers::on_channel(SHOW_CHANNEL),
            on_hide: Subscribers::on_channel(HIDE_CHANNEL),
        };
        g.relayout();
        g.rebuild_window();
        g
    }

    /// Builder-style [`Self::set_factory`].
    pub fn with_factory(mut self, factory: impl SlotFactory<H> + 'static) -> Self {
        self.set_factory(factory);
        self
    }

    /// Installs the slot factory (template) and rebuilds the window.
    ///
    /// Existing slots are kept; the factory only fills slots the pool does not have yet.
    pub fn set_factory(&mut self, factory: impl SlotFactory<H> + 'static) {
        self.factory = Some(Box::new(factory));
        self.rebuild_window();
    }

    /// Removes the slot factory. Already created slots stay in use.
    pub fn clear_factory(&mut self) {
        self.factory = None;
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Subscribes to "index became visible in slot" events.
    pub fn on_show(&mut self, f: impl FnMut(usize, &mut H) + 'static) -> SubscriptionId {
        self.on_show.subscribe(Box::new(f))
    }

    /// Subscribes to "index left slot" events.
    pub fn on_hide(&mut self, f: impl FnMut(usize, &mut H) + 'static) -> SubscriptionId {
        self.on_hide.subscribe(Box::new(f))
    }

    /// Removes a subscription made with [`Self::on_show`] or [`Self::on_hide`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match id.channel() {
            SHOW_CHANNEL => self.on_show.unsubscribe(id),
            HIDE_CHANNEL => self.on_hide.unsubscribe(id),
            _ => false,
        }
    }

    /// Installs (or removes) a scroll override that intercepts every content-position write.
    pub fn set_scroll_override(&mut self, scroll_override: Option<Box<dyn ScrollOverride>>) {
        self.bridge.set_override(scroll_override);
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn geometry(&self) -> GridGeometry {
        self.options.geometry()
    }

    pub fn host(&self) -> &S {
        &self.host
    }

    /// Mutable access to the host. Changes to viewport or position are picked up by
    /// [`Self::update`].
    pub fn host_mut(&mut self) -> &mut S {
        &mut self.host
    }

    pub fn into_host(self) -> S {
        self.host
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn visible_cells(&self) -> VisibleCells {
        self.visible
    }

    /// Number of slots one viewport needs (overscan included).
    pub fn capacity(&self) -> usize {
        self.visible.capacity()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn content_size(&self) -> Vec2 {
        self.layout.content_size
    }

    pub fn pool(&self) -> &SlotPool<H> {
        &self.pool
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    /// The last configuration error, if the current options cannot be laid out.
    pub fn layout_error(&self) -> Option<&LayoutError> {
        self.layout_error.as_ref()
    }

    pub fn origin(&self) -> Vec2 {
        self.bridge.origin()
    }

    /// Re-captures the host's current content position as the scroll origin.
    pub fn reset_origin(&mut self) {
        let origin = self.host.content_position();
        self.bridge.set_origin(origin);
        self.rebuild_window();
    }

    /// Changes the number of items and rebuilds the window.
    ///
    /// Every bound entry is unbound first (`on_hide`), including when the count drops to zero;
    /// an empty data set then produces no `on_show` calls.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.options.item_count == item_count {
            return;
        }
        self.options.item_count = item_count;
        self.rebuild();
    }

    pub fn set_cell_size(&mut self, cell_size: Vec2) {
        if self.options.cell_size == cell_size {
            return;
        }
        self.options.cell_size = cell_size;
        self.pool.resize_all(cell_size);
        self.rebuild();
    }

    pub fn set_spacing(&mut self, spacing: Vec2) {
        if self.options.spacing == spacing {
            return;
        }
        self.options.spacing = spacing;
        self.rebuild();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if self.options.padding == padding {
            return;
        }
        self.options.padding = padding;
        self.rebuild();
    }

    pub fn set_constraint(&mut self, constraint: Constraint) {
        let constraint = constraint.sanitized();
        if self.options.constraint == constraint {
            return;
        }
        self.options.constraint = constraint;
        self.rebuild();
    }

    pub fn set_scroll_axis(&mut self, axis: ScrollAxis) {
        if self.options.axis == axis {
            return;
        }
        self.options.axis = axis;
        self.rebuild();
    }

    /// Replaces all options, rebuilding only if the layout changes.
    pub fn set_options(&mut self, options: GridOptions) {
        let prev = self.options;
        self.options = options;
        self.options.constraint = options.constraint.sanitized();
        self.bridge.set_min_move_sq(options.min_move_sq);
        vtrace!(
            item_count = self.options.item_count,
            "VirtualGrid::set_options"
        );

        if prev.cell_size != self.options.cell_size {
            self.pool.resize_all(self.options.cell_size);
        }
        if prev.layout_differs(&self.options) {
            self.rebuild();
        }
    }

    /// Copies the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut GridOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    /// Applies a new viewport size (recomputes layout and rebuilds when it changed).
    pub fn set_viewport_size(&mut self, viewport: Vec2) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.rebuild();
    }

    /// Per-frame poll of the host: picks up viewport changes and content movement.
    ///
    /// Returns the number of slots recycled by the incremental shift.
    pub fn update(&mut self) -> usize {
        let viewport = self.host.viewport_size();
        if viewport != self.viewport {
            self.set_viewport_size(viewport);
            return 0;
        }
        let position = self.host.content_position();
        self.on_content_moved(position)
    }

    /// Handles a content-position change reported by the host.
    ///
    /// Movement below the hysteresis threshold is ignored. Otherwise the window shifts by whole
    /// lines, firing `on_hide`/`on_show` for every recycled slot. Returns the number of slots
    /// recycled.
    pub fn on_content_moved(&mut self, position: Vec2) -> usize {
        if !self.bridge.should_recompute(position) {
            return 0;
        }
        self.bridge.mark_processed(position);

        let geometry = self.options.geometry();
        let Some(target) = self.bridge.window_bounds(
            position,
            &geometry,
            &self.layout,
            self.options.item_count,
            self.visible.capacity(),
        ) else {
            return 0;
        };

        let layout = self.layout;
        let cell_size = self.options.cell_size;
        let pool = &mut self.pool;
        let on_show = &mut self.on_show;
        let on_hide = &mut self.on_hide;
        let steps = self.window.shift_to(target, |r| {
            Self::notify(on_hide, pool, r.evicted);
            let p = geometry.position_of(r.bound.data_index, &layout);
            pool.place(r.bound.slot_index, p, cell_size);
            Self::notify(on_show, pool, r.bound);
        });
        if steps > 0 {
            vtrace!(
                steps,
                first = target.first,
                last = target.last,
                "VirtualGrid::on_content_moved"
            );
        }
        debug_assert!(self.window.is_consistent(), "window lost contiguity");
        steps
    }

    /// Recomputes the layout and rebuilds the window from scratch.
    pub fn rebuild(&mut self) {
        self.relayout();
        self.rebuild_window();
    }

    /// Distance the content has scrolled from its origin along the scroll axis.
    pub fn scroll_distance(&self) -> f32 {
        self.bridge
            .distance(self.options.axis, self.host.content_position())
    }

    /// Largest scroll distance that keeps the viewport filled.
    pub fn max_scroll_distance(&self) -> f32 {
        ScrollOffsetBridge::max_distance(self.options.axis, self.layout.content_size, self.viewport)
    }

    /// Scroll position in `[0, 1]` (0 at the first item, 1 at the end).
    pub fn normalized_position(&self) -> f32 {
        self.bridge.normalized(
            self.options.axis,
            self.host.content_position(),
            self.layout.content_size,
            self.viewport,
        )
    }

    /// Scrolls to a normalized position (clamped to `[0, 1]`).
    pub fn set_normalized_position(&mut self, value: f32) -> usize {
        let distance = math::clamp01(value) * self.max_scroll_distance();
        self.scroll_to_distance(distance)
    }

    /// Fraction of the content the viewport shows, 1 when everything fits.
    pub fn visible_fraction(&self) -> f32 {
        let axis = self.options.axis;
        let content = self.layout.content_size.along(axis);
        if content <= 0.0 {
            return 1.0;
        }
        math::clamp01(self.viewport.along(axis) / content)
    }

    /// Scrolls so that the content has moved `distance` from its origin.
    pub fn scroll_to_distance(&mut self, distance: f32) -> usize {
        let position = self.bridge.position_for_distance(
            self.options.axis,
            self.host.content_position(),
            distance,
        );
        self.scroll_to(position)
    }

    /// Writes a content position (through the scroll override, if any) and updates the window.
    pub fn scroll_to(&mut self, position: Vec2) -> usize {
        let geometry = self.options.geometry();
        let request = ScrollRequest {
            current: self.host.content_position(),
            requested: position,
            origin: self.bridge.origin(),
            axis: geometry.axis,
            line_stride: geometry.stride(geometry.axis),
            line_start: geometry.padding.leading(geometry.axis),
            max_distance: self.max_scroll_distance(),
        };
        self.bridge.write_position(&mut self.host, request);
        let applied = self.host.content_position();
        self.on_content_moved(applied)
    }

    /// The scroll distance that brings `index`'s line to `align` in the viewport (clamped).
    pub fn scroll_distance_for_index(&self, index: usize, align: Align) -> f32 {
        let count = self.options.item_count;
        if count == 0 {
            return 0.0;
        }
        let geometry = self.options.geometry();
        let axis = geometry.axis;
        let line = geometry.line_of(index.min(count - 1), &self.layout);
        let start = geometry.line_start(line);
        let cell = geometry.cell_size.along(axis);
        let view = self.viewport.along(axis);
        let target = match align {
            Align::Start => start,
            Align::End => start + cell - view,
            Align::Center => start + cell / 2.0 - view / 2.0,
        };
        target.clamp(0.0, self.max_scroll_distance())
    }

    /// Programmatically scrolls to an index. Returns the number of slots recycled.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> usize {
        let distance = self.scroll_distance_for_index(index, align);
        self.scroll_to_distance(distance)
    }

    /// Slot currently showing `data_index`.
    pub fn slot_for_index(&self, data_index: usize) -> Option<usize> {
        self.window.slot_of(data_index)
    }

    /// Handle of the slot currently showing `data_index`.
    pub fn handle_for_index(&self, data_index: usize) -> Option<&H> {
        self.pool.handle(self.window.slot_of(data_index)?)
    }

    /// Content-space position of the cell holding `index`.
    pub fn position_of(&self, index: usize) -> Vec2 {
        self.options.geometry().position_of(index, &self.layout)
    }

    /// Calls `f` for every bound entry (ascending data index) with its slot position.
    pub fn for_each_visible(&self, mut f: impl FnMut(WindowEntry, Vec2)) {
        for entry in self.window.iter() {
            let position = self
                .pool
                .get(entry.slot_index)
                .map(|s| s.position())
                .unwrap_or_default();
            f(entry, position);
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: ViewportState {
                size: self.viewport,
            },
            scroll: ScrollState {
                distance: self.scroll_distance(),
            },
        }
    }

    /// Restores viewport and scroll distance from a snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.set_viewport_size(frame.viewport.size);
        self.scroll_to_distance(frame.scroll.distance);
    }

    fn notify(subs: &mut Subscribers<SlotCallback<H>>, pool: &mut SlotPool<H>, entry: WindowEntry) {
        let Some(handle) = pool.handle_mut(entry.slot_index) else {
            return;
        };
        for f in subs.iter_mut() {
            f(entry.data_index, &mut *handle);
        }
    }

    fn relayout(&mut self) {
        let geometry = self.options.geometry();
        match geometry.layout(self.options.item_count, self.viewport) {
            Ok(layout) => {
                self.layout = layout;
                self.visible = geometry.visible_cells(self.viewport, &layout);
                if self.layout_error.take().is_some() {
                    vdebug!("VirtualGrid: layout error cleared");
                }
            }
            Err(err) => {
                if self.layout_error.as_ref() != Some(&err) {
                    vwarn!(error = %err, "VirtualGrid: cannot lay out grid");
                }
                self.layout_error = Some(err);
                self.layout = geometry.empty_layout(self.viewport);
                self.visible = VisibleCells::default();
            }
        }
        self.bridge
            .write_content_size(&mut self.host, self.layout.content_size);
    }

    fn rebuild_window(&mut self) {
        self.pool.prune_dead();

        let pool = &mut self.pool;
        let on_hide = &mut self.on_hide;
        for entry in self.window.drain() {
            Self::notify(on_hide, pool, entry);
        }

        let item_count = self.options.item_count;
        let required = self.visible.capacity().min(item_count);
        let cell_size = self.options.cell_size;
        if required > 0 {
            if let Some(factory) = self.factory.as_mut() {
                self.pool
                    .ensure_capacity(required, &mut **factory, cell_size);
            }
        }

        let position = self.host.content_position();
        self.bridge.mark_processed(position);

        if required == 0 || !self.pool.is_ready(required) {
            if required > 0 {
                vwarn!(
                    required,
                    pool = self.pool.len(),
                    "VirtualGrid: no slots available, window left empty"
                );
            }
            self.pool.deactivate_from(0);
            return;
        }

        let geometry = self.options.geometry();
        let passed = self
            .bridge
            .passed_item_count(position, &geometry, &self.layout, item_count);
        let first = passed.min(item_count - required);
        vdebug!(
            item_count,
            required,
            first,
            pool = self.pool.len(),
            "VirtualGrid::rebuild_window"
        );

        for slot_index in 0..required {
            let entry = WindowEntry {
                data_index: first + slot_index,
                slot_index,
            };
            self.window.push_back(entry);
            self.pool.activate(slot_index);
            let p = geometry.position_of(entry.data_index, &self.layout);
            self.pool.place(slot_index, p, cell_size);
            Self::notify(&mut self.on_show, &mut self.pool, entry);
        }
        self.pool.deactivate_from(required);
    }
}
