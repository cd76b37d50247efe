use crate::*;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use slotgrid::{
    Align, GridOptions, ScrollAxis, ScrollHost, ScrollRequest, SlotHandle, Vec2, VirtualGrid,
};

#[derive(Debug, Default)]
struct TestSlot {
    active: bool,
}

impl SlotHandle for TestSlot {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn place(&mut self, _position: Vec2, _size: Vec2) {}
}

#[derive(Debug, Default)]
struct TestHost {
    viewport: Vec2,
    position: Vec2,
    content_size: Vec2,
}

impl ScrollHost for TestHost {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn content_position(&self) -> Vec2 {
        self.position
    }

    fn set_content_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_content_size(&mut self, size: Vec2) {
        self.content_size = size;
    }
}

fn grid(item_count: usize) -> VirtualGrid<TestSlot, TestHost> {
    let host = TestHost {
        viewport: Vec2::new(200.0, 200.0),
        ..TestHost::default()
    };
    VirtualGrid::new(GridOptions::new(item_count, Vec2::new(100.0, 100.0)), host)
        .with_factory(|_: usize, _: Vec2| Some(TestSlot::default()))
}

fn first_visible(g: &VirtualGrid<TestSlot, TestHost>) -> Option<usize> {
    g.window().first().map(|e| e.data_index)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn record_values(bar: &mut ScrollProxyBar) -> Rc<RefCell<Vec<f32>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        bar.on_value_changed(move |v| seen.borrow_mut().push(v));
    }
    seen
}

const TRACK: Vec2 = Vec2::new(100.0, 10.0);

#[test]
fn stepped_drag_only_emits_step_levels() {
    let mut bar = ScrollProxyBar::new(BarOptions::default().with_number_of_steps(5), TRACK);
    let seen = record_values(&mut bar);

    let grab = PointerEvent::primary(Vec2::new(10.0, 5.0));
    assert!(!bar.pointer_down(grab, 0));
    bar.begin_drag(grab);
    assert!(!bar.is_held());
    for x in 10..=90 {
        bar.drag(PointerEvent::primary(Vec2::new(x as f32, 5.0)));
    }
    bar.end_drag(grab);
    bar.pointer_up(grab);

    let levels = [0.0, 0.25, 0.5, 0.75, 1.0];
    let seen = seen.borrow();
    assert!(seen.iter().all(|v| levels.contains(v)), "{seen:?}");
    assert_eq!(&seen[..], &[0.25, 0.5, 0.75, 1.0]);
    assert_eq!(bar.value(), 1.0);
}

#[test]
fn reversed_thumb_span_follows_formula() {
    let bar = ScrollProxyBar::new(
        BarOptions::default()
            .with_direction(BarDirection::RightToLeft)
            .with_value(0.3)
            .with_size(0.2),
        TRACK,
    );
    let (start, end) = bar.thumb_span();
    let movement = 0.3 * (1.0 - 0.2);
    assert!(approx(start, 1.0 - movement - 0.2));
    assert!(approx(end, 1.0 - movement));
    assert!(approx(start, 0.56) && approx(end, 0.76));

    let (min, max) = bar.thumb_rect();
    assert!(approx(min.x, 56.0) && approx(max.x, 76.0));
    assert_eq!((min.y, max.y), (0.0, 10.0));
    assert!(bar.thumb_contains(Vec2::new(60.0, 5.0)));
    assert!(!bar.thumb_contains(Vec2::new(20.0, 5.0)));
}

#[test]
fn quantize_is_idempotent() {
    for steps in 0..12u32 {
        for i in 0..=200 {
            let v = i as f32 / 200.0 * 1.2 - 0.1;
            let q = quantize(v, steps);
            assert_eq!(quantize(q, steps), q, "steps={steps} v={v}");
            assert!((0.0..=1.0).contains(&q));
        }
    }
}

#[test]
fn direction_axis_and_reverse() {
    assert_eq!(BarDirection::LeftToRight.axis(), ScrollAxis::Horizontal);
    assert_eq!(BarDirection::TopToBottom.axis(), ScrollAxis::Vertical);
    assert!(BarDirection::RightToLeft.is_reversed());
    assert!(!BarDirection::BottomToTop.is_reversed());

    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    assert!(!bar.set_direction(BarDirection::LeftToRight));
    assert!(bar.set_direction(BarDirection::BottomToTop));
    assert_eq!(bar.axis(), ScrollAxis::Vertical);
}

#[test]
fn dragging_the_thumb_keeps_the_grab_offset() {
    let mut bar = ScrollProxyBar::new(BarOptions::default().with_value(0.5), TRACK);
    // Thumb spans 40..60.
    bar.begin_drag(PointerEvent::primary(Vec2::new(55.0, 5.0)));
    assert!(!bar.drag(PointerEvent::primary(Vec2::new(55.0, 5.0))));
    assert_eq!(bar.value(), 0.5);

    assert!(bar.drag(PointerEvent::primary(Vec2::new(63.0, 5.0))));
    assert!(approx(bar.value(), 0.6));
}

#[test]
fn dragging_a_reversed_bar_inverts_the_value() {
    let mut bar = ScrollProxyBar::new(
        BarOptions::default().with_direction(BarDirection::RightToLeft),
        TRACK,
    );
    // Value 0 puts the thumb at 80..100.
    bar.begin_drag(PointerEvent::primary(Vec2::new(90.0, 5.0)));
    assert!(bar.drag(PointerEvent::primary(Vec2::new(50.0, 5.0))));
    assert!(approx(bar.value(), 0.5));
}

#[test]
fn only_primary_button_on_an_interactable_bar_drags() {
    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    let secondary = PointerEvent {
        position: Vec2::new(90.0, 5.0),
        button: PointerButton::Secondary,
    };
    assert!(!bar.pointer_down(secondary, 0));
    assert!(!bar.is_held());
    bar.begin_drag(secondary);
    assert!(!bar.drag(secondary));
    assert_eq!(bar.value(), 0.0);

    bar.set_interactable(false);
    assert!(!bar.pointer_down(PointerEvent::primary(Vec2::new(90.0, 5.0)), 0));
    assert!(!bar.on_move(MoveDirection::Right));
    assert_eq!(bar.value(), 0.0);
}

#[test]
fn hold_repeat_steps_toward_the_pointer_until_the_thumb_covers_it() {
    let mut bar = ScrollProxyBar::new(BarOptions::default().with_repeat_interval_ms(50), TRACK);
    let press = PointerEvent::primary(Vec2::new(90.0, 5.0));

    assert!(bar.pointer_down(press, 0));
    assert!(approx(bar.value(), 0.2));
    assert!(!bar.tick(10));
    assert!(bar.tick(50));
    assert!(approx(bar.value(), 0.4));
    assert!(bar.tick(100));
    assert!(bar.tick(150));
    assert!(bar.tick(200));
    assert!(bar.value() > 0.999);
    // The thumb now spans 80..100 and covers the pointer.
    assert!(!bar.tick(250));

    bar.pointer_up(press);
    bar.set_value(0.0);
    assert!(!bar.tick(300));
    assert_eq!(bar.value(), 0.0);
}

#[test]
fn hold_repeat_stops_once_a_step_jumps_past_the_pointer() {
    let mut bar = ScrollProxyBar::new(
        BarOptions::default()
            .with_number_of_steps(3)
            .with_size(0.3),
        TRACK,
    );
    let seen = record_values(&mut bar);
    // Level thumbs cover 0..30, 35..65 and 70..100; x = 32 sits in a gap.
    assert!(bar.pointer_down(PointerEvent::primary(Vec2::new(32.0, 5.0)), 0));
    assert_eq!(bar.value(), 0.5);
    for now_ms in (16..=160).step_by(16) {
        assert!(!bar.tick(now_ms));
    }
    assert_eq!(bar.value(), 0.5);
    assert_eq!(&seen.borrow()[..], &[0.5]);

    bar.pointer_moved(Vec2::new(90.0, 5.0));
    assert!(bar.tick(200));
    assert_eq!(bar.value(), 1.0);
}

#[test]
fn hold_repeat_on_a_reversed_bar_moves_the_thumb_toward_the_pointer() {
    let mut bar = ScrollProxyBar::new(
        BarOptions::default().with_direction(BarDirection::RightToLeft),
        TRACK,
    );
    // Thumb at 80..100, pointer to its left: the value grows.
    assert!(bar.pointer_down(PointerEvent::primary(Vec2::new(10.0, 5.0)), 0));
    assert!(approx(bar.value(), 0.2));
    let (start, _) = bar.thumb_span();
    assert!(start < 0.8);
}

#[test]
fn beginning_a_drag_cancels_hold_repeat() {
    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    let press = PointerEvent::primary(Vec2::new(90.0, 5.0));
    bar.pointer_down(press, 0);
    assert!(bar.is_held());
    bar.begin_drag(press);
    assert!(!bar.is_held());
    assert!(bar.is_dragging());
    let before = bar.value();
    assert!(!bar.tick(16));
    assert_eq!(bar.value(), before);
}

#[test]
fn move_steps_along_the_bar_axis() {
    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    assert_eq!(bar.step_size(), 0.1);
    assert!(bar.on_move(MoveDirection::Right));
    assert!(approx(bar.value(), 0.1));
    assert!(!bar.on_move(MoveDirection::Up));
    assert!(bar.on_move(MoveDirection::Left));
    assert!(approx(bar.value(), 0.0));

    let mut bar = ScrollProxyBar::new(
        BarOptions::default()
            .with_direction(BarDirection::TopToBottom)
            .with_number_of_steps(5),
        Vec2::new(10.0, 100.0),
    );
    assert_eq!(bar.step_size(), 0.25);
    assert!(bar.on_move(MoveDirection::Down));
    assert_eq!(bar.value(), 0.25);
    assert!(!bar.on_move(MoveDirection::Left));
}

#[test]
fn notifications_respect_step_changes_and_silent_sets() {
    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    let seen = record_values(&mut bar);
    let ended = Rc::new(Cell::new(0usize));
    {
        let ended = Rc::clone(&ended);
        bar.on_end_drag(move || ended.set(ended.get() + 1));
    }

    assert!(bar.set_value_without_notify(0.3));
    assert!(seen.borrow().is_empty());

    assert!(bar.set_number_of_steps(3));
    assert_eq!(bar.value(), 0.5);
    assert!(!bar.set_value(0.4));
    assert_eq!(&seen.borrow()[..], &[0.5]);

    bar.end_drag(PointerEvent::default());
    assert_eq!(ended.get(), 1);
}

#[test]
fn unsubscribing_an_end_drag_id_keeps_value_listeners() {
    let mut bar = ScrollProxyBar::new(BarOptions::default(), TRACK);
    let seen = record_values(&mut bar);
    let ended = Rc::new(Cell::new(0usize));
    let id = {
        let ended = Rc::clone(&ended);
        bar.on_end_drag(move || ended.set(ended.get() + 1))
    };

    assert!(bar.unsubscribe(id));
    assert!(!bar.unsubscribe(id));
    assert!(bar.set_value(0.5));
    assert_eq!(&seen.borrow()[..], &[0.5]);
    bar.end_drag(PointerEvent::default());
    assert_eq!(ended.get(), 0);
}

#[test]
fn binding_follows_values_set_directly_on_the_bar() {
    let mut b = ScrollBinding::new(grid(100), ScrollProxyBar::new(BarOptions::default(), TRACK));
    assert!(b.bar_mut().set_value(1.0));
    assert_eq!(b.tick(16), None);
    assert_eq!(b.bar().value(), 1.0);
    assert_eq!(b.grid().normalized_position(), 1.0);
    assert_eq!(b.grid().scroll_distance(), 4800.0);

    b.bar_mut().set_value(0.25);
    b.sync_bar();
    assert!(approx(b.grid().scroll_distance(), 1200.0));
    assert!(approx(b.bar().value(), 0.25));

    // A grid-side command issued later wins over an unapplied bar value.
    b.bar_mut().set_value(0.75);
    assert_eq!(b.scroll_to_index(10, Align::Start), 500.0);
    b.tick(32);
    assert_eq!(b.grid().scroll_distance(), 500.0);

    let (mut g, mut bar) = b.into_parts();
    bar.set_value(0.0);
    g.update();
    assert_eq!(g.scroll_distance(), 500.0);
}

#[test]
fn binding_drives_the_grid_from_the_bar_and_back() {
    let bar = ScrollProxyBar::new(
        BarOptions::default().with_direction(BarDirection::TopToBottom),
        Vec2::new(10.0, 100.0),
    );
    let mut b = ScrollBinding::new(grid(100), bar);
    assert!(approx(b.bar().size(), 200.0 / 5000.0));
    assert_eq!(b.bar().value(), 0.0);

    let notified = Rc::new(Cell::new(0usize));
    {
        let notified = Rc::clone(&notified);
        b.bar_mut().on_value_changed(move |_| notified.set(notified.get() + 1));
    }

    // Thumb sits at the top of the track (y 96..100).
    b.begin_drag(PointerEvent::primary(Vec2::new(5.0, 98.0)));
    assert!(b.drag(PointerEvent::primary(Vec2::new(5.0, 40.0))));
    b.end_drag(PointerEvent::primary(Vec2::new(5.0, 40.0)));
    assert_eq!(notified.get(), 1);

    let d = b.grid().scroll_distance();
    assert!((d - b.bar().value() * 4800.0).abs() < 1e-2);
    assert_eq!(first_visible(b.grid()), Some((d / 100.0) as usize * 2));

    let position = Vec2::new(0.0, 1200.0);
    b.grid_mut().host_mut().position = position;
    b.on_scroll(position);
    assert!(approx(b.bar().value(), 0.25));
    assert_eq!(first_visible(b.grid()), Some(24));
    assert_eq!(notified.get(), 1);
}

#[test]
fn binding_tween_reaches_the_target_index() {
    let mut b = ScrollBinding::new(grid(100), ScrollProxyBar::new(BarOptions::default(), TRACK));
    let to = b.start_tween_to_index(50, Align::Start, 0, 100, Easing::SmoothStep);
    assert_eq!(to, 2500.0);
    assert!(b.is_animating());

    let mut last = 0.0f32;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(d) = b.tick(now_ms) {
            assert!(d >= last);
            last = d;
        }
    }
    assert!(!b.is_animating());
    assert_eq!(b.grid().scroll_distance(), 2500.0);
    assert_eq!(first_visible(b.grid()), Some(50));
    assert!(approx(b.bar().value(), 2500.0 / 4800.0));
}

#[test]
fn binding_scroll_to_index_cancels_tween() {
    let mut b = ScrollBinding::new(grid(100), ScrollProxyBar::new(BarOptions::default(), TRACK));
    b.start_tween_to_index(90, Align::Start, 0, 100, Easing::Linear);
    assert_eq!(b.scroll_to_index(10, Align::Start), 500.0);
    assert!(!b.is_animating());
    assert_eq!(b.tick(50), None);
    assert_eq!(b.grid().scroll_distance(), 500.0);
}

#[test]
fn cell_snap_rounds_to_whole_lines() {
    let mut g = grid(100);
    g.set_scroll_override(Some(Box::new(CellSnap)));

    g.scroll_to_distance(149.0);
    assert_eq!(g.scroll_distance(), 100.0);
    g.scroll_to_distance(151.0);
    assert_eq!(g.scroll_distance(), 200.0);
    g.scroll_to_distance(4790.0);
    assert_eq!(g.scroll_distance(), 4800.0);
    g.scroll_to_distance(-30.0);
    assert_eq!(g.scroll_distance(), 0.0);

    let request = ScrollRequest {
        current: Vec2::ZERO,
        requested: Vec2::new(-200.0, 7.0),
        origin: Vec2::ZERO,
        axis: ScrollAxis::Horizontal,
        line_stride: 105.0,
        line_start: 20.0,
        max_distance: 1000.0,
    };
    assert_eq!(CellSnap::snapped_distance(&request), 230.0);
    assert_eq!(request.position_at(230.0), Vec2::new(-230.0, 7.0));
}

#[test]
fn anchor_can_preserve_scroll_across_prepend() {
    let mut g = grid(100);
    g.scroll_to_distance(1030.0);
    assert_eq!(first_visible(&g), Some(20));

    let anchor = capture_first_visible_anchor(&g).unwrap();
    assert_eq!(anchor.index, 20);
    assert_eq!(anchor.offset_in_line, 30.0);

    // Prepend 10 items: old items shift by +10 indexes.
    g.set_item_count(110);
    assert!(apply_anchor(&mut g, &anchor, |i| Some(i + 10)));
    assert_eq!(g.scroll_distance(), 1530.0);
    assert_eq!(first_visible(&g), Some(30));

    assert!(!apply_anchor(&mut g, &anchor, |_| None));
    assert!(!apply_anchor(&mut g, &anchor, |_| Some(500)));
}

#[test]
fn tween_retarget_starts_from_the_current_sample() {
    let mut t = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    assert_eq!(t.sample(50), 50.0);
    t.retarget(50, 200.0, 100);
    assert_eq!(t.from, 50.0);
    assert_eq!(t.sample(150), 200.0);
    assert!(t.is_done(150));
}
