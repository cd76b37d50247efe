use slotgrid::{GridOptions, ScrollHost, SlotHandle, Vec2, VirtualGrid};
use slotgrid_adapter::{
    BarDirection, BarOptions, CellSnap, Easing, MoveDirection, PointerEvent, ScrollBinding,
    ScrollProxyBar,
};

#[derive(Debug, Default)]
struct Cell;

impl SlotHandle for Cell {
    fn set_active(&mut self, _active: bool) {}

    fn place(&mut self, _position: Vec2, _size: Vec2) {}
}

#[derive(Debug, Default)]
struct Host {
    viewport: Vec2,
    position: Vec2,
}

impl ScrollHost for Host {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn content_position(&self) -> Vec2 {
        self.position
    }

    fn set_content_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_content_size(&mut self, _size: Vec2) {}
}

fn main() {
    // Example: a vertical list driven by a top-to-bottom proxy scrollbar.
    //
    // The adapter flow is typically:
    // 1) forward pointer/keyboard input on the bar to the binding
    // 2) forward host scroll events with `on_scroll`
    // 3) call `tick(now_ms)` every frame (hold-repeat, tweens, host polling)
    let host = Host {
        viewport: Vec2::new(300.0, 400.0),
        ..Host::default()
    };
    let mut grid = VirtualGrid::new(GridOptions::new(500, Vec2::new(300.0, 40.0)), host)
        .with_factory(|_: usize, _: Vec2| Some(Cell));
    grid.set_scroll_override(Some(Box::new(CellSnap)));

    let bar = ScrollProxyBar::new(
        BarOptions::default()
            .with_direction(BarDirection::TopToBottom)
            .with_repeat_interval_ms(100),
        Vec2::new(12.0, 400.0),
    );
    let mut b = ScrollBinding::new(grid, bar);
    b.bar_mut().on_end_drag(|| println!("  bar: drag finished"));
    println!("thumb size={:.3}", b.bar().size());

    // Drag the thumb halfway down the track.
    let (start, end) = b.bar().thumb_span();
    let grab = Vec2::new(6.0, (start + end) * 0.5 * 400.0);
    b.begin_drag(PointerEvent::primary(grab));
    b.drag(PointerEvent::primary(Vec2::new(6.0, 200.0)));
    b.end_drag(PointerEvent::primary(Vec2::new(6.0, 200.0)));
    println!(
        "after drag: value={:.3} distance={} window={:?}",
        b.bar().value(),
        b.grid().scroll_distance(),
        b.grid().window().bounds()
    );

    // Press and hold below the thumb: the list pages down every 100ms.
    let below = PointerEvent::primary(Vec2::new(6.0, 10.0));
    b.pointer_down(below, 0);
    for now_ms in (16..=320).step_by(16) {
        b.tick(now_ms);
    }
    b.pointer_up(below);
    println!("after hold: distance={}", b.grid().scroll_distance());

    b.on_move(MoveDirection::Up);
    println!("after key up: value={:.3}", b.bar().value());

    let to = b.start_tween_to_index(0, slotgrid::Align::Start, 400, 200, Easing::EaseInOutCubic);
    let mut now_ms = 400;
    while b.is_animating() {
        now_ms += 16;
        if let Some(d) = b.tick(now_ms) {
            println!("  tween t={now_ms} distance={d:.1}");
        }
    }
    println!("tween target={to} final={}", b.grid().scroll_distance());
}
