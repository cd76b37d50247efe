use slotgrid::{GridOptions, ScrollHost, SlotHandle, Vec2, VirtualGrid};
use slotgrid_adapter::{apply_anchor, capture_first_visible_anchor};

struct Message;

impl SlotHandle for Message {
    fn set_active(&mut self, _active: bool) {}

    fn place(&mut self, _position: Vec2, _size: Vec2) {}
}

#[derive(Default)]
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
    // Example: preserve visual scroll position across "prepend" (chat/timeline load older messages).
    //
    // The adapter flow is typically:
    // 1) capture an anchor (index + offset_in_line) before data changes
    // 2) apply data changes (item count)
    // 3) apply the anchor with an old -> new index mapping so the same item stays in place
    let host = Host {
        viewport: Vec2::new(400.0, 300.0),
        ..Host::default()
    };
    let mut grid = VirtualGrid::new(GridOptions::new(100, Vec2::new(400.0, 30.0)), host)
        .with_factory(|_: usize, _: Vec2| Some(Message));
    grid.scroll_to_distance(455.0);

    let Some(anchor) = capture_first_visible_anchor(&grid) else {
        println!("nothing visible");
        return;
    };
    println!(
        "before prepend: distance={} anchor={anchor:?}",
        grid.scroll_distance()
    );

    // Prepend 10 items; old items shift by +10 indexes.
    grid.set_item_count(110);
    let ok = apply_anchor(&mut grid, &anchor, |old| Some(old + 10));

    println!(
        "after prepend: ok={ok} distance={} first={:?}",
        grid.scroll_distance(),
        grid.window().first()
    );
}
