// Example: a 10k-cell photo grid shown through a handful of recycled slots.
use slotgrid::{Align, GridOptions, Padding, ScrollHost, SlotHandle, Vec2, VirtualGrid};

#[derive(Debug)]
struct Tile {
    id: usize,
    shown: Option<usize>,
    active: bool,
    position: Vec2,
}

impl SlotHandle for Tile {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn place(&mut self, position: Vec2, _size: Vec2) {
        self.position = position;
    }
}

#[derive(Debug, Default)]
struct Viewport {
    size: Vec2,
    content_position: Vec2,
    content_size: Vec2,
}

impl ScrollHost for Viewport {
    fn viewport_size(&self) -> Vec2 {
        self.size
    }

    fn content_position(&self) -> Vec2 {
        self.content_position
    }

    fn set_content_position(&mut self, position: Vec2) {
        self.content_position = position;
    }

    fn set_content_size(&mut self, size: Vec2) {
        self.content_size = size;
    }
}

fn main() {
    let host = Viewport {
        size: Vec2::new(640.0, 480.0),
        ..Viewport::default()
    };
    let options = GridOptions::new(10_000, Vec2::new(120.0, 120.0))
        .with_spacing(Vec2::new(8.0, 8.0))
        .with_padding(Padding::uniform(16.0));

    let mut grid = VirtualGrid::new(options, host).with_factory(|id: usize, _size: Vec2| {
        Some(Tile {
            id,
            shown: None,
            active: false,
            position: Vec2::ZERO,
        })
    });
    grid.on_show(|index, tile: &mut Tile| tile.shown = Some(index));
    grid.on_hide(|_, tile: &mut Tile| tile.shown = None);
    grid.rebuild();

    println!("layout={:?}", grid.layout());
    println!("capacity={} slots={}", grid.capacity(), grid.pool().len());
    println!("content_size={:?}", grid.host().content_size);
    println!("window={:?}", grid.window().bounds());

    // The host scrolled (e.g. a wheel event moved the content up by 1000px).
    grid.host_mut().content_position = Vec2::new(0.0, 1_000.0);
    let recycled = grid.update();
    println!("recycled={recycled} window={:?}", grid.window().bounds());

    grid.scroll_to_index(9_999, Align::End);
    println!(
        "after scroll_to_index: distance={} normalized={:.3}",
        grid.scroll_distance(),
        grid.normalized_position()
    );
    grid.for_each_visible(|entry, position| {
        let tile = grid.handle_for_index(entry.data_index);
        println!(
            "  index={} slot={} at {position:?} tile={tile:?}",
            entry.data_index, entry.slot_index
        );
    });
}
