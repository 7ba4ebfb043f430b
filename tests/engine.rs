use life_grid::{proc, Coord, Life, LiveSet, Rect};

fn set(cells: &[(u16, u16)]) -> LiveSet {
    cells.iter().map(|&c| Coord::from(c)).collect()
}

#[test]
fn blinker_oscillates_with_period_two() {
    let size = Rect::new(5, 5).unwrap();
    let vertical = set(&[(1, 1), (1, 2), (1, 3)]);
    let horizontal = set(&[(0, 2), (1, 2), (2, 2)]);

    let mut life = Life::with_cells(size, vertical.clone()).unwrap();
    life.tick();
    assert_eq!(life.live_cells(), &horizontal);
    life.tick();
    assert_eq!(life.live_cells(), &vertical);
    assert_eq!(life.generation(), 2);
}

#[test]
fn pure_step_leaves_engine_state_alone() {
    let size = Rect::new(5, 5).unwrap();
    let life = Life::with_cells(size, set(&[(1, 1), (1, 2), (1, 3)])).unwrap();
    let next = proc::step(life.live_cells(), life.geometry());
    assert_eq!(next, set(&[(0, 2), (1, 2), (2, 2)]));
    assert_eq!(life.live_cells(), &set(&[(1, 1), (1, 2), (1, 3)]));
    assert_eq!(life.generation(), 0);
}

#[test]
fn glider_dies_against_the_edge() {
    // Without wraparound a glider heading into the corner ends as a block.
    let size = Rect::new(6, 6).unwrap();
    let glider = "\
.#....
..#...
###...
";
    let mut life = Life::from_pattern(glider, size).unwrap();
    for _ in 0..40 {
        life.tick();
    }
    let block = set(&[(4, 4), (5, 4), (4, 5), (5, 5)]);
    assert_eq!(life.live_cells(), &block);

    life.tick();
    assert_eq!(life.live_cells(), &block);
}

#[test]
fn pattern_file_from_demos_loads() {
    let text = include_str!("../demos/pulsar.txt");
    let size = Rect::new(17, 17).unwrap();
    let mut life = Life::from_pattern(text, size).unwrap();
    let start = life.live_cells().clone();
    assert_eq!(start.len(), 48);
    for _ in 0..3 {
        life.tick();
    }
    assert_eq!(life.live_cells(), &start);
}
