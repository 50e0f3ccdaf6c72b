/// Fuzzes the search by checking for many random grids that a path is found exactly when the goal
/// is reachable by being part of the same connected component, that found paths are valid and
/// that smoothing only ever drops interior waypoints. Both relaxation policies and both
/// connectivities are tested.
use rand::prelude::*;
use std::collections::VecDeque;
use stepwise_pathfinding::{
    has_line_of_sight, path_cost, AStar, Connectivity, OccupancyGrid, Point, SearchSettings,
    SearchStatus, SmoothStatus, StepMode,
};

fn random_grid(w: usize, h: usize, rng: &mut StdRng, connectivity: Connectivity) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(w, h);
    grid.set_connectivity(connectivity);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            grid.set_obstacle(x, y, rng.gen_bool(0.4))
        }
    }
    grid
}

fn visualize_grid(grid: &OccupancyGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_obstacle(x, y) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Number of orthogonal steps on a shortest path, by breadth-first search.
fn bfs_steps(grid: &OccupancyGrid, start: Point, goal: Point) -> Option<usize> {
    let mut steps = vec![None; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    steps[grid.cell_index(&start)] = Some(0);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let s = steps[grid.cell_index(&p)].unwrap_or(0);
        if p == goal {
            return Some(s);
        }
        for n in grid.neighbours(&p) {
            let ix = grid.cell_index(&n);
            if steps[ix].is_none() {
                steps[ix] = Some(s + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

fn assert_valid_path(grid: &OccupancyGrid, start: Point, goal: Point, path: &[Point]) {
    assert_eq!(path.last().copied().unwrap_or(start), goal);
    let mut previous = start;
    for p in path {
        assert!(grid.is_passable(p.x, p.y));
        let (dx, dy) = ((p.x - previous.x).abs(), (p.y - previous.y).abs());
        assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
        if grid.connectivity() == Connectivity::Orthogonal {
            assert_eq!(dx + dy, 1);
        }
        previous = *p;
    }
}

fn assert_smoothing_invariants(grid: &OccupancyGrid, astar: &mut AStar) {
    let seeded = astar.waypoints().to_vec();
    assert_eq!(seeded.len(), astar.path().len() + 2);
    assert_eq!(
        astar.find_smooth_path(grid, StepMode::RunToCompletion),
        SmoothStatus::Done
    );
    let smoothed = astar.waypoints();
    assert!(smoothed.len() >= 2);
    assert!(smoothed.len() <= seeded.len());
    assert_eq!(smoothed.first(), seeded.first());
    assert_eq!(smoothed.last(), seeded.last());
    // Smoothed points are a subsequence of the seeded ones, and every new segment was visible.
    let mut cursor = 0;
    for pair in smoothed.windows(2) {
        let a = cursor + seeded[cursor..].iter().position(|p| *p == pair[0]).unwrap();
        let b = a + 1 + seeded[a + 1..].iter().position(|p| *p == pair[1]).unwrap();
        assert!(b == a + 1 || has_line_of_sight(grid, pair[1], pair[0], 0.5));
        cursor = b;
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for connectivity in [Connectivity::Orthogonal, Connectivity::Diagonal] {
        for resift_on_relax in [true, false] {
            let settings = SearchSettings {
                connectivity,
                resift_on_relax,
                ..SearchSettings::default()
            };
            let mut astar = AStar::new(settings);
            for _ in 0..N_GRIDS {
                let mut grid = random_grid(N, N, &mut rng, connectivity);
                grid.set_obstacle(start.x, start.y, false);
                grid.set_obstacle(end.x, end.y, false);
                grid.update();
                let reachable = grid.reachable(&start, &end);

                astar.init_search(&grid, start, end).unwrap();
                let status = astar.find_path(StepMode::RunToCompletion).unwrap();
                // Show the grid if the outcome disagrees with the components
                if (status == SearchStatus::Found) != reachable {
                    visualize_grid(&grid, &start, &end);
                }
                assert_eq!(status == SearchStatus::Found, reachable);
                if !reachable {
                    assert_eq!(status, SearchStatus::Unreachable);
                    assert!(astar.open_list().is_empty());
                    continue;
                }
                let path = astar.path().to_vec();
                assert_valid_path(&grid, start, end, &path);

                let mut full = vec![start];
                full.extend_from_slice(&path);
                let goal_g = astar.cell(&end).map(|c| c.g).unwrap_or_default();
                if resift_on_relax {
                    assert_eq!(goal_g, path_cost(&full));
                } else {
                    // A stale open list can improve a closed parent after its child was costed.
                    assert!(goal_g >= path_cost(&full));
                }
                if connectivity == Connectivity::Orthogonal {
                    let shortest = bfs_steps(&grid, start, end).unwrap();
                    if resift_on_relax {
                        assert_eq!(path.len(), shortest);
                    } else {
                        assert!(path.len() >= shortest);
                    }
                }
                assert_smoothing_invariants(&grid, &mut astar);
            }
        }
    }
}

#[test]
fn fuzz_open_grid_lengths() {
    const N: i32 = 12;
    let mut rng = StdRng::seed_from_u64(1);
    let grid = OccupancyGrid::new(N as usize, N as usize);
    let mut astar = AStar::default();
    for _ in 0..500 {
        let start = Point::new(rng.gen_range(0..N), rng.gen_range(0..N));
        let goal = Point::new(rng.gen_range(0..N), rng.gen_range(0..N));
        astar.init_search(&grid, start, goal).unwrap();
        assert_eq!(
            astar.find_path(StepMode::RunToCompletion),
            Ok(SearchStatus::Found)
        );
        let manhattan = (goal.x - start.x).abs() + (goal.y - start.y).abs();
        assert_eq!(astar.path().len() as i32, manhattan);
        astar.find_smooth_path(&grid, StepMode::RunToCompletion);
        assert!(astar.waypoints().len() == 2);
    }
}
