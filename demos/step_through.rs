use stepwise_pathfinding::{Pathfinder, SearchStatus, SmoothStatus};

// Steps a search on a 12x8 grid with shape
//  ____________
// |S    #      |
// |     #      |
// |     #  ### |
// |     #    # |
// |     #    # |
// |          #G|
// |  ######  # |
// |            |
//  ____________
// one expansion at a time, then smooths the result one visibility test at a time.
//
// Run with RUST_LOG=debug to follow the session.

fn main() {
    env_logger::init();
    let mut pathfinder = Pathfinder::new(12, 8);
    for y in 0..5 {
        pathfinder.set_obstacle(5, y, true);
    }
    for x in 8..11 {
        pathfinder.set_obstacle(x, 2, true);
    }
    for y in 3..7 {
        pathfinder.set_obstacle(10, y, true);
    }
    for x in 2..8 {
        pathfinder.set_obstacle(x, 6, true);
    }
    pathfinder.set_start(0, 0);
    pathfinder.set_target(11, 5);
    println!("{}", pathfinder.grid());
    println!("Reachable: {}", pathfinder.is_reachable());

    let mut steps = 0;
    let status = loop {
        match pathfinder.step_search() {
            Ok(SearchStatus::Searching) => steps += 1,
            Ok(status) => break status,
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        }
    };
    println!("{:?} after {} expansions", status, steps);
    if status != SearchStatus::Found {
        return;
    }
    let astar = pathfinder.astar();
    println!("Grid path ({} cells):", astar.path().len());
    for p in astar.path() {
        println!("{:?}", p);
    }

    let mut tests = 1;
    while pathfinder.step_smoothing() == SmoothStatus::Smoothing {
        tests += 1;
    }
    let waypoints = pathfinder.astar().waypoints();
    println!(
        "Smoothed to {} waypoints in {} visibility tests, length {:.2}:",
        waypoints.len(),
        tests,
        stepwise_pathfinding::waypoints_length(waypoints)
    );
    for w in waypoints {
        println!("({:.1}, {:.1})", w.x, w.y);
    }
}
