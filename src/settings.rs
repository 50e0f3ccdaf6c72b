use grid_util::point::Point;

pub const DEFAULT_SIGHT_STEP: f32 = 0.5;
/// Smallest accepted line-of-sight sampling distance. Smaller steps are raised to it.
pub const MIN_SIGHT_STEP: f32 = 0.01;

/// Maps a requested sampling distance onto a usable one: non-positive and non-finite values
/// fall back to [DEFAULT_SIGHT_STEP], tiny ones are raised to [MIN_SIGHT_STEP].
pub fn sanitize_sight_step(step: f32) -> f32 {
    if step.is_finite() && step > 0.0 {
        step.max(MIN_SIGHT_STEP)
    } else {
        DEFAULT_SIGHT_STEP
    }
}

/// How much work a single call to a step function performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepMode {
    /// One expansion (search) or one pruning test (smoothing) per call.
    #[default]
    Single,
    /// Keep stepping until the phase reaches a terminal state.
    RunToCompletion,
}

impl StepMode {
    pub fn toggled(self) -> StepMode {
        match self {
            StepMode::Single => StepMode::RunToCompletion,
            StepMode::RunToCompletion => StepMode::Single,
        }
    }
}

/// Which neighbours a cell has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// 4-neighbourhood: up, down, left, right.
    #[default]
    Orthogonal,
    /// 8-neighbourhood. Diagonal moves may not cut a blocked corner.
    Diagonal,
}

impl Connectivity {
    /// The neighbours of `point` for which `passable` holds. Orthogonal neighbours come first
    /// (north, south, west, east), followed by diagonal ones when enabled.
    pub fn neighbourhood<F>(self, point: &Point, passable: F) -> Vec<Point>
    where
        F: Fn(i32, i32) -> bool,
    {
        // grid_util lists these east, south, west, north; expansion order is north first.
        let [east, south, west, north] = point.neumann_neighborhood_array();
        let mut neighbours = [north, south, west, east]
            .into_iter()
            .filter(|p| passable(p.x, p.y))
            .collect::<Vec<Point>>();
        if self == Connectivity::Diagonal {
            neighbours.extend(point.moore_neighborhood_array().into_iter().filter(|p| {
                p.x != point.x
                    && p.y != point.y
                    && passable(p.x, p.y)
                    && passable(p.x, point.y)
                    && passable(point.x, p.y)
            }));
        }
        neighbours
    }
}

/// Tunables of a search session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchSettings {
    pub connectivity: Connectivity,
    /// Re-sift a cell that is still in the open list after its cost improves. Disabling this
    /// leaves the heap order stale for that cell, which can delay or worsen the found path.
    pub resift_on_relax: bool,
    /// Sampling distance of the line-of-sight test, in cells. Non-positive values fall back to
    /// [DEFAULT_SIGHT_STEP] and values below [MIN_SIGHT_STEP] are raised to it.
    pub sight_step: f32,
}

impl Default for SearchSettings {
    fn default() -> SearchSettings {
        SearchSettings {
            connectivity: Connectivity::Orthogonal,
            resift_on_relax: true,
            sight_step: DEFAULT_SIGHT_STEP,
        }
    }
}

impl SearchSettings {
    /// Default settings, except that an open cell whose cost improves keeps its heap slot.
    pub fn without_resift() -> SearchSettings {
        SearchSettings {
            resift_on_relax: false,
            ..SearchSettings::default()
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> SearchSettings {
        self.connectivity = connectivity;
        self
    }

    pub(crate) fn effective_sight_step(&self) -> f32 {
        sanitize_sight_step(self.sight_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_neighbourhood_skips_blocked() {
        let centre = Point::new(1, 1);
        let all = Connectivity::Orthogonal.neighbourhood(&centre, |_, _| true);
        assert_eq!(
            all,
            vec![
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1)
            ]
        );
        let some = Connectivity::Orthogonal.neighbourhood(&centre, |x, _| x != 0);
        assert_eq!(some.len(), 3);
    }

    #[test]
    fn diagonal_neighbourhood_does_not_cut_corners() {
        let centre = Point::new(1, 1);
        assert_eq!(
            Connectivity::Diagonal
                .neighbourhood(&centre, |_, _| true)
                .len(),
            8
        );
        // Blocking (1, 0) removes north, north west and north east.
        let blocked = Connectivity::Diagonal.neighbourhood(&centre, |x, y| !(x == 1 && y == 0));
        assert_eq!(blocked.len(), 5);
        assert!(!blocked.contains(&Point::new(0, 0)));
        assert!(!blocked.contains(&Point::new(2, 0)));
        // Orthogonal neighbours keep their place ahead of the diagonal ones.
        assert_eq!(&blocked[..3], &[Point::new(1, 2), Point::new(0, 1), Point::new(2, 1)]);
        assert!(blocked[3..].iter().all(|p| p.x != 1 && p.y != 1));
    }

    #[test]
    fn step_mode_toggles() {
        assert_eq!(StepMode::Single.toggled(), StepMode::RunToCompletion);
        assert_eq!(StepMode::RunToCompletion.toggled(), StepMode::Single);
    }

    #[test]
    fn invalid_sight_step_falls_back() {
        let mut settings = SearchSettings::default();
        settings.sight_step = 0.0;
        assert_eq!(settings.effective_sight_step(), DEFAULT_SIGHT_STEP);
        settings.sight_step = f32::NAN;
        assert_eq!(settings.effective_sight_step(), DEFAULT_SIGHT_STEP);
        settings.sight_step = 0.25;
        assert_eq!(settings.effective_sight_step(), 0.25);
        settings.sight_step = 1e-9;
        assert_eq!(settings.effective_sight_step(), MIN_SIGHT_STEP);
        assert_eq!(sanitize_sight_step(f32::INFINITY), DEFAULT_SIGHT_STEP);
    }
}
