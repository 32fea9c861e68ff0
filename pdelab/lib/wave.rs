//! Leapfrog integration of the 1D wave equation `∂²u/∂t² = c² ∂²u/∂x²` on a
//! string with fixed ends.
//!
//! ```text
//! u⁺[i] = 2 u[i] - u⁻[i] + C² (u[i+1] - 2 u[i] + u[i-1]),    C = c δt / δx
//! ```
//! Three time levels are kept and rotated by swapping buffers. The string
//! starts at rest, so the previous level is initialized equal to the current
//! one.

use ndarray as nd;
use crate::{
    error::ParamError,
    grid::{ Boundary1, Cadence, Field1, Grid1, History, Run },
    stability::{ self, Clamped },
};

pub type WaveResult<T> = Result<T, ParamError>;

/// Leapfrog stepper for a string held at zero on both ends.
#[derive(Copy, Clone, Debug)]
pub struct Wave {
    grid: Grid1,
    c: f64,
    duration: f64,
    clamped: Clamped,
    steps: usize,
}

impl Wave {
    /// Create a new stepper covering `duration` in `steps` steps of wave speed
    /// `c`.
    ///
    /// If the resulting Courant number exceeds 1, the increment is rescaled and
    /// the step count extended so that the whole duration is still covered.
    pub fn new(grid: Grid1, c: f64, duration: f64, steps: usize)
        -> WaveResult<Self>
    {
        ParamError::check_coefficient(c)?;
        ParamError::check_time(duration)?;
        let steps = steps.max(1);
        let dt = duration / steps as f64;
        let (clamped, steps)
            = stability::clamp_courant(c, dt, grid.dx(), duration, steps);
        Ok(Self { grid, c, duration, clamped, steps })
    }

    /// Create a new stepper from an explicit increment and step count.
    pub fn with_dt(grid: Grid1, c: f64, dt: f64, steps: usize)
        -> WaveResult<Self>
    {
        ParamError::check_time(dt)?;
        Self::new(grid, c, dt * steps.max(1) as f64, steps)
    }

    /// Grid the stepper acts on.
    pub fn grid(&self) -> Grid1 { self.grid }

    /// Wave speed.
    pub fn speed(&self) -> f64 { self.c }

    /// Total simulated time.
    pub fn duration(&self) -> f64 { self.duration }

    /// Time increment after the stability check.
    pub fn dt(&self) -> f64 { self.clamped.dt }

    /// Courant number `c δt / δx`.
    pub fn courant(&self) -> f64 { self.clamped.ratio }

    /// `true` if the requested increment had to be rescaled.
    pub fn rescaled(&self) -> bool { self.clamped.rescaled }

    /// Number of steps after the stability check.
    pub fn steps(&self) -> usize { self.steps }

    /// Advance by one level, writing into `next`.
    ///
    /// *Panics if the arrays differ in length or are shorter than 3*.
    pub fn step(&self, prev: &Field1, cur: &Field1, next: &mut Field1) {
        let c2 = self.clamped.ratio.powi(2);
        let n = cur.len();
        nd::Zip::from(next.slice_mut(nd::s![1..n - 1]))
            .and(prev.slice(nd::s![1..n - 1]))
            .and(cur.windows(3))
            .for_each(|uk, &pk, w| {
                *uk = 2.0 * w[1] - pk + c2 * (w[2] - 2.0 * w[1] + w[0]);
            });
        Boundary1::zero().apply(next);
    }

    /// Integrate the displacement `u0` from rest, recording snapshots per
    /// `cadence`.
    pub fn run(&self, u0: Field1, cadence: Cadence) -> WaveResult<Run<Field1>> {
        self.grid.check(&u0)?;
        let steps = self.steps;
        let mut cur = u0;
        Boundary1::zero().apply(&mut cur);
        let mut prev = cur.clone();
        let mut next = cur.clone();
        let mut history = History::new(cadence);
        for k in 0..steps {
            self.step(&prev, &cur, &mut next);
            // prev <- cur, cur <- next; the old prev becomes scratch
            std::mem::swap(&mut prev, &mut cur);
            std::mem::swap(&mut cur, &mut next);
            history.observe(k, steps, &cur);
        }
        Ok(Run {
            field: cur,
            history,
            dt: self.dt(),
            ratio: self.courant(),
            steps,
        })
    }
}

/// Triangular pulse of the given `height` centred on `x0`, falling linearly to
/// zero at a distance `half_width` on either side.
pub fn triangle(grid: &Grid1, x0: f64, half_width: f64, height: f64) -> Field1 {
    grid.coords()
        .mapv(|x| height * (1.0 - (x - x0).abs() / half_width).max(0.0))
}

/// Number of points in the zoo preset.
pub const PRESET_N: usize = 100;

/// Requested number of steps in the zoo preset.
pub const PRESET_STEPS: usize = 2000;

/// Zoo preset: unit string with `c = 1` over `T = 2` in 2000 steps, plucked at
/// the middle with a triangle of height 10; five evenly spaced snapshots.
pub fn preset() -> WaveResult<Run<Field1>> {
    let grid = Grid1::unit(PRESET_N)?;
    let stepper = Wave::new(grid, 1.0, 2.0, PRESET_STEPS)?;
    let u0 = triangle(&grid, 0.5, 0.05, 10.0);
    stepper.run(u0, Cadence::spread(stepper.steps(), 5))
}
