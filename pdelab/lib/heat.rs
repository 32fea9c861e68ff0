//! Explicit forward-time, central-space (FTCS) integration of the heat
//! equation `∂u/∂t = α ∇²u` in one and two dimensions.
//!
//! ```text
//! 1D:  u'[i]    = u[i] + r (u[i+1] - 2 u[i] + u[i-1]),          r = α δt / δx²
//! 2D:  u'[i, j] = u[i, j] + α δt (δ²ₓu / δx² + δ²ᵧu / δy²)
//! ```
//! The time increment is derived or clamped by [`stability`][crate::stability]
//! when the stepper is built, so a stepper can only ever hold a stable
//! increment. Boundaries are reapplied after every step.

use ndarray as nd;
use crate::{
    error::ParamError,
    grid::{ Boundary1, Cadence, Edges, Field1, Field2, Grid1, Grid2, History, Run },
    stability::{ self, Clamped },
    utils::{ laplacian_2d, second_diff },
};

pub type HeatResult<T> = Result<T, ParamError>;

/// Explicit 1D heat stepper.
#[derive(Copy, Clone, Debug)]
pub struct Heat1 {
    grid: Grid1,
    alpha: f64,
    boundary: Boundary1,
    clamped: Clamped,
}

impl Heat1 {
    /// Create a new stepper.
    ///
    /// If `dt` is `None`, the increment is derived from the stability bound;
    /// otherwise it is rescaled if it would violate it.
    pub fn new(grid: Grid1, alpha: f64, dt: Option<f64>, boundary: Boundary1)
        -> HeatResult<Self>
    {
        ParamError::check_coefficient(alpha)?;
        let clamped = match dt {
            Some(dt) => {
                ParamError::check_time(dt)?;
                stability::clamp_diffusion(alpha, dt, grid.dx())
            },
            None => {
                let dt = stability::diffusion_dt(alpha, grid.dx());
                Clamped {
                    dt,
                    ratio: stability::diffusion_number(alpha, dt, grid.dx()),
                    rescaled: false,
                }
            },
        };
        Ok(Self { grid, alpha, boundary, clamped })
    }

    /// Grid the stepper acts on.
    pub fn grid(&self) -> Grid1 { self.grid }

    /// Diffusion coefficient.
    pub fn alpha(&self) -> f64 { self.alpha }

    /// Boundary condition.
    pub fn boundary(&self) -> Boundary1 { self.boundary }

    /// Time increment after the stability check.
    pub fn dt(&self) -> f64 { self.clamped.dt }

    /// Diffusion number `α δt / δx²`.
    pub fn ratio(&self) -> f64 { self.clamped.ratio }

    /// `true` if the requested increment had to be rescaled.
    pub fn rescaled(&self) -> bool { self.clamped.rescaled }

    /// Take one step from `cur` into `next`.
    ///
    /// *Panics if the arrays are shorter than 3 or differ in length*.
    pub fn step(&self, cur: &Field1, next: &mut Field1) {
        let r = self.clamped.ratio;
        let n = cur.len();
        nd::Zip::from(next.slice_mut(nd::s![1..n - 1]))
            .and(cur.windows(3))
            .for_each(|uk, w| { *uk = w[1] + r * second_diff(&w, 1); });
        self.boundary.apply(next);
    }

    /// Integrate `u0` over `steps` steps, recording snapshots per `cadence`.
    pub fn run(&self, u0: Field1, steps: usize, cadence: Cadence)
        -> HeatResult<Run<Field1>>
    {
        self.grid.check(&u0)?;
        let mut cur = u0;
        self.boundary.apply(&mut cur);
        let mut next = cur.clone();
        let mut history = History::new(cadence);
        for k in 0..steps {
            self.step(&cur, &mut next);
            std::mem::swap(&mut cur, &mut next);
            history.observe(k, steps, &cur);
        }
        Ok(Run {
            field: cur,
            history,
            dt: self.dt(),
            ratio: self.ratio(),
            steps,
        })
    }
}

/// Boundary treatment for the 2D stepper.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Boundary2 {
    /// Fixed edge values, reapplied after every step.
    Fixed(Edges),
    /// Selectable, but not applied: edges keep their initial values.
    Insulated,
    /// Selectable, but not applied: edges keep their initial values.
    Periodic,
}

impl Boundary2 {
    /// Return `true` if `self` is `Fixed`.
    pub fn is_fixed(&self) -> bool { matches!(self, Self::Fixed(_)) }

    fn apply(&self, u: &mut Field2) {
        if let Self::Fixed(edges) = self { edges.apply(u); }
    }
}

/// Explicit 2D heat stepper.
#[derive(Copy, Clone, Debug)]
pub struct Heat2 {
    grid: Grid2,
    alpha: f64,
    boundary: Boundary2,
    clamped: Clamped,
}

impl Heat2 {
    /// Create a new stepper.
    ///
    /// If `dt` is `None`, the increment is derived from the two-axis stability
    /// bound; otherwise it is rescaled if it would violate it.
    pub fn new(grid: Grid2, alpha: f64, dt: Option<f64>, boundary: Boundary2)
        -> HeatResult<Self>
    {
        ParamError::check_coefficient(alpha)?;
        let (dx, dy) = (grid.dx(), grid.dy());
        let clamped = match dt {
            Some(dt) => {
                ParamError::check_time(dt)?;
                stability::clamp_diffusion_2d(alpha, dt, dx, dy)
            },
            None => {
                let dt = stability::diffusion_dt_2d(alpha, dx, dy);
                Clamped {
                    dt,
                    ratio: stability::diffusion_number_2d(alpha, dt, dx, dy),
                    rescaled: false,
                }
            },
        };
        if !boundary.is_fixed() {
            log::warn!(
                "heat::Heat2::new: {boundary:?} boundaries are not applied; \
                edges keep their initial values"
            );
        }
        Ok(Self { grid, alpha, boundary, clamped })
    }

    /// Grid the stepper acts on.
    pub fn grid(&self) -> Grid2 { self.grid }

    /// Diffusion coefficient.
    pub fn alpha(&self) -> f64 { self.alpha }

    /// Boundary treatment.
    pub fn boundary(&self) -> Boundary2 { self.boundary }

    /// Time increment after the stability check.
    pub fn dt(&self) -> f64 { self.clamped.dt }

    /// Generalized diffusion number `α δt (1/δx² + 1/δy²)`.
    pub fn ratio(&self) -> f64 { self.clamped.ratio }

    /// `true` if the requested increment had to be rescaled.
    pub fn rescaled(&self) -> bool { self.clamped.rescaled }

    /// Take one step from `cur` into `next`.
    ///
    /// Edge values of `next` are only written for [`Boundary2::Fixed`].
    pub fn step(&self, cur: &Field2, next: &mut Field2) {
        let adt = self.alpha * self.clamped.dt;
        let (dx, dy) = (self.grid.dx(), self.grid.dy());
        nd::Zip::from(next.slice_mut(nd::s![1..-1, 1..-1]))
            .and(cur.windows((3, 3)))
            .for_each(|uij, w| {
                *uij = w[[1, 1]] + adt * laplacian_2d(&w, 1, 1, dx, dy);
            });
        self.boundary.apply(next);
    }

    /// Integrate `u0` over `steps` steps, recording snapshots per `cadence`.
    pub fn run(&self, u0: Field2, steps: usize, cadence: Cadence)
        -> HeatResult<Run<Field2>>
    {
        self.grid.check(&u0)?;
        let mut cur = u0;
        self.boundary.apply(&mut cur);
        let mut next = cur.clone();
        let mut history = History::new(cadence);
        for k in 0..steps {
            self.step(&cur, &mut next);
            std::mem::swap(&mut cur, &mut next);
            history.observe(k, steps, &cur);
        }
        Ok(Run {
            field: cur,
            history,
            dt: self.dt(),
            ratio: self.ratio(),
            steps,
        })
    }
}

/// Number of points in the zoo preset.
pub const PRESET_N: usize = 50;

/// Number of steps in the zoo preset.
pub const PRESET_STEPS: usize = 1000;

/// Zoo preset: 50 points over the unit interval, α = 0.01, δt = 1/1000, 1000
/// steps, a plateau of 100 over indices 20..30, both ends held at zero; five
/// snapshots (four evenly spaced plus the last).
pub fn preset() -> HeatResult<Run<Field1>> {
    let grid = Grid1::unit(PRESET_N)?;
    let stepper = Heat1::new(
        grid,
        0.01,
        Some(1.0 / PRESET_STEPS as f64),
        Boundary1::zero(),
    )?;
    let mut u0 = grid.zeros();
    u0.slice_mut(nd::s![20..30]).fill(100.0);
    stepper.run(u0, PRESET_STEPS, Cadence::spread(PRESET_STEPS, 4).with_last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_increment_is_stable() {
        let grid = Grid1::unit(100).unwrap();
        let h = Heat1::new(grid, 0.5, None, Boundary1::zero()).unwrap();
        assert!((h.ratio() - 0.45).abs() < 1e-12);
        assert!(!h.rescaled());
    }

    #[test]
    fn requested_increment_rescaled() {
        let grid = Grid1::unit(11).unwrap();
        let h = Heat1::new(grid, 1.0, Some(1.0), Boundary1::zero()).unwrap();
        assert!(h.rescaled());
        assert!(h.ratio() <= stability::MAX_DIFFUSION);
    }

    #[test]
    fn bad_coefficient_rejected() {
        let grid = Grid1::unit(11).unwrap();
        assert!(Heat1::new(grid, 0.0, None, Boundary1::zero()).is_err());
        assert!(Heat1::new(grid, 1.0, Some(-1.0), Boundary1::zero()).is_err());
    }

    #[test]
    fn single_step_matches_stencil() {
        let grid = Grid1::new(5, 4.0).unwrap();
        let h = Heat1::new(grid, 0.25, Some(1.0), Boundary1::zero()).unwrap();
        let cur = nd::array![0.0, 0.0, 4.0, 0.0, 0.0];
        let mut next = cur.clone();
        h.step(&cur, &mut next);
        assert_eq!(next, nd::array![0.0, 1.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn boundary_held_every_step() {
        let grid = Grid1::unit(21).unwrap();
        let bc = Boundary1::Dirichlet { left: 1.5, right: -0.25 };
        let h = Heat1::new(grid, 1.0, None, bc).unwrap();
        let run = h.run(grid.coords(), 40, Cadence::every(1)).unwrap();
        assert_eq!(run.history.len(), 40);
        assert!(run.history.iter().all(|s| bc.holds(&s.field)));
    }

    #[test]
    fn heat_spreads_and_decays() {
        let run = preset().unwrap();
        assert_eq!(run.history.len(), 5);
        let peak0 = 100.0;
        let peak = run.field.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(peak < peak0);
        assert!(run.field[10] > 0.0);
    }

    #[test]
    fn heat2_fixed_edges_held() {
        let grid = Grid2::new(12, 1.0, 9, 1.0).unwrap();
        let edges = Edges { top: 3.0, ..Edges::zero() };
        let h = Heat2::new(grid, 0.2, None, Boundary2::Fixed(edges)).unwrap();
        let u0 = nd::Array2::from_elem(grid.shape(), 50.0);
        let run = h.run(u0, 30, Cadence::every(1)).unwrap();
        assert!(run.history.iter().all(|s| edges.holds(&s.field)));
        assert!((h.ratio() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn heat2_unapplied_boundary_keeps_initial_edges() {
        let grid = Grid2::square(10, 1.0).unwrap();
        let h = Heat2::new(grid, 0.2, None, Boundary2::Periodic).unwrap();
        let u0 = nd::Array2::from_shape_fn(grid.shape(), |(i, j)| (i + j) as f64);
        let run = h.run(u0.clone(), 25, Cadence::never()).unwrap();
        assert!(run.history.is_empty());
        assert_eq!(run.field.row(0), u0.row(0));
        assert_eq!(run.field.column(9), u0.column(9));
    }
}
