//! Illustrative lid-driven cavity flow in vorticity–streamfunction form.
//!
//! This is a qualitative picture, not a Navier–Stokes solver: each iteration
//! relaxes the vorticity `ω` by plain neighbor averaging, relaxes the
//! streamfunction `ψ` against `∇²ψ = -ω` with unit spacing, and then resets the
//! boundaries, with the moving lid entering through the vorticity of the last
//! row:
//! ```text
//! ω[n-1, j] = 2 (ψ[n-2, j] - ψ[n-1, j]) / h² + U
//! ```
//! Velocities are recovered afterward by central differences of `ψ`.
//!
//! The lid feedback is undamped, so magnitudes keep growing with the iteration
//! count; only the circulation pattern is meaningful.

use ndarray as nd;
use crate::{
    error::{ GridError, ParamError },
    grid::{ Edges, Field2, Grid2 },
    relax,
};

pub type CavityResult<T> = Result<T, ParamError>;

/// Grid size used by the zoo preset.
pub const PRESET_N: usize = 41;

/// Number of iterations used by the zoo preset.
pub const PRESET_ITERS: usize = 500;

/// Kinematic viscosity used by the zoo preset.
pub const PRESET_NU: f64 = 0.1;

/// Lid speed.
pub const LID_SPEED: f64 = 10.0;

/// Output of a cavity iteration.
#[derive(Clone, Debug)]
pub struct Flow {
    /// Streamfunction.
    pub psi: Field2,
    /// Vorticity.
    pub omega: Field2,
    /// Velocity along axis 1, `∂ψ/∂y`.
    pub u: Field2,
    /// Velocity along axis 0, `-∂ψ/∂x`.
    pub v: Field2,
    /// Nominal Reynolds number `1 / ν`.
    pub reynolds: f64,
}

/// Fixed-iteration cavity solver.
#[derive(Copy, Clone, Debug)]
pub struct Cavity {
    n: usize,
    iters: usize,
    nu: f64,
    lid: f64,
}

impl Cavity {
    /// Create a new solver for an `n × n` cavity.
    pub fn new(n: usize, iters: usize, nu: f64) -> CavityResult<Self> {
        GridError::check_points(n)?;
        ParamError::check_coefficient(nu)?;
        Ok(Self { n, iters, nu, lid: LID_SPEED })
    }

    /// Set the lid speed.
    pub fn with_lid(mut self, lid: f64) -> Self {
        self.lid = lid;
        self
    }

    /// Grid size.
    pub fn n(&self) -> usize { self.n }

    /// Nominal Reynolds number `1 / ν`.
    pub fn reynolds(&self) -> f64 { self.nu.recip() }

    // streamfunction held at zero on every edge; vorticity zero except on the
    // lid row
    fn apply_boundaries(&self, psi: &mut Field2, omega: &mut Field2) {
        let n = self.n;
        Edges::zero().apply(psi);
        omega.column_mut(0).fill(0.0);
        omega.column_mut(n - 1).fill(0.0);
        omega.row_mut(0).fill(0.0);
        let lid = (&psi.row(n - 2) - &psi.row(n - 1)) * 2.0 + self.lid;
        omega.row_mut(n - 1).assign(&lid);
    }

    /// Run the iteration from a fluid at rest.
    pub fn run(&self) -> Flow {
        let n = self.n;
        let mut psi: Field2 = nd::Array2::zeros((n, n));
        let mut omega: Field2 = nd::Array2::zeros((n, n));
        let mut psi_next = psi.clone();
        let mut omega_next = omega.clone();
        for _ in 0..self.iters {
            relax::sweep(&omega, &mut omega_next, None::<&Field2>, 1.0);
            std::mem::swap(&mut omega, &mut omega_next);
            relax::sweep(&psi, &mut psi_next, Some(&omega), 1.0);
            std::mem::swap(&mut psi, &mut psi_next);
            self.apply_boundaries(&mut psi, &mut omega);
        }
        let (u, v) = velocities(&psi);
        Flow { psi, omega, u, v, reynolds: self.reynolds() }
    }
}

/// Velocity components from a streamfunction by central differences on the
/// interior; edges are zero.
pub fn velocities(psi: &Field2) -> (Field2, Field2) {
    let (nr, nc) = psi.dim();
    let mut u: Field2 = nd::Array2::zeros((nr, nc));
    let mut v: Field2 = nd::Array2::zeros((nr, nc));
    for i in 1..nr.saturating_sub(1) {
        for j in 1..nc.saturating_sub(1) {
            u[[i, j]] = (psi[[i, j + 1]] - psi[[i, j - 1]]) / 2.0;
            v[[i, j]] = -(psi[[i + 1, j]] - psi[[i - 1, j]]) / 2.0;
        }
    }
    (u, v)
}

/// Zoo preset: 41 × 41 cavity, 500 iterations, `ν = 0.1`.
pub fn preset() -> CavityResult<Flow> {
    Ok(Cavity::new(PRESET_N, PRESET_ITERS, PRESET_NU)?.run())
}

/// Grid matching the zoo preset, with unit spacing.
pub fn preset_grid() -> CavityResult<Grid2> {
    Ok(Grid2::square(PRESET_N, (PRESET_N - 1) as f64)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_after_run() {
        let c = Cavity::new(15, 60, 0.1).unwrap();
        let flow = c.run();
        assert!(Edges::zero().holds(&flow.psi));
        assert!(flow.omega.column(0).iter().skip(1).take(13).all(|&w| w == 0.0));
        assert!(flow.omega.row(0).iter().all(|&w| w == 0.0));
        for j in 0..15 {
            let expected = 2.0 * (flow.psi[[13, j]] - flow.psi[[14, j]]) + LID_SPEED;
            assert_eq!(flow.omega[[14, j]], expected);
        }
    }

    #[test]
    fn lid_drives_circulation() {
        let flow = Cavity::new(21, 200, 0.1).unwrap().run();
        assert!(flow.psi.iter().all(|p| p.is_finite()));
        // vorticity injected at the lid diffuses into the streamfunction
        assert!(flow.psi[[18, 10]] > 0.0);
        assert!(flow.psi[[18, 10]] > flow.psi[[5, 10]]);
        assert_eq!(flow.reynolds, 10.0);
    }

    #[test]
    fn velocity_of_linear_streamfunction() {
        let psi = nd::Array2::from_shape_fn((5, 5), |(i, j)| 3.0 * j as f64 - i as f64);
        let (u, v) = velocities(&psi);
        assert_eq!(u[[2, 2]], 3.0);
        assert_eq!(v[[2, 2]], 1.0);
        assert_eq!(u[[0, 2]], 0.0);
    }

    #[test]
    fn bad_viscosity_rejected() {
        assert!(Cavity::new(10, 1, 0.0).is_err());
        assert!(Cavity::new(2, 1, 0.1).is_err());
    }
}
