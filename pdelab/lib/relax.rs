//! Steady-state solutions of the Laplace and Poisson equations via Jacobi
//! relaxation of the five-point stencil.
//!
//! Each sweep replaces every interior cell by the unweighted mean of its four
//! orthogonal neighbors in the *previous* iterate, plus a source contribution
//! for Poisson:
//! ```text
//! u'[i, j] = (u[i+1, j] + u[i-1, j] + u[i, j+1] + u[i, j-1] + f[i, j] h²) / 4
//! ```
//! which is the fixed point of `-∇²u = f` on square cells of side `h`.
//! Reading and writing separate buffers makes the result independent of the
//! traversal order. Relaxation runs for a fixed number of sweeps with no
//! convergence check, so the result is visually stable rather than converged.

use ndarray as nd;
use crate::{
    Arr2,
    grid::{ Edges, Field2, Grid2, GridResult },
    utils::neighbor_sum,
    error::GridError,
};

/// Grid size used by the zoo presets.
pub const PRESET_N: usize = 50;

/// Number of sweeps for the Laplace preset.
pub const LAPLACE_SWEEPS: usize = 500;

/// Number of sweeps for the Poisson preset.
pub const POISSON_SWEEPS: usize = 1000;

/// Perform a single Jacobi sweep from `prev` into `next`.
///
/// Edge values are copied over unchanged. `source` is scaled by `h2`, the
/// squared cell size.
///
/// *Panics if `next` and `prev` (or `source`) have different shapes*.
pub fn sweep<S, T>(
    prev: &Arr2<S>,
    next: &mut Field2,
    source: Option<&Arr2<T>>,
    h2: f64,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (nr, nc) = prev.dim();
    assert_eq!(next.dim(), (nr, nc));
    next.row_mut(0).assign(&prev.row(0));
    next.row_mut(nr - 1).assign(&prev.row(nr - 1));
    next.column_mut(0).assign(&prev.column(0));
    next.column_mut(nc - 1).assign(&prev.column(nc - 1));
    for i in 1..nr - 1 {
        for j in 1..nc - 1 {
            let f = source.map(|f| f[[i, j]] * h2).unwrap_or(0.0);
            next[[i, j]] = 0.25 * (neighbor_sum(prev, i, j) + f);
        }
    }
}

/// Relax `u0` for a fixed number of sweeps, reapplying `edges` after each one.
///
/// Assumes square cells; the source, if any, is scaled by `dx * dy`.
pub fn relax(
    grid: &Grid2,
    u0: Field2,
    edges: Edges,
    source: Option<&Field2>,
    sweeps: usize,
) -> GridResult<Field2>
{
    grid.check(&u0)?;
    if let Some(f) = source { grid.check(f)?; }
    let h2 = grid.dx() * grid.dy();
    let mut cur = u0;
    edges.apply(&mut cur);
    let mut next = cur.clone();
    for _ in 0..sweeps {
        sweep(&cur, &mut next, source, h2);
        edges.apply(&mut next);
        std::mem::swap(&mut cur, &mut next);
    }
    Ok(cur)
}

/// Solve the Laplace equation on an `n × n` grid with fixed edge values,
/// starting from a zero interior.
pub fn laplace(n: usize, edges: Edges, sweeps: usize) -> GridResult<Field2> {
    let grid = Grid2::square(n, 1.0)?;
    relax(&grid, grid.zeros(), edges, None, sweeps)
}

/// Solve the Poisson equation `-∇²u = f` on `grid` with fixed edge values,
/// starting from a zero interior.
pub fn poisson(grid: &Grid2, edges: Edges, source: &Field2, sweeps: usize)
    -> GridResult<Field2>
{
    relax(grid, grid.zeros(), edges, Some(source), sweeps)
}

/// Zoo preset: 50 × 50 grid, top edge held at 100 and the others at 0, 500
/// sweeps.
pub fn laplace_preset() -> GridResult<Field2> {
    let edges = Edges { top: 100.0, ..Edges::zero() };
    laplace(PRESET_N, edges, LAPLACE_SWEEPS)
}

/// Source term for the Poisson preset: a positive unit of strength 100 at
/// `(n/3, n/3)` and a negative one at `(2n/3, 2n/3)`.
pub fn dipole_source(n: usize) -> GridResult<Field2> {
    GridError::check_points(n)?;
    let mut f: Field2 = nd::Array2::zeros((n, n));
    f[[n / 3, n / 3]] = 100.0;
    f[[2 * n / 3, 2 * n / 3]] = -100.0;
    Ok(f)
}

/// Zoo preset: 50 × 50 grid with unit spacing, zero edges, a source/sink pair,
/// 1000 sweeps.
pub fn poisson_preset() -> GridResult<Field2> {
    let n = PRESET_N;
    let grid = Grid2::square(n, (n - 1) as f64)?;
    let f = dipole_source(n)?;
    poisson(&grid, Edges::zero(), &f, POISSON_SWEEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_reads_previous_iterate_only() {
        let prev = nd::Array2::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as f64);
        let mut next: Field2 = nd::Array2::zeros((4, 4));
        sweep(&prev, &mut next, None::<&Field2>, 1.0);
        for i in 1..3 {
            for j in 1..3 {
                let expected = 0.25 * (
                    prev[[i + 1, j]] + prev[[i - 1, j]]
                    + prev[[i, j + 1]] + prev[[i, j - 1]]
                );
                assert_eq!(next[[i, j]], expected);
            }
        }
        assert_eq!(next.row(0), prev.row(0));
        assert_eq!(next.row(3), prev.row(3));
        assert_eq!(next.column(0), prev.column(0));
        assert_eq!(next.column(3), prev.column(3));
    }

    #[test]
    fn laplace_bounded_by_edges() {
        let edges = Edges { top: 100.0, ..Edges::zero() };
        let u = laplace(30, edges, 400).unwrap();
        assert!(edges.holds(&u));
        assert!(u.iter().all(|&v| (0.0..=100.0).contains(&v)));
        // heat flows downward from the hot edge
        assert!(u[[1, 15]] > u[[15, 15]]);
        assert!(u[[15, 15]] > u[[28, 15]]);
    }

    #[test]
    fn poisson_zero_source_is_laplace() {
        let grid = Grid2::square(12, 1.0).unwrap();
        let edges = Edges { left: 5.0, ..Edges::zero() };
        let a = poisson(&grid, edges, &grid.zeros(), 50).unwrap();
        let b = laplace(12, edges, 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn poisson_dipole_signs() {
        let n = 21;
        let grid = Grid2::square(n, (n - 1) as f64).unwrap();
        let f = dipole_source(n).unwrap();
        let u = poisson(&grid, Edges::zero(), &f, 300).unwrap();
        assert!(Edges::zero().holds(&u));
        assert!(u[[n / 3, n / 3]] > 0.0);
        assert!(u[[2 * n / 3, 2 * n / 3]] < 0.0);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let grid = Grid2::square(5, 1.0).unwrap();
        let bad = nd::Array2::zeros((5, 6));
        assert!(relax(&grid, bad, Edges::zero(), None, 1).is_err());
    }
}
