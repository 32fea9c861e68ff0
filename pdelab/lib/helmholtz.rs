//! Steady wave field of the Helmholtz equation `-∇²u + k²u = f` on a square
//! grid, via a direct dense solve.
//!
//! The five-point stencil (unit spacing) over an `n × n` grid gives an
//! `n² × n²` system in row-major flattened unknowns `idx = i n + j`:
//! ```text
//! interior:  (4 + k²) u[i, j] - u[i+1, j] - u[i-1, j] - u[i, j+1] - u[i, j-1] = f[i, j]
//! boundary:  u[i, j] = f[i, j]
//! ```
//! The matrix is stored densely, so memory grows as `n⁴`.

use ndarray as nd;
use ndarray_linalg::Solve;
use crate::{
    Arr1,
    Arr2,
    error::GridError,
    grid::{ Field1, Field2, GridResult },
};

/// Grid size used by the zoo preset.
pub const PRESET_N: usize = 50;

/// Wavenumber used by the zoo preset.
pub const PRESET_K: f64 = 5.0;

/// Assemble the dense Helmholtz operator for an `n × n` grid with wavenumber
/// `k`. Boundary rows are identity rows, fixing the boundary to the right-hand
/// side.
pub fn assemble(n: usize, k: f64) -> GridResult<Field2> {
    GridError::check_points(n)?;
    let idx = |i: usize, j: usize| i * n + j;
    let mut a: Field2 = nd::Array2::zeros((n * n, n * n));
    for i in 0..n {
        for j in 0..n {
            let r = idx(i, j);
            if i == 0 || i == n - 1 || j == 0 || j == n - 1 {
                a[[r, r]] = 1.0;
                continue;
            }
            a[[r, r]] = 4.0 + k.powi(2);
            a[[r, idx(i + 1, j)]] = -1.0;
            a[[r, idx(i - 1, j)]] = -1.0;
            a[[r, idx(i, j + 1)]] = -1.0;
            a[[r, idx(i, j - 1)]] = -1.0;
        }
    }
    Ok(a)
}

/// Right-hand side with a unit source at grid point `at` and zeros elsewhere.
pub fn point_source(n: usize, at: (usize, usize)) -> GridResult<Field1> {
    GridError::check_points(n)?;
    let mut b: Field1 = nd::Array1::zeros(n * n);
    let (i, j) = at;
    if i < n && j < n { b[i * n + j] = 1.0; }
    Ok(b)
}

/// Solve `a x = b` by LU factorization.
///
/// A singular (or otherwise unsolvable) system, or a solution containing
/// non-finite values, is logged and replaced by all zeros.
pub fn solve<S, T>(a: &Arr2<S>, b: &Arr1<T>) -> Field1
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    match a.solve(b) {
        Ok(x) if x.iter().all(|xk| xk.is_finite()) => x,
        Ok(_) => {
            log::warn!("helmholtz::solve: non-finite solution; returning zeros");
            nd::Array1::zeros(b.len())
        },
        Err(err) => {
            log::warn!("helmholtz::solve: {err}; returning zeros");
            nd::Array1::zeros(b.len())
        },
    }
}

/// Assemble and solve for an `n × n` field with a unit point source at `at`.
pub fn field(n: usize, k: f64, at: (usize, usize)) -> GridResult<Field2> {
    let a = assemble(n, k)?;
    let b = point_source(n, at)?;
    let x = solve(&a, &b);
    x.into_shape((n, n))
        .map_err(|_| GridError::Shape(vec![n * n], vec![n, n]))
}

/// Zoo preset: 50 × 50 grid, `k = 5`, unit source at the centre.
///
/// The source sits on the interior node `(25, 25)`, not on the edge node
/// `(25, 0)` that a flattened index of `N² / 2` would address.
pub fn preset() -> GridResult<Field2> {
    let n = PRESET_N;
    field(n, PRESET_K, (n / 2, n / 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembled_rows() {
        let n = 4;
        let a = assemble(n, 2.0).unwrap();
        // boundary row
        assert_eq!(a.row(1).sum(), 1.0);
        assert_eq!(a[[1, 1]], 1.0);
        // interior row (1, 1)
        let r = n + 1;
        assert_eq!(a[[r, r]], 8.0);
        assert_eq!(a.row(r).iter().filter(|&&v| v == -1.0).count(), 4);
        assert_eq!(a.row(r).sum(), 4.0);
    }

    #[test]
    fn zero_rhs_gives_zero() {
        let n = 8;
        let a = assemble(n, PRESET_K).unwrap();
        let x = solve(&a, &nd::Array1::zeros(n * n));
        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn singular_system_gives_zeros() {
        let a: Field2 = nd::Array2::zeros((9, 9));
        let b: Field1 = nd::Array1::ones(9);
        let x = solve(&a, &b);
        assert_eq!(x, nd::Array1::<f64>::zeros(9));
    }

    #[test]
    fn point_source_response() {
        let n = 11;
        let u = field(n, 1.0, (5, 5)).unwrap();
        assert_eq!(u.dim(), (n, n));
        assert!(u.row(0).iter().all(|&v| v == 0.0));
        let peak = u[[5, 5]];
        assert!(peak > 0.0);
        assert!(u.iter().all(|&v| v <= peak));
        // satisfies the stencil at the source
        let lhs = 5.0 * peak - u[[4, 5]] - u[[6, 5]] - u[[5, 4]] - u[[5, 6]];
        assert!((lhs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn source_outside_grid_ignored() {
        let b = point_source(3, (3, 0)).unwrap();
        assert_eq!(b.sum(), 0.0);
    }
}
