//! Property tests: whatever increment is requested, the explicit steppers only
//! ever hold one inside their stability bound.

use pdelab::{
    grid::{ Boundary1, Edges, Grid1, Grid2 },
    heat::{ Boundary2, Heat1, Heat2 },
    stability::{ MAX_COURANT, MAX_DIFFUSION, SAFETY },
    wave::Wave,
};
use proptest::prelude::*;

const EPS: f64 = 1e-12;

proptest! {
    #[test]
    fn heat1_ratio_bounded(
        n in 3_usize..400,
        length in 0.01_f64..100.0,
        alpha in 1e-4_f64..100.0,
        dt in 1e-8_f64..10.0,
    ) {
        let grid = Grid1::new(n, length).unwrap();
        let stepper = Heat1::new(grid, alpha, Some(dt), Boundary1::zero()).unwrap();
        prop_assert!(stepper.ratio() <= MAX_DIFFUSION + EPS);
        prop_assert!(stepper.dt() <= dt);
        if stepper.rescaled() {
            prop_assert!((stepper.ratio() - SAFETY * MAX_DIFFUSION).abs() < 1e-9);
        } else {
            prop_assert_eq!(stepper.dt(), dt);
        }
    }
}

proptest! {
    #[test]
    fn heat2_ratio_bounded(
        nx in 3_usize..120,
        ny in 3_usize..120,
        alpha in 1e-4_f64..100.0,
        dt in 1e-8_f64..10.0,
    ) {
        let grid = Grid2::new(nx, 1.0, ny, 2.0).unwrap();
        let stepper = Heat2::new(grid, alpha, Some(dt), Boundary2::Fixed(Edges::zero()))
            .unwrap();
        let r = stepper.alpha() * stepper.dt()
            * (grid.dx().powi(-2) + grid.dy().powi(-2));
        prop_assert!(r <= MAX_DIFFUSION + EPS);
        prop_assert!((stepper.ratio() - r).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn wave_courant_bounded_and_duration_covered(
        n in 3_usize..400,
        c in 1e-3_f64..100.0,
        duration in 1e-3_f64..10.0,
        steps in 1_usize..5000,
    ) {
        let grid = Grid1::unit(n).unwrap();
        let stepper = Wave::new(grid, c, duration, steps).unwrap();
        prop_assert!(stepper.courant() <= MAX_COURANT + EPS);
        prop_assert!(stepper.steps() as f64 * stepper.dt() >= duration * (1.0 - 1e-12));
        if !stepper.rescaled() {
            prop_assert_eq!(stepper.steps(), steps);
        }
    }
}

#[test]
fn derived_increments_sit_at_the_safety_margin() {
    let grid = Grid1::unit(101).unwrap();
    let heat = Heat1::new(grid, 0.5, None, Boundary1::zero()).unwrap();
    assert!((heat.ratio() - 0.45).abs() < 1e-12);
    assert!(!heat.rescaled());

    let grid2 = Grid2::square(61, 1.0).unwrap();
    let heat2 = Heat2::new(grid2, 0.2, None, Boundary2::Fixed(Edges::zero())).unwrap();
    assert!((heat2.ratio() - 0.45).abs() < 1e-12);
}
