//! The equation zoo: seven classic PDEs, each with its formula, a short
//! description, and a preset simulation that renders to a [`Plot`].

use crate::{
    cavity,
    error::ParamError,
    grid::Grid1,
    heat,
    helmholtz,
    plot::{ Curve, Labels, Palette, Plot, Range },
    relax,
    schrodinger,
    wave,
};

pub type ZooResult<T> = Result<T, ParamError>;

/// Grouping of the zoo entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Time-independent equations.
    Static,
    /// Time-dependent equations.
    Dynamic,
}

impl Tab {
    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Static => "静态方程 (Time-Independent)",
            Self::Dynamic => "动态方程 (Time-Dependent)",
        }
    }
}

/// An entry in the zoo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Equation {
    Laplace,
    Poisson,
    Helmholtz,
    Heat,
    Wave,
    NavierStokes,
    Schrodinger,
}

impl Equation {
    /// Every entry, in display order.
    pub const ALL: [Self; 7] = [
        Self::Laplace,
        Self::Poisson,
        Self::Helmholtz,
        Self::Heat,
        Self::Wave,
        Self::NavierStokes,
        Self::Schrodinger,
    ];

    /// All entries on a given tab, in display order.
    pub fn on_tab(tab: Tab) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |eq| eq.tab() == tab)
    }

    /// Short ASCII identifier, suitable for file names and command lines.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Laplace => "laplace",
            Self::Poisson => "poisson",
            Self::Helmholtz => "helmholtz",
            Self::Heat => "heat",
            Self::Wave => "wave",
            Self::NavierStokes => "navier-stokes",
            Self::Schrodinger => "schrodinger",
        }
    }

    /// Look up an entry by [`key`][Self::key].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|eq| eq.key() == key)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Laplace => "拉普拉斯方程 (Laplace Equation)",
            Self::Poisson => "泊松方程 (Poisson Equation)",
            Self::Helmholtz => "亥姆霍兹方程 (Helmholtz Equation)",
            Self::Heat => "热传导方程 (Heat Equation)",
            Self::Wave => "波动方程 (Wave Equation)",
            Self::NavierStokes => "纳维-斯托克斯方程 (Navier-Stokes)",
            Self::Schrodinger => "薛定谔方程 (Schrödinger Equation)",
        }
    }

    /// Governing equation in LaTeX.
    pub fn formula(&self) -> &'static str {
        match self {
            Self::Laplace => r"\nabla^2 u = 0",
            Self::Poisson => r"\nabla^2 u = f(\mathbf{x})",
            Self::Helmholtz => r"(\nabla^2 + k^2) u = 0",
            Self::Heat => r"\frac{\partial u}{\partial t} = \alpha \nabla^2 u",
            Self::Wave => r"\frac{\partial^2 u}{\partial t^2} = c^2 \nabla^2 u",
            Self::NavierStokes => {
                r"\rho \left( \frac{\partial \mathbf{u}}{\partial t} + \mathbf{u} \cdot \nabla \mathbf{u} \right) = - \nabla p + \mu \nabla^2 \mathbf{u} + \mathbf{f}"
            },
            Self::Schrodinger => r"i\hbar \frac{\partial \Psi}{\partial t} = \hat{H} \Psi",
        }
    }

    /// One-line description.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Laplace => "描述: 在无源区域内的**稳态**分布，例如静电势、稳态温度分布。",
            Self::Poisson => r"描述: 在有源区域内的分布，例如由电荷密度 $f(\mathbf{x})$ 产生的静电势。",
            Self::Helmholtz => "描述: 波动方程在**频域**上的形式，用于研究声波和电磁波的稳态传播和散射问题。",
            Self::Heat => r"描述: 热量或物质如何在介质中扩散。$\alpha$ 是热扩散率，方程属于抛物型。",
            Self::Wave => r"描述: 声波、光波或弦的振动。信息以有限速度 $c$ 传播，方程属于双曲型。",
            Self::NavierStokes => "描述: 粘性流体的动量守恒。这是流体力学 (CFD) 的核心，求解难度极大。",
            Self::Schrodinger => r"描述: 量子力学中，波函数 $\Psi$ 随时间演化的基本方程。",
        }
    }

    /// Tab the entry belongs to.
    pub fn tab(&self) -> Tab {
        match self {
            Self::Laplace | Self::Poisson | Self::Helmholtz => Tab::Static,
            Self::Heat | Self::Wave | Self::NavierStokes | Self::Schrodinger
                => Tab::Dynamic,
        }
    }

    /// Run the preset simulation for this entry.
    pub fn simulate(&self) -> ZooResult<Plot> {
        let plot = match self {
            Self::Laplace => Plot::Heatmap {
                labels: Labels::new("Laplace Equation (Steady State)", "X Grid", "Y Grid"),
                field: relax::laplace_preset()?,
                palette: Palette::Hot,
                range: Range::Auto,
            },
            Self::Poisson => Plot::Heatmap {
                labels: Labels::new("Poisson Equation (With Sources)", "X Grid", "Y Grid"),
                field: relax::poisson_preset()?,
                palette: Palette::Diverging,
                range: Range::Symmetric,
            },
            Self::Helmholtz => Plot::Heatmap {
                labels: Labels::new(
                    &format!("Helmholtz Equation (k={:.1})", helmholtz::PRESET_K),
                    "X Grid",
                    "Y Grid",
                ),
                field: helmholtz::preset()?,
                palette: Palette::Plasma,
                range: Range::Auto,
            },
            Self::Heat => {
                let run = heat::preset()?;
                let x = Grid1::unit(heat::PRESET_N)?.coords().to_vec();
                // intermediate profiles are labelled by step index, the last
                // by the total step count
                let curves = run.history.iter()
                    .map(|snap| {
                        let label =
                            if snap.steps == heat::PRESET_STEPS {
                                snap.steps
                            } else {
                                snap.steps - 1
                            };
                        Curve::new(
                            &format!("Time Step {label}"),
                            snap.field.iter().copied(),
                        )
                    })
                    .collect();
                Plot::Profiles {
                    labels: Labels::new(
                        "Heat Equation (1D Diffusion)",
                        "Position (x)",
                        "Temperature (u)",
                    ),
                    x,
                    curves,
                    y_range: None,
                }
            },
            Self::Wave => {
                let run = wave::preset()?;
                let x = Grid1::unit(wave::PRESET_N)?.coords().to_vec();
                let curves = run.history.iter()
                    .map(|snap| {
                        let t = snap.steps as f64 * run.dt;
                        Curve::new(&format!("Time {t:.2}s"), snap.field.iter().copied())
                    })
                    .collect();
                Plot::Profiles {
                    labels: Labels::new(
                        "Wave Equation (1D String Vibration)",
                        "Position (x)",
                        "Displacement (u)",
                    ),
                    x,
                    curves,
                    y_range: Some((-10.0, 10.0)),
                }
            },
            Self::NavierStokes => {
                let flow = cavity::preset()?;
                Plot::Vectors {
                    labels: Labels::new(
                        &format!(
                            "Navier-Stokes (Lid-Driven Cavity Flow, Re≈{:.1})",
                            flow.reynolds,
                        ),
                        "X",
                        "Y",
                    ),
                    u: flow.u,
                    v: flow.v,
                    background: flow.psi,
                    palette: Palette::Diverging,
                }
            },
            Self::Schrodinger => {
                let out = schrodinger::preset()?;
                Plot::Profiles {
                    labels: Labels::new(
                        "Schrödinger Equation (Particle in Potential Well)",
                        "Position (x)",
                        "Probability Density",
                    ),
                    x: out.x.to_vec(),
                    curves: vec![
                        Curve::new("Probability Density |Ψ|²", out.density),
                        Curve::new(
                            "Potential V(x) (Scaled)",
                            out.potential.mapv(|v| v * 0.05),
                        ).dashed(),
                    ],
                    y_range: None,
                }
            },
        };
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_partition_entries() {
        let stat: Vec<Equation> = Equation::on_tab(Tab::Static).collect();
        let dynamic: Vec<Equation> = Equation::on_tab(Tab::Dynamic).collect();
        assert_eq!(stat, vec![Equation::Laplace, Equation::Poisson, Equation::Helmholtz]);
        assert_eq!(dynamic.len(), 4);
    }

    #[test]
    fn keys_round_trip() {
        for eq in Equation::ALL {
            assert_eq!(Equation::from_key(eq.key()), Some(eq));
        }
        assert_eq!(Equation::from_key("maxwell"), None);
    }

    #[test]
    fn heat_entry_has_five_profiles() {
        let plot = Equation::Heat.simulate().unwrap();
        match plot {
            Plot::Profiles { x, curves, .. } => {
                assert_eq!(x.len(), heat::PRESET_N);
                assert_eq!(curves.len(), 5);
                let labels: Vec<&str>
                    = curves.iter().map(|c| c.label.as_str()).collect();
                assert_eq!(
                    labels,
                    [
                        "Time Step 0",
                        "Time Step 250",
                        "Time Step 500",
                        "Time Step 750",
                        "Time Step 1000",
                    ],
                );
            },
            _ => panic!("expected profiles"),
        }
    }

    #[test]
    fn schrodinger_entry_overlays_potential() {
        let plot = Equation::Schrodinger.simulate().unwrap();
        assert!(plot.is_profiles());
        if let Plot::Profiles { curves, .. } = plot {
            assert_eq!(curves.len(), 2);
            assert!(curves[1].dashed);
            assert_eq!(curves[1].y[0], 50.0);
        }
    }

    #[test]
    fn static_entries_are_heatmaps() {
        assert!(Equation::Laplace.simulate().unwrap().is_heatmap());
        assert!(Equation::Poisson.simulate().unwrap().is_heatmap());
        assert!(Equation::NavierStokes.simulate().unwrap().is_vectors());
    }

    #[test]
    fn helmholtz_entry_peaks_inside() {
        match Equation::Helmholtz.simulate().unwrap() {
            Plot::Heatmap { field, .. } => {
                let n = helmholtz::PRESET_N;
                assert_eq!(field.dim(), (n, n));
                assert!(field.iter().all(|v| v.is_finite()));
                assert!(field.row(0).iter().all(|&v| v == 0.0));
                assert!(field[[n / 2, n / 2]] > 0.0);
            },
            _ => panic!("expected heatmap"),
        }
    }

    #[test]
    fn wave_entry_profiles_stay_in_window() {
        match Equation::Wave.simulate().unwrap() {
            Plot::Profiles { x, curves, y_range, .. } => {
                assert_eq!(x.len(), wave::PRESET_N);
                assert!(!curves.is_empty());
                assert!(curves.iter().all(|c| c.label.starts_with("Time ")));
                assert_eq!(y_range, Some((-10.0, 10.0)));
                for c in curves.iter() {
                    assert_eq!(c.y.len(), wave::PRESET_N);
                    assert_eq!(c.y[0], 0.0);
                    assert!(c.y.iter().all(|v| v.abs() < 15.0));
                }
            },
            _ => panic!("expected profiles"),
        }
    }
}
