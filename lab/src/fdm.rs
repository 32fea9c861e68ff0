use std::{ path::Path, str::FromStr, thread, time::Duration };
use anyhow::{ anyhow, bail, Context };
use pdelab::{
    config,
    demo::{ BoundaryKind, Heat1Demo, Heat2Demo, Profile1, Profile2 },
    plot::{ self, PlotConfig },
};

const USAGE: &str = "\
usage: fdm [--config PATH] 1d [alpha=A] [steps=N] [profile=gaussian|square|random] [seed=S]
       fdm [--config PATH] 2d [n=N] [alpha=A] [steps=N]
                              [profile=center|random|uniform]
                              [boundary=fixed|insulated|periodic] [seed=S]";

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().with_context(|| format!("invalid value for {key}: '{value}'"))
}

fn check_range<T>(key: &str, value: T, (lo, hi): (T, T)) -> anyhow::Result<T>
where T: PartialOrd + std::fmt::Display
{
    if value < lo || value > hi { bail!("{key} must lie in [{lo}, {hi}]; got {value}"); }
    Ok(value)
}

fn key_values(args: &[String]) -> anyhow::Result<Vec<(&str, &str)>> {
    args.iter()
        .map(|arg| arg.split_once('=').ok_or_else(|| anyhow!("expected key=value; got '{arg}'\n{USAGE}")))
        .collect()
}

fn heat1_demo(args: &[String]) -> anyhow::Result<Heat1Demo> {
    let mut demo = Heat1Demo::default();
    for (key, value) in key_values(args)? {
        match key {
            "alpha" => {
                demo.alpha = check_range(key, parse(key, value)?, Heat1Demo::ALPHA_RANGE)?;
            },
            "steps" => {
                demo.steps = check_range(key, parse(key, value)?, Heat1Demo::STEPS_RANGE)?;
            },
            "profile" => {
                demo.profile = Profile1::from_key(value)
                    .ok_or_else(|| anyhow!("unknown profile '{value}'"))?;
            },
            "seed" => { demo.seed = parse(key, value)?; },
            _ => bail!("unknown option '{key}'\n{USAGE}"),
        }
    }
    Ok(demo)
}

fn heat2_demo(args: &[String]) -> anyhow::Result<Heat2Demo> {
    let mut demo = Heat2Demo::default();
    for (key, value) in key_values(args)? {
        match key {
            "n" => { demo.n = check_range(key, parse(key, value)?, Heat2Demo::N_RANGE)?; },
            "alpha" => {
                demo.alpha = check_range(key, parse(key, value)?, Heat2Demo::ALPHA_RANGE)?;
            },
            "steps" => {
                demo.steps = check_range(key, parse(key, value)?, Heat2Demo::STEPS_RANGE)?;
            },
            "profile" => {
                demo.profile = Profile2::from_key(value)
                    .ok_or_else(|| anyhow!("unknown profile '{value}'"))?;
            },
            "boundary" => {
                demo.boundary = BoundaryKind::from_key(value)
                    .ok_or_else(|| anyhow!("unknown boundary '{value}'"))?;
            },
            "seed" => { demo.seed = parse(key, value)?; },
            _ => bail!("unknown option '{key}'\n{USAGE}"),
        }
    }
    Ok(demo)
}

fn run_1d(demo: Heat1Demo, outdir: &Path, plot_config: &PlotConfig, delay: Duration)
    -> anyhow::Result<usize>
{
    println!(
        "1D: {}, alpha = {}, {} steps",
        demo.profile.label(), demo.alpha, demo.steps,
    );
    let run = demo.run()?;
    println!("dt = {:.4e}, diffusion number γ = {:.4}", run.dt, run.ratio);
    for (k, snap) in run.history.iter().enumerate() {
        let picture = demo.frame(&run, snap)?;
        let path = outdir.join(format!("frame_{k:04}.png"));
        plot::render(&picture, &path, plot_config)
            .with_context(|| format!("failed to render {}", path.display()))?;
        thread::sleep(delay);
    }
    Ok(run.history.len())
}

fn run_2d(demo: Heat2Demo, outdir: &Path, plot_config: &PlotConfig, delay: Duration)
    -> anyhow::Result<usize>
{
    println!(
        "2D: {}×{}, {}, {}, alpha = {}, {} steps",
        demo.n, demo.n, demo.profile.label(), demo.boundary.label(), demo.alpha, demo.steps,
    );
    let run = demo.run()?;
    println!("dt = {:.4e}, diffusion number = {:.4}", run.dt, run.ratio);
    for (k, snap) in run.history.iter().enumerate() {
        let path = outdir.join(format!("frame_{k:04}.png"));
        plot::render(&demo.frame(snap), &path, plot_config)
            .with_context(|| format!("failed to render {}", path.display()))?;
        thread::sleep(delay);
    }
    Ok(run.history.len())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let (config_path, args) = config::split_config_arg(std::env::args().skip(1));
    let cfg = config::load(config_path.as_deref());
    let plot_config = PlotConfig::sized(cfg.display.width, cfg.display.height);
    let delay = Duration::from_millis(cfg.display.frame_delay_ms);

    let (mode, rest) = args.split_first()
        .ok_or_else(|| anyhow!("missing mode\n{USAGE}"))?;
    let (outdir, frames) = match mode.as_str() {
        "1d" => {
            let outdir = cfg.display.output_dir.join("fdm_1d");
            let n = run_1d(heat1_demo(rest)?, &outdir, &plot_config, delay)?;
            (outdir, n)
        },
        "2d" => {
            let outdir = cfg.display.output_dir.join("fdm_2d");
            let n = run_2d(heat2_demo(rest)?, &outdir, &plot_config, delay)?;
            (outdir, n)
        },
        other => bail!("unknown mode '{other}'\n{USAGE}"),
    };
    println!("wrote {frames} frames to {}", outdir.display());
    Ok(())
}
