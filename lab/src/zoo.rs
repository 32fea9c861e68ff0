use std::path::PathBuf;
use anyhow::{ bail, Context };
use pdelab::{
    config,
    plot::{ self, PlotConfig },
    zoo::{ Equation, Tab },
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let (config_path, args) = config::split_config_arg(std::env::args().skip(1));
    let cfg = config::load(config_path.as_deref());

    for tab in [Tab::Static, Tab::Dynamic] {
        println!("== {} ==", tab.title());
        for eq in Equation::on_tab(tab) {
            println!("[{}] {}", eq.key(), eq.name());
            println!("    {}", eq.formula());
            println!("    {}", eq.caption());
        }
    }

    let selected: Vec<Equation> = match args.first().map(String::as_str) {
        None => return Ok(()),
        Some("all") => Equation::ALL.to_vec(),
        Some(key) => match Equation::from_key(key) {
            Some(eq) => vec![eq],
            None => bail!("unknown equation '{key}'; expected one of the keys above or 'all'"),
        },
    };

    let plot_config = PlotConfig::sized(cfg.display.width, cfg.display.height);
    let outdir: PathBuf = cfg.display.output_dir.join("zoo");
    for eq in selected {
        log::info!("simulating {}", eq.key());
        let picture = eq.simulate()
            .with_context(|| format!("simulation of {} failed", eq.key()))?;
        let path = outdir.join(format!("{}.png", eq.key()));
        plot::render(&picture, &path, &plot_config)
            .with_context(|| format!("failed to render {}", path.display()))?;
        println!("{}: {}", eq.key(), path.display());
    }
    Ok(())
}
