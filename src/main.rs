use anyhow::Result;
use bulb_viz::cli::{self, Cli, Commands, LiveArgs};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Render(args)) => cli::run_render(&args),
        Some(Commands::Cloud(args)) => cli::run_cloud(&args),
        Some(Commands::Inspect(args)) => cli::run_inspect(&args),
        Some(Commands::Live(args)) => run_live(args),
        None => run_live(LiveArgs {
            no_audio: false,
            width: 1280,
            height: 720,
            fractal: Default::default(),
        }),
    }
}

#[cfg(feature = "live")]
fn run_live(args: LiveArgs) -> Result<()> {
    bulb_viz::live::run(&args)
}

#[cfg(not(feature = "live"))]
fn run_live(_args: LiveArgs) -> Result<()> {
    anyhow::bail!("this build has no window support; rebuild with `--features live` or use `render`, `cloud` or `inspect`")
}
