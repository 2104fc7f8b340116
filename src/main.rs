use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use model_showcase::app::App;
use model_showcase::cli::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.viewer_config()?;
    log::info!("Starting {:?} viewer", cli.variant);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli.variant, config, !cli.no_ui);

    log::info!("Controls: drag to orbit, wheel to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    app.into_result()?;
    Ok(())
}
