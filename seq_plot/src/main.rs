use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use seq_plot::args::*;
use seq_plot::command::*;

fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = SeqPlotArgs::parse();
    match &args.action {
        Action::ListSequences => {
            println!("{}",list_sequences());
        }
        Action::NewConfig(args) => {
            let path = new_config(args)?;
            println!("parameters written to {}",path.display());
        }
        Action::NewStyle(args) => {
            let path = new_style(args)?;
            println!("style written to {}",path.display());
        }
        Action::Render(args) => {
            render(args)?;
        }
    }
    Ok(())
}
