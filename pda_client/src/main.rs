use anyhow::Result;
use clap::Parser;
use pda_client::{Args, execute_subcommand};
use tokio::runtime::Builder;

pub const NUM_THREADS: usize = 2;

fn main() -> Result<()> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(NUM_THREADS)
        .enable_all()
        .build()?;

    let args = Args::parse();

    env_logger::init();

    let ret = runtime.block_on(execute_subcommand(args.command))?;
    log::debug!("Command finished with {ret:?}");

    Ok(())
}
