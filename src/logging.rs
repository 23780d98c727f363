//! Combined terminal + file logger, mirroring the teacher crate's `init()`
//! helper with the `tokio` ctrl-c watchdog dropped -- this binary runs to
//! completion synchronously and has no async runtime to spawn a task on.

use anyhow::{Context, Result};

/// Promote any panic, anywhere in the process, to an abort. A task panicking
/// inside a pool worker (`pool::mod::pool_worker_loop`) would otherwise just
/// unwind that one thread, leaving `parked` short of `worker_count` forever
/// and `Pool::join` blocked for good -- an invariant violation must kill the
/// process, not hang it.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        log::error!("fatal: {info}");
        std::process::abort();
    }));
}

pub fn init() -> Result<()> {
    install_panic_hook();
    std::fs::create_dir_all("logs").context("creating logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{time}.log")).context("creating log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initializing logger")?;
    Ok(())
}
