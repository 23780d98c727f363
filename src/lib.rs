pub mod cli;
pub mod ga;
pub mod graph;
pub mod logging;
pub mod pool;
pub mod random;

/// A progress spinner for the generation loop. A bar with a known total
/// doesn't fit here -- termination is stagnation-based, so the generation
/// count isn't known ahead of time.
pub fn progress() -> indicatif::ProgressBar {
    let style = indicatif::ProgressStyle::with_template("{spinner:.cyan} {elapsed} {msg}")
        .expect("valid progress bar template");
    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_style(style);
    bar.enable_steady_tick(std::time::Duration::from_millis(120));
    bar
}
