#![forbid(unsafe_code)]

//! chartspace demo: a two-pane clinical workspace over a sample chart.
//!
//! # Running
//!
//! ```sh
//! cargo run -p chartspace-demo
//! ```
//!
//! # Controls
//!
//! - Tab: switch focused pane; Left/Right: switch tab; w: close tab
//! - m: move tab to the other pane; o: reopen menu; s: collapse split
//! - f: focus filters; Space: toggle filter; Up/Down/Enter: timeline
//! - q / Ctrl+C: quit
//!
//! Set `CHARTSPACE_LOG=<path>` (and `RUST_LOG`) to capture a trace log.

mod app;
mod data;
mod runtime;

use std::fs::File;

use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    init_tracing();
    runtime::run()
}

fn init_tracing() {
    let Ok(path) = std::env::var("CHARTSPACE_LOG") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        Err(err) => eprintln!("chartspace-demo: cannot open log file {path}: {err}"),
    }
}
