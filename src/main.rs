use lc3_vm::emulator;
use lc3_vm::terminal;
use std::env;
use std::process::{abort, exit};
use tracing::error;
use tracing_subscriber::filter::EnvFilter;

/// Exit codes of the original lc3 tooling.
const EXIT_USAGE: i32 = 2;
const EXIT_LOAD_FAILURE: i32 = 1;

fn main() {
    // diagnostics go to stderr and stay silent unless RUST_LOG enables them;
    // everything the guest sees is on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let image_paths: Vec<String> = env::args().skip(1).collect();
    if image_paths.is_empty() {
        println!("lc3 [image-file1] ...");
        exit(EXIT_USAGE);
    }

    let mut emu = match emulator::from_image_files(&image_paths) {
        Ok(emu) => emu,
        Err(e) => {
            error!("{e}");
            println!("failed to load image: {}", e.path());
            exit(EXIT_LOAD_FAILURE);
        }
    };

    // raw mode is skipped when stdin is not a terminal (piped input)
    let raw_lock = terminal::disable_input_buffering().ok();
    let result = emu.execute();
    drop(raw_lock);

    if let Err(e) = result {
        error!("{e}");
        abort();
    }
}
