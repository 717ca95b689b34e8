//! Logging setup for the binaries.
//!
//! The library logs through the `log` facade only; binaries call
//! [`initialize`] once at startup. Output goes to stderr so it never mixes
//! with the picked-path output on stdout, and defaults to warnings unless
//! `FPICK_LOG` says otherwise.

use env_logger::Env;

pub fn initialize() {
    let env = Env::default().filter_or("FPICK_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
