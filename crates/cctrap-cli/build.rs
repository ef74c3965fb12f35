//! Bakes the trap's two configuration values into the binaries.
//!
//! The build environment supplies `CCTRAP_HOST_COMPILER` (the real compiler
//! command) and `CCTRAP_RESULTS_FILE` (the shared results log). They are
//! re-exported to rustc so the trap never consults its runtime environment
//! for them. The script never fails: when a value is missing the binaries
//! fall back to the defaults in `cctrap_core::config`.

const WARN: &str = "cargo::warning";

const SETTINGS: [(&str, &str); 2] = [
    ("CCTRAP_HOST_COMPILER", "CCTRAP_BAKED_HOST_COMPILER"),
    ("CCTRAP_RESULTS_FILE", "CCTRAP_BAKED_RESULTS_FILE"),
];

fn main() {
    for (source, baked) in SETTINGS {
        match std::env::var(source) {
            Ok(value) => println!("cargo::rustc-env={baked}={value}"),
            Err(_) => println!("{WARN}=environment variable `{source}` not set, using default"),
        }
        println!("cargo::rerun-if-env-changed={source}");
    }
}
