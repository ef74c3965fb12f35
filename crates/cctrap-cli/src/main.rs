//! The trap itself: installed as `CC`, it forwards every argument to the
//! real compiler and exits with its status.
//!
//! Arguments stay `OsString`s all the way to the shell, so file names that
//! are not UTF-8 reach the compiler unchanged.

use cctrap::{baked_config, logging};

fn main() {
    logging::init_trap();

    let code = cctrap_core::file_trap(&baked_config()).run(std::env::args_os().skip(1));
    std::process::exit(code);
}
