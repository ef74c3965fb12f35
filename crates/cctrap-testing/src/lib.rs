//! Testing infrastructure for cctrap integration tests.
//!
//! - `TestWorld`: isolated build tree with source files and fake compilers
//! - `FakeCompiler`: compiler stand-in that captures the argv it receives
//! - `assertions`: record-count and source checks over results logs

pub mod assertions;
pub mod world;

pub use world::{FakeCompiler, TestWorld};
