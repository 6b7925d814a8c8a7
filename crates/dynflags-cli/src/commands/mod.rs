pub mod decode;
pub mod encode;
pub mod run_common;
pub mod trace;

#[cfg(test)]
mod run_common_tests;
