#![warn(clippy::all, rust_2021_compatibility)]

mod app;
mod error;

fn main() -> Result<(), error::RuntimeError> { app::run() }
