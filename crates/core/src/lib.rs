#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod config;
pub mod frontmatter;
pub mod links;
pub mod pandoc;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
