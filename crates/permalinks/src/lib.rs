#![doc = include_str!("../README.md")]

mod collect;
pub mod config;
mod extract;
pub mod front_matter;
mod permalink;
mod prerender;
mod warning;

pub use collect::*;
pub use config::Config;
pub use extract::*;
pub use permalink::*;
pub use prerender::*;
pub use warning::*;
