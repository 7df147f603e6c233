#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::float_cmp,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

pub mod agents;
pub mod config;
pub mod directory;
pub mod extract;
pub mod gateway;
pub mod health;
pub mod pipeline;
pub mod planner;
pub mod routing;
pub mod sessions;

pub use config::Config;
