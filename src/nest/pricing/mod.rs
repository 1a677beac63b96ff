pub mod build;
pub mod compare;
pub mod config;
pub mod emit;
pub mod error;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod survey;

pub use error::{Result, ToolError};
