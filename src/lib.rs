//! Core library for the nest-pricing command line application.
//!
//! The library reconciles the configurator pricing workbook against vendor
//! quotation files. Spreadsheet and JSON adapters live under
//! [`nest::pricing::io`], the normalised data types inside
//! [`nest::pricing::model`], extraction in [`nest::pricing::build`] and
//! [`nest::pricing::survey`], and the end-to-end run in
//! [`nest::pricing::pipeline`].

pub mod nest;

pub use nest::pricing::{
    Result, ToolError, build, compare, config, emit, error, io, layout, logging, model, pipeline,
    survey,
};
