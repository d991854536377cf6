//! Charter Forge - Project charter generation service
//!
//! Renders project metadata into a LaTeX template, compiles it to PDF with an
//! external `pdflatex`-compatible compiler, and stores the result for later
//! retrieval.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
