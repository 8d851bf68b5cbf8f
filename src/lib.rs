//! stitch - a minimal static site generator.
//!
//! Pages are plain HTML with two placeholder forms, `{{> partial}}` and
//! `{{variable}}`. A build expands every page, writes it to the output
//! directory and copies static assets alongside.

pub mod build;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod init;
pub mod template;
pub mod utils;
pub mod utm;
