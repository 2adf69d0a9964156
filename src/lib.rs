//! Calldoc - call-site argument documenter for PHP codebases
//!
//! Calldoc is a CLI tool and library that scans a PHP codebase for call
//! sites of registered (receiver, method) pairs and reports, per call
//! signature, a canonical summary of the arguments each occurrence was
//! invoked with: literals and constants verbatim, composite expressions
//! flattened, and anything too dynamic collapsed to a small sentinel
//! vocabulary.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core scanning engine (scan → parse → classify → aggregate)
//! - `export`: Report exporters (JSON, plain text)
//! - `issues`: Issue types surfaced after a scan
//! - `logbuf`: Buffered leveled log collection for library consumers

pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod issues;
pub mod logbuf;
