//! Fontvault Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `FontFamily`, `FontFace`, `FontFormat`, validated newtypes
//! - **Port definitions** - Traits for adapters: `IFontFileSystem`, `IDirectoryAccess`
//! - **Configuration** - Typed config mapped to the YAML config file
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement; the sync engine
//! in `fontvault-sync` only ever touches the filesystem through those ports.

pub mod config;
pub mod domain;
pub mod ports;
