//! # gascheck - chromatography bulletin validation
//!
//! gascheck validates laboratory gas-chromatography bulletins against three
//! independent rule sets: AGA-8 compositional bounds, statistical process
//! control over archived samples, and regulatory bulletin deadlines.
//!
//! ## Overview
//!
//! A caller supplies a [`sample::Sample`] and a
//! [`repository::HistoricalSampleStore`]. The
//! [`orchestrator::ValidationOrchestrator`] derives missing physical
//! properties, runs every validator and returns a
//! [`orchestrator::BulletinReport`]. Nothing inside the engine performs I/O
//! or archives on its own; the re-sampling deadline reads time through an
//! injected [`clock::Clock`].
//!
//! ## Modules
//!
//! - [`properties`] - Molar mass, densities, Wobbe index and heating values
//! - [`aga8`] - AGA-8 component bounds, dynamic CO2 ceiling, method selection
//! - [`spc`] - Moving-range control limits from historical samples
//! - [`deadline`] - Lifecycle date ordering and deadline rules
//! - [`orchestrator`] - Runs all validators and aggregates reference statuses
//! - [`config`] - Configuration management for gascheck
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use gascheck::clock::SystemClock;
//! use gascheck::config::Config;
//! use gascheck::orchestrator::ValidationOrchestrator;
//! use gascheck::repository::FileHistoryStore;
//! use gascheck::sample::Sample;
//!
//! let config = Config::load().expect("Failed to load config");
//! let orchestrator = ValidationOrchestrator::new(config).expect("Invalid config");
//!
//! let sample = Sample::load(Path::new("bulletin.yaml")).expect("Failed to load sample");
//! let store = FileHistoryStore::new("history.yaml");
//!
//! let report = orchestrator
//!     .validate(&sample, &store, &SystemClock)
//!     .expect("Failed to read history");
//! println!("AGA-8: {}", report.reference_aga8_status);
//! ```

pub mod aga8;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod deadline;
pub mod diagnostics;
pub mod formatters;
pub mod frontmatter;
pub mod operations;
pub mod orchestrator;
pub mod properties;
pub mod reading;
pub mod repository;
pub mod sample;
pub mod spc;
pub mod status;

/// Default path constants for the gascheck directory structure.
pub mod paths {
    /// Project configuration file: `.gascheck/config.md`
    pub const CONFIG_PATH: &str = ".gascheck/config.md";
}
