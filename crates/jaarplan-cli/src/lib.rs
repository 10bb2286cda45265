//! # Jaarplan CLI
//!
//! Seeding and reporting utilities for Jaarplan development and operations.
//!
//! This library crate provides the functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use jaarplan_cli::seeder::{SeedConfig, seed_all};
//!
//! let config = SeedConfig::new(2025).with_activities(120);
//! seed_all(&store, &config).await?;
//! ```

pub mod report;
pub mod seeder;
