//! # AgroHub CLI
//!
//! Operator tooling for the AgroHub backend.
//!
//! This library crate holds the logic behind the `agrohub-cli` binary so it
//! can be tested without a terminal:
//!
//! - [`credentials`]: bcrypt hash generation and verification
//! - [`smoke`]: end-to-end login + listing check against a running API
//!
//! ## Usage
//!
//! ```ignore
//! use agrohub_cli::smoke::{SmokeTestConfig, run};
//!
//! let report = run(&reqwest::Client::new(), &SmokeTestConfig::from_env()).await?;
//! println!("{report}");
//! ```

pub mod credentials;
pub mod smoke;
