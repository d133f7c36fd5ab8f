//! Risk assessment scoring and remediation workflow engine.
//!
//! Turns a structured or ad-hoc hazard inventory into quantified risk scores
//! (Fine-Kinney and 5x5 L-Matrix), drives the draft-to-completed assessment
//! lifecycle, derives remediation status from attached measures, and keeps an
//! append-only ledger of residual re-audit scores per risk.
//!
//! The engine is a library boundary: authorization, rendering and transport
//! live outside it. All state is per-case and repository-backed; the only
//! shared resources are the read-only question library and risk catalog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod scoring;
pub mod telemetry;
pub mod workflows;

pub use error::EngineError;
