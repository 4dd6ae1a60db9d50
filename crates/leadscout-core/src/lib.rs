//! Leadscout Core - Event lead discovery and ICP scoring
//!
//! This crate provides the pipeline that turns an event page and a target
//! company into a ranked lead list:
//! - Normalizer: person lists out of heterogeneous search responses
//! - Roster: static registry or live discovery, with per-provenance caps
//! - Table: canonical pipe-delimited attendee table
//! - Profile: ICP from registry, web research, or model knowledge
//! - Matcher: JSON-mode scoring with bounded retry
//! - Pipeline: stage sequencing and report assembly

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod profile;
pub mod registry;
pub mod roster;
pub mod table;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result, Stage, UserFriendlyError};
pub use matcher::{no_data_report, MatchEngine};
pub use normalizer::{ExtractionStrategy, ResponseNormalizer};
pub use pipeline::{Pipeline, PipelineSettings};
pub use profile::ProfileResolver;
pub use registry::{IcpRegistry, RosterRegistry};
pub use roster::AttendeeSource;
pub use table::{AttendeeTable, AttendeeTableBuilder};
pub use types::{
    AnalysisRequest, ContactInfo, IcpProfile, MatchReport, MatchResult, MatchSummary,
    OpportunityType, PersonRecord, ProfileOrigin, Provenance, Report, ReportMetadata, Roster,
    StageOutput, DEFAULT_COMPANY_NAME, WORKFLOW_VERSION,
};
