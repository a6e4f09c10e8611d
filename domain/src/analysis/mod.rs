//! Analysis aggregate - the entities and value objects of a pipeline run.
//!
//! Everything in this module is value-like and immutable once produced.
//! A run creates one [`AnalysisInput`](entities::AnalysisInput), Discovery
//! produces one [`CompanyProfile`](entities::CompanyProfile) plus a skeletal
//! competitor list, Deep-Dive replaces that list wholesale with enriched
//! [`CompetitorCard`](entities::CompetitorCard)s, and Report produces one
//! [`ReportSummary`](value_objects::ReportSummary). There is no cross-run
//! identity and no mutation path beyond the wholesale list replacement.

pub mod entities;
pub mod validation;
pub mod value_objects;
