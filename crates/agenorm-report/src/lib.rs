//! Age-normed reference tables for a battery of speech and language measures.
//!
//! This crate turns a clinical sample into the nested document rendered by the
//! normative dashboard.
//!
//! # Overview
//!
//! 1. **Load the sample** ([`table::SampleTable`]): read the CSV export
//! 2. **Resolve brackets** ([`group::resolve_groups`]): split a metric column
//!    into the canonical age brackets ([`bracket::BinningMode`]) present in the data
//! 3. **Compute statistics** ([`metric::MetricResult`]): descriptive tables,
//!    percentiles, one-way ANOVA and Bonferroni-corrected Welch post-hoc tests
//! 4. **Assemble** ([`report::ReportBuilder`]): every metric of the
//!    [`catalogue::MetricCatalogue`] under both binning modes, plus sex rosters
//!    and the sample summary
//! 5. **Persist** ([`envelope::write_report`]): `const GLOBAL_DATA = {...};`
//!
//! # Examples
//!
//! ```
//! use agenorm_report::{
//!     bracket::BinningMode, catalogue::MetricCatalogue, report::ReportBuilder,
//!     table::SampleTable,
//! };
//!
//! let csv = "\
//! eta mesi,sesso,fascia eta 12m,fascia eta 6m,MTLD
//! 45,M,3.6-4.5,3.6-3.11,\"31,5\"
//! 50,F,3.6-4.5,4.0-4.5,29
//! 70,f,5.6-6.5,5.6-5.11,40
//! ";
//! let table = SampleTable::from_reader(csv.as_bytes(), b',').unwrap();
//! let report = ReportBuilder::new(&MetricCatalogue::builtin()).build(&table);
//!
//! let experimental = report
//!     .mode(BinningMode::Annual)
//!     .category("Metriche sperimentali")
//!     .unwrap();
//! assert_eq!(experimental.metrics[0].name, "MTLD");
//! assert_eq!(experimental.metrics[0].group_stats[0].mean, 30.25);
//! ```

pub mod bracket;
pub mod catalogue;
pub mod envelope;
pub mod group;
pub mod metric;
pub mod report;
pub mod table;
