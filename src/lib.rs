//! District rainfall tables for the monsoon information site.
//!
//! Parses the per-period district CSV files, drives the interactive
//! `DistrictTable` view (filter, sort, paginate, export), computes the
//! summary cards and draws the top-ten chart.

pub mod analysis;
pub mod chart;
pub mod coerce;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod periods;
pub mod site;
pub mod table;
pub mod verify;
