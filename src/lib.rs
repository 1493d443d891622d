//! # ovnplot - Plot OVN logical topologies
//!
//! This library turns the logical switches, routers, ports and static routes
//! of an OVN northbound database into a Graphviz DOT description.
//!
//! ## Overview
//!
//! A render reads the northbound tables through a [`topology::TopologyClient`],
//! classifies switches by the ovn-kubernetes naming conventions (or treats all
//! of them alike for plain OVN), and assembles a graph in one of two formats:
//!
//! - **Compact**: one node per switch and router, stable left-to-right layout
//! - **Detailed**: one cluster per switch and router, one node per port
//!
//! ## Architecture
//!
//! - `topology`: northbound entity types, client interface, snapshot files
//! - `config`: render parameters (mode, filter, format)
//! - `config_loader`: YAML config loading and command-line overrides
//! - `plot`: classification, mode resolution and the two graph assemblers
//! - `registry`: per-render node memoization
//! - `dot`: DOT graph model and serialization
//! - `orchestrator`: one call from client and config to DOT text
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ovnplot::{config::PlotConfig, orchestrator, topology};
//!
//! let snapshot = topology::load_snapshot("nb.yaml".as_ref())?;
//! let dot = orchestrator::plot_topology(&snapshot, &PlotConfig::default())?;
//! println!("{dot}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed errors built with `thiserror`; the binary
//! reports them through `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod dot;
pub mod orchestrator;
pub mod plot;
pub mod registry;
pub mod topology;
