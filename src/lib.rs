#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod kv_store;
pub mod location_source;
pub mod logs;
pub mod main_db;
pub mod marker_processor;
pub mod presentation;
pub mod route;
pub mod route_store;
pub mod tracker;
mod utils;

pub use config::TrackerConfig;
pub use route::{Coordinate, Route, Segment};
pub use tracker::{RouteTracker, TrackingState};
