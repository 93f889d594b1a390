//! Terminal front end: the presentation layer that calls into the engine.

pub mod app;
pub mod controller;
pub mod ui;
