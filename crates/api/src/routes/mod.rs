//! HTTP route handlers

pub mod index;
pub mod model;
pub mod predictions;
