//! This is the parent module over small helpers used across Hytemplate.

pub mod misc;
pub mod notice;
pub mod text;
