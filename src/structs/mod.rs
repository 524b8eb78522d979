//! This is the parent module over several of Hytemplate's structs, such as *PluginConfig* or *AppError*.

pub mod config;
pub mod error;
