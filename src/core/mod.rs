// src/core/mod.rs

pub mod catalog;
pub mod configurer;
pub mod help;
