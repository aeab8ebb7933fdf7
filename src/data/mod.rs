//! Data layer - static tables and fixed output fragments

pub mod constants;
