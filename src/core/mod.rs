//! Core rendering modules

pub mod man;
