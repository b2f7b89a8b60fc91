pub mod catalog;
pub mod cli;
pub mod common;
pub mod container;
