//! UI components.

pub mod dandelion;
