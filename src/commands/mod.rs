//! Command implementations for the rebrand CLI

pub mod check;
pub mod run;
