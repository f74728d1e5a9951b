// Sitelens shared type definitions
// Each submodule defines types used across the shell.

pub mod errors;
pub mod navigation;
pub mod review;
pub mod search;
pub mod settings;
