//! Test modules for the dispatcher
//!
//! Tests are organized by functional area.

mod failure;
mod helpers;
