//! Test helpers module
//!
//! This module provides utilities for testing the exam results views against
//! a mock data store. It includes the mock server and row builders.

#![allow(dead_code)]

pub mod store_mock;
pub mod test_data;

pub use store_mock::*;
pub use test_data::*;
