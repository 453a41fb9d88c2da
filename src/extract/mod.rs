//! Signal extraction
//!
//! Pattern-based inference of employee count, region and industry from
//! normalized page text. Each submodule is a pure function of its inputs
//! and produces an audit trail alongside its verdict.

pub mod employee;
pub mod industry;
pub mod region;

pub use employee::{extract_employee_count, EmployeeDetection};
pub use industry::{extract_industry, IndustryDetection};
pub use region::{extract_region, RegionDetection};
