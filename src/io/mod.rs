//! I/O module
//!
//! Handles profile loading and CSV output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (profile conversion, history output)
//! - `profiles` - Profile store reader/writer with iterator interface

pub mod csv_format;
pub mod profiles;

pub use csv_format::{convert_profile_record, write_history_csv, ProfileRecord};
pub use profiles::{append_profile, load_profiles, ProfileReader};
