pub mod charsets;
pub mod json_docs;
pub mod lenient;
pub mod reading;
pub mod round_trip;
