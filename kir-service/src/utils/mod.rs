pub mod records;

pub use records::{to_json_record, to_json_records};
