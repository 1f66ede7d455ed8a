pub mod records;

pub use records::{PatientRecords, RecordsGateway};
