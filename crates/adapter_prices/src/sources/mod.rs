//! History source implementations.
//!
//! - [`InMemoryHistory`]: series held in memory, with an outage switch
//! - [`CsvHistory`]: one CSV file per instrument in a directory
//! - [`SyntheticHistory`]: seeded GBM paths for a configured universe

mod csv_file;
mod memory;
mod synthetic;

pub use csv_file::CsvHistory;
pub use memory::InMemoryHistory;
pub use synthetic::{SyntheticHistory, SyntheticInstrument};
