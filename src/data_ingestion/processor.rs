pub mod csv_io;
pub mod data_loader;

pub use csv_io::{CsvError, CsvParser, CsvReader, CsvReaderConfig, CsvResult};
pub use data_loader::{DataLoader, RawDatasets};
