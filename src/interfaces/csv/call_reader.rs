use crate::domain::call::Call;
use crate::error::{RegistryError, Result};
use std::io::Read;

/// Streams the rows of a call script.
///
/// A script is a CSV file headed `op,from,value,name,age,height,target`,
/// one registry call per row. Rows may stop after the last column their `op`
/// needs; a `withdraw` row, for example, is just `withdraw,<caller>`.
pub struct CallReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CallReader<R> {
    pub fn new(script: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(script);
        Self { reader }
    }

    /// Yields one entry per row, in script order. A row that does not
    /// describe a valid call yields an error without ending the stream.
    pub fn calls(self) -> impl Iterator<Item = Result<Call>> {
        self.reader
            .into_deserialize()
            .map(|row| row.map_err(RegistryError::from))
    }
}
