use crate::output::ThreadRecord;
use crate::SweepError;
use std::fs::File;
use std::path::Path;

/// Appends thread records to a CSV file with a fixed six-column schema
///
/// The header row is written when the sink is created; `write` flushes after
/// every record so each row is durable before the next thread is processed.
pub struct CsvSink {
    writer: csv::Writer<File>,
    records_written: u64,
}

impl CsvSink {
    /// Creates the output file, truncating any previous run's data
    pub fn create(path: &Path) -> Result<Self, SweepError> {
        let file = File::create(path)?;
        let writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Appends one record and flushes it to disk
    ///
    /// The csv crate emits the header row, derived from the field order of
    /// `ThreadRecord`, ahead of the first record.
    pub fn write(&mut self, record: &ThreadRecord) -> Result<(), SweepError> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}
