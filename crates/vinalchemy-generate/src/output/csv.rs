use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use vinalchemy_core::{COLUMNS, WineRecord};

/// Write rows as CSV to `path`, header first. Returns bytes written.
pub fn write_records_csv(path: &Path, records: &[WineRecord]) -> Result<u64, csv::Error> {
    let file = File::create(path).map_err(csv::Error::from)?;
    write_records(BufWriter::new(file), records)
}

/// Write rows as CSV to any writer. Returns bytes written.
pub fn write_records<W: Write>(writer: W, records: &[WineRecord]) -> Result<u64, csv::Error> {
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.csv_fields())?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
