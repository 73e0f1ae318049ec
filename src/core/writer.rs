use crate::core::{ScrapeBatch, CSV_HEADER};
use csv::{Terminator, WriterBuilder};
use std::io::Write;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowTally {
    pub written: usize,
    pub skipped: usize,
}

/// Writes the header, then one row per successful outcome.
///
/// Each row is flushed as it is written. Failed outcomes are logged and
/// skipped; only write errors end the loop early.
pub fn write_listings<W: Write>(out: W, batch: &ScrapeBatch) -> csv::Result<RowTally> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    writer.flush()?;

    tracing::info!("✍️ Writing job listings to CSV...");

    let mut tally = RowTally::default();
    for outcome in &batch.outcomes {
        match &outcome.result {
            Ok(record) => {
                writer.write_record(record.to_row())?;
                writer.flush()?;
                tally.written += 1;
                tracing::info!("✅ Job #{} processed successfully", outcome.position);
            }
            Err(e) => {
                tally.skipped += 1;
                tracing::error!("❌ Error processing job #{}: {}", outcome.position, e);
            }
        }
    }

    Ok(tally)
}
