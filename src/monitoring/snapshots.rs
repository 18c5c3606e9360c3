// monitoring/snapshots.rs

use crate::shared_data::IntersectionSnapshot;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Streams snapshots as JSON lines.
pub struct SnapshotWriter {
    out: BufWriter<File>,
}

impl SnapshotWriter {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
        })
    }

    pub fn write(&mut self, snapshot: &IntersectionSnapshot) -> Result<(), serde_json::Error> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n").map_err(serde_json::Error::io)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

pub fn read_snapshots(path: impl AsRef<Path>) -> Result<Vec<IntersectionSnapshot>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut snapshots = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        snapshots.push(serde_json::from_str(&line)?);
    }
    Ok(snapshots)
}
