// monitoring/phase_log.rs

use crate::control_system::LightState;
use crate::shared_data::{GreenSource, PhaseChangeRecord};
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Appends one CSV row per light transition.
pub struct PhaseLog {
    writer: csv::Writer<File>,
}

impl PhaseLog {
    /// Creates (or truncates) the log file and writes the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &PhaseChangeRecord) -> Result<(), csv::Error> {
        self.writer.serialize(record)
    }

    pub fn flush(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }
}

/// Reads back every record of a phase log.
pub fn read_phase_log(path: impl AsRef<Path>) -> Result<Vec<PhaseChangeRecord>, csv::Error> {
    let mut rdr = csv::Reader::from_path(path)?;
    rdr.deserialize().collect()
}

/// Aggregate figures over a phase log.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseReport {
    pub greens: usize,
    pub fuzzy: usize,
    pub fallback: usize,
    pub empty_approach: usize,
    pub mean_green: f64,
    pub max_density: f64,
}

pub fn summarize(records: &[PhaseChangeRecord]) -> PhaseReport {
    let mut report = PhaseReport::default();
    let mut total = 0.0;
    for record in records.iter().filter(|r| r.state == LightState::Green) {
        report.greens += 1;
        total += record.green_duration;
        report.max_density = report.max_density.max(record.density);
        match record.source {
            GreenSource::Fuzzy => report.fuzzy += 1,
            GreenSource::Fallback => report.fallback += 1,
            GreenSource::EmptyApproach => report.empty_approach += 1,
            GreenSource::Unchanged => {}
        }
    }
    if report.greens > 0 {
        report.mean_green = total / report.greens as f64;
    }
    report
}

/// Prints a phase log and its summary.
pub fn show_phase_log(path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let records = read_phase_log(path)?;
    println!("Phase Changes:");
    for record in &records {
        println!(
            "  t={:>7.1}s {:?} -> {} (green {:.1}s, {} pending, density {:.0}%, wait {:.1}s, {:?})",
            record.time,
            record.axis,
            record.state,
            record.green_duration,
            record.pending_vehicles,
            record.density,
            record.average_wait,
            record.source
        );
    }
    let report = summarize(&records);
    println!("Report Summary:");
    println!("Green phases: {}", report.greens);
    println!(
        "  fuzzy: {}, fallback: {}, empty approach: {}",
        report.fuzzy, report.fallback, report.empty_approach
    );
    println!("Mean green: {:.1}s", report.mean_green);
    println!("Peak density: {:.0}%", report.max_density);
    Ok(())
}
