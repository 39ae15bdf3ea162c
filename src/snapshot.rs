use crate::acoustics::effective_f2;
use crate::agent::Agent;
use crate::error::{SimError, SimResult};
use crate::events::{AgentId, Label};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One row per vowel per reporting iteration. Field order is the CSV column
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub run: usize,
    pub time: usize,
    pub agent: AgentId,
    #[serde(rename = "vowel id")]
    pub label: Label,
    pub height: f64,
    pub backness: f64,
    pub rounding: f64,
    #[serde(rename = "F1")]
    pub f1: u32,
    #[serde(rename = "F2")]
    pub f2: u32,
    #[serde(rename = "F3")]
    pub f3: u32,
    #[serde(rename = "F4")]
    pub f4: u32,
    #[serde(rename = "F2prime")]
    pub f2_prime: f64,
    #[serde(rename = "UseCount")]
    pub use_count: u32,
    #[serde(rename = "SuccessCount")]
    pub success_count: u32,
}

impl SnapshotRecord {
    pub const HEADER: [&'static str; 14] = [
        "run",
        "time",
        "agent",
        "vowel id",
        "height",
        "backness",
        "rounding",
        "F1",
        "F2",
        "F3",
        "F4",
        "F2prime",
        "UseCount",
        "SuccessCount",
    ];
}

/// Rows for every vowel of every agent, agents in order, vowels by label.
pub fn capture(run: usize, time: usize, agents: &[Agent]) -> Vec<SnapshotRecord> {
    let mut rows = Vec::new();
    for agent in agents {
        for (label, proto) in agent.iter() {
            let art = proto.vowel.articulation().rounded();
            let forms = proto.vowel.formants();
            let [f1, f2, f3, f4] = forms.as_hz();
            rows.push(SnapshotRecord {
                run,
                time,
                agent: agent.id(),
                label,
                height: art.height,
                backness: art.backness,
                rounding: art.rounding,
                f1,
                f2,
                f3,
                f4,
                f2_prime: effective_f2(forms),
                use_count: proto.uses,
                success_count: proto.successes,
            });
        }
    }
    rows
}

/// Snapshots are due every `store_ivl` iterations and at the final one.
/// `time` is 1-based.
pub fn is_report_time(time: usize, n_its: usize, store_ivl: usize) -> bool {
    time == n_its || (store_ivl > 0 && time % store_ivl == 0 && time < n_its)
}

/// Destination for snapshot rows.
pub trait SnapshotSink {
    fn write(&mut self, record: &SnapshotRecord) -> SimResult<()>;

    fn flush(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// CSV output with the header written up front, even for an empty run.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> SimResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(SnapshotRecord::HEADER)?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> SimResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| SimError::Io(e.into_error()))
    }
}

impl<W: Write> SnapshotSink for CsvSink<W> {
    fn write(&mut self, record: &SnapshotRecord) -> SimResult<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn flush(&mut self) -> SimResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps rows in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<SnapshotRecord>,
}

impl SnapshotSink for MemorySink {
    fn write(&mut self, record: &SnapshotRecord) -> SimResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
