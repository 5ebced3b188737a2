//! The `bandscore history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bandscore_core::sink::JsonDirSink;

use crate::config::BandscoreConfig;

pub fn execute(config: &BandscoreConfig, dir: Option<PathBuf>) -> Result<()> {
    let sink = JsonDirSink::new(dir.unwrap_or_else(|| config.results_dir.clone()));
    let submissions = sink.load_all()?;

    if submissions.is_empty() {
        println!("No submissions recorded in {}.", sink.dir().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Submitted", "Test", "Score", "Percent", "Band", "Time",
    ]);

    for s in &submissions {
        table.add_row(vec![
            Cell::new(s.submitted_at.format("%Y-%m-%d %H:%M")),
            Cell::new(s.test()),
            Cell::new(format!("{}/{}", s.score, s.total_questions)),
            Cell::new(format!("{}%", s.percentage)),
            Cell::new(s.band_score),
            Cell::new(format_duration(s.time_taken_seconds)),
        ]);
    }

    println!("{table}");
    println!("{} submission(s).", submissions.len());
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    format!("{}m{:02}s", seconds / 60, seconds % 60)
}
