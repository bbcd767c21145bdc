use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use four_in_a_row::DecisionRecord;

/// Writes one AI turn's search records to `<dir>/turn_<turn>.jsonl`, one JSON
/// object per line in emission order.
pub fn write_turn_log(dir: &Path, turn: usize, records: &[DecisionRecord]) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("turn_{turn}.jsonl"));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(path)
}
