use crate::domain::model::RawUnit;
use crate::domain::ports::UnitReader;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// Reads one line per unit from a local file. Blank lines are skipped so a
/// trailing newline does not produce a phantom record.
pub struct FileLineReader {
    lines: Lines<BufReader<File>>,
}

impl FileLineReader {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).await?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

#[async_trait]
impl UnitReader for FileLineReader {
    async fn read(&mut self) -> Result<Option<RawUnit>> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some(RawUnit::new(line)));
        }
        Ok(None)
    }
}
