//! JSONL writer for rendered frames.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use floatfx_common::error::FloatResult;
use floatfx_core::ElementTransform;
use serde::{Deserialize, Serialize};

/// Metadata written as the first (`#`-prefixed) line of a frame file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// Wall-clock time at the driver epoch (RFC 3339).
    pub epoch_wall: String,
    /// Marker attribute used for discovery.
    pub attribute: String,
    /// Decimal precision of the transforms.
    pub precision: u32,
    /// Nominal frame rate.
    pub fps: u32,
    /// Tracked element ids in document order.
    pub elements: Vec<String>,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    t: u64,
    transforms: &'a [ElementTransform],
}

/// Writes one JSONL record per rendered frame.
pub struct FrameWriter {
    writer: BufWriter<File>,
    frames_written: u64,
}

impl FrameWriter {
    /// Create the output file and write the header line.
    pub fn new(path: PathBuf, header: &FrameStreamHeader) -> FloatResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")?;

        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Append a rendered frame.
    pub fn write_frame(
        &mut self,
        frame: u64,
        timestamp_ns: u64,
        transforms: &[ElementTransform],
    ) -> FloatResult<()> {
        let record = FrameRecord {
            frame,
            t: timestamp_ns,
            transforms,
        };
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")?;
        self.frames_written += 1;

        if self.frames_written % 600 == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> FloatResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_writer_output() {
        let dir = std::env::temp_dir().join("floatfx_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("frames.jsonl");

        let header = FrameStreamHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            attribute: "data-float".to_string(),
            precision: 2,
            fps: 60,
            elements: vec!["a".to_string()],
        };

        {
            let mut writer = FrameWriter::new(path.clone(), &header).unwrap();
            let transforms = vec![ElementTransform {
                id: "a".to_string(),
                transform: "translate3d(-2.40px, 0.00px, 0)".to_string(),
            }];
            writer.write_frame(0, 0, &transforms).unwrap();
            writer.write_frame(1, 16_666_666, &transforms).unwrap();
            assert_eq!(writer.frames_written(), 2);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("# "));

        let record: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(record["frame"], 1);
        assert_eq!(record["t"], 16_666_666);
        assert_eq!(
            record["transforms"][0]["transform"],
            "translate3d(-2.40px, 0.00px, 0)"
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
