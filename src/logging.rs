// davsync/src/logging.rs
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::errors::Result;

/// Run log sink, passed explicitly into the components that report
/// outcomes. Every line is timestamped and duplicated to stdout and to an
/// append-mode file inside the local folder, so one run's output sits next
/// to the files it synchronized.
pub struct RunLog {
    file: File,
}

impl RunLog {
    pub fn open(local_folder: &Path, log_file_name: &str) -> Result<Self> {
        let path = local_folder.join(log_file_name);
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        Ok(RunLog { file })
    }

    /// Writes one timestamped line. Failures to write the file copy are
    /// ignored; the log must never take the run down.
    pub fn line(&mut self, message: &str) {
        let stamped = format!("{} {}", Local::now().format("%Y/%m/%d %H:%M:%S"), message);
        println!("{}", stamped);
        let _ = writeln!(self.file, "{}", stamped);
    }
}
