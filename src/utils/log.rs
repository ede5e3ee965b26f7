use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

pub const LOG_DIR: &str = "logs";

/// Appends a timestamped entry to `logs/<filename>`, creating the directory if needed.
pub fn log_to_file(filename: &str, message: &str) -> io::Result<()> {
    log_to_dir(Path::new(LOG_DIR), filename, message)
}

/// Same as [`log_to_file`] with an explicit log directory.
pub fn log_to_dir(log_dir: &Path, filename: &str, message: &str) -> io::Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(filename))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    writeln!(file, "[{}] {}", timestamp, message)?;
    file.flush()?;

    Ok(())
}

/// Logs a multi-line message under a header line.
pub fn log_with_header(log_dir: &Path, filename: &str, header: &str, message: &str) -> io::Result<()> {
    let formatted_message = format!("===== {} =====\n{}", header, message);
    log_to_dir(log_dir, filename, &formatted_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn appends_timestamped_entries() {
        let dir = std::env::temp_dir().join(format!("conveyor-monitor-log-{}", std::process::id()));
        log_to_dir(&dir, "test.log", "first").unwrap();
        log_with_header(&dir, "test.log", "tick 1", "temperature: 0.30").unwrap();

        let contents = fs::read_to_string(dir.join("test.log")).unwrap();
        let _ = fs::remove_dir_all(&dir);

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("===== tick 1 ====="));
        assert_eq!(lines[2], "temperature: 0.30");
    }
}
