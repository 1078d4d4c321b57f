use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use log::Log;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub const LOG_FOLDER: &str = "logs/";

pub struct MainLogger {
    write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>,
    mirror_to_stderr: bool,
}

impl Log for MainLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.write_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.write_logger.log(record);
        if self.mirror_to_stderr && self.enabled(record.metadata()) {
            eprintln!(
                "{}:{} -- {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        self.write_logger.flush();
    }
}

// Can only succeed once per process, later calls return an error.
pub fn init(cache_dir: &str, mirror_to_stderr: bool) -> Result<()> {
    let path = Path::new(cache_dir).join(LOG_FOLDER).join("main.log");
    let log = FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let write_logger = WriteLogger::new(LevelFilter::Info, config, log);
    log::set_boxed_logger(Box::new(MainLogger {
        write_logger,
        mirror_to_stderr,
    }))?;
    log::set_max_level(LevelFilter::Info);
    info!("logging initialized");
    Ok(())
}

/// A file of the rotating log, `name` is relative to the log folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    pub path: PathBuf,
}

// The live file and its rotated siblings, sorted by name.
pub fn list_log_files(cache_dir: &str) -> Result<Vec<LogFile>> {
    let log_folder = Path::new(cache_dir).join(LOG_FOLDER);
    let mut files: Vec<LogFile> = fs::read_dir(&log_folder)
        .with_context(|| format!("no log folder in {}", cache_dir))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some(LogFile { name, path })
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

pub fn export(cache_dir: &str, target_file_path: &str) -> Result<()> {
    let log_files = list_log_files(cache_dir)?;
    let mut zip = zip::ZipWriter::new(File::create(target_file_path)?);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for log_file in &log_files {
        zip.start_file(format!("{}{}", LOG_FOLDER, log_file.name), options)?;
        io::copy(&mut File::open(&log_file.path)?, &mut zip)?;
    }
    zip.finish()?;
    debug!(
        "[logs] exported {} files to {}",
        log_files.len(),
        target_file_path
    );
    Ok(())
}
