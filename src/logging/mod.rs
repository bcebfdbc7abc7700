use std::{
    env,
    fmt::Write as _,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use chrono::{DateTime, Local};
use concat_string::concat_string;
use crossbeam_channel::{bounded, unbounded, Sender};
use once_cell::sync::Lazy;

const SYSTEM_LOG_DIR: &str = "SYSTEM_LOG_DIR";
const DEFAULT_LOG_DIR: &str = "log";
/// 累積到這個長度就先寫入檔案
const BATCH_SIZE: usize = 2048;
const FLUSH_TIMEOUT: Duration = Duration::from_secs(3);

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

pub struct LogMessage {
    pub level: Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }
}

enum Command {
    Write(LogMessage),
    Flush(Sender<()>),
}

/// 以背景線程寫檔的 logger，呼叫端只負責把訊息丟進 channel。
pub struct Logger {
    writer: Sender<Command>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        Self::with_dir(log_dir(), log_name)
    }

    pub fn with_dir(dir: PathBuf, log_name: &str) -> Self {
        let (tx, rx) = unbounded::<Command>();
        let log_path = Self::get_log_path(&dir, log_name);

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut writer = log_path.as_deref().and_then(open_log_file);
            let mut line = String::with_capacity(BATCH_SIZE);

            for command in &rx {
                match command {
                    Command::Write(received) => {
                        if writeln!(
                            &mut line,
                            "{} {} {}",
                            received.created_at.format("%F %X%.6f"),
                            received.level,
                            received.msg
                        )
                        .is_err()
                        {
                            continue;
                        }

                        if rx.is_empty() || line.len() >= BATCH_SIZE {
                            write_out(&mut writer, &mut line);
                        }
                    }
                    Command::Flush(ack) => {
                        write_out(&mut writer, &mut line);
                        let _ = ack.send(());
                    }
                }
            }
        });

        Logger { writer: tx }
    }

    pub fn info(&self, log: String) {
        self.send(Level::Info, log);
    }

    pub fn warn(&self, log: String) {
        self.send(Level::Warn, log);
    }

    pub fn error(&self, log: String) {
        self.send(Level::Error, log);
    }

    pub fn debug(&self, log: String) {
        self.send(Level::Debug, log);
    }

    /// Blocks until every line queued before this call has been written, or
    /// until the flush timeout passes. Returns `false` on timeout.
    pub fn flush(&self) -> bool {
        let (tx, rx) = bounded(1);

        if self.writer.send(Command::Flush(tx)).is_err() {
            return false;
        }

        rx.recv_timeout(FLUSH_TIMEOUT).is_ok()
    }

    fn send(&self, level: Level, msg: String) {
        if let Err(why) = self.writer.send(Command::Write(LogMessage::new(level, msg))) {
            error_console(why.to_string());
        }
    }

    fn get_log_path(dir: &Path, name: &str) -> Option<PathBuf> {
        if !dir.exists() {
            if let Err(why) = fs::create_dir_all(dir) {
                error_console(format!(
                    "Failed to create log directory {:?} because {:?}",
                    dir, why
                ));
                return None;
            }
        }

        let mut log_path = PathBuf::from(dir);
        log_path.push(concat_string!(
            Local::now().format("%Y-%m-%d").to_string(),
            "_",
            name,
            ".log"
        ));

        Some(log_path)
    }
}

fn log_dir() -> PathBuf {
    env::var(SYSTEM_LOG_DIR)
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

fn open_log_file(path: &Path) -> Option<BufWriter<File>> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(BufWriter::new(file)),
        Err(why) => {
            error_console(format!("Failed to open log file {:?}: {}", path, why));
            None
        }
    }
}

/// 沒有檔案可寫時改輸出到 console
fn write_out(writer: &mut Option<BufWriter<File>>, line: &mut String) {
    if line.is_empty() {
        return;
    }

    match writer {
        Some(w) => {
            if let Err(why) = w.write_all(line.as_bytes()) {
                error_console(format!(
                    "Failed to write to log file. because:{:#?}\r\nmsg:{}",
                    why, line
                ));
            }

            if let Err(why) = w.flush() {
                error_console(format!("Failed to flush log file. because:{:#?}", why));
            }
        }
        None => eprint!("{}", line),
    }

    line.clear();
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

/// 等待預設 logger 把排隊中的訊息寫完
pub fn flush() -> bool {
    LOGGER.flush()
}

pub fn error_console(log: String) {
    eprintln!(
        "{} Error {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}
