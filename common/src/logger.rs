use std::io::{self, Write};
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Stream the log lines go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    output: LogOutput,
}

impl Logger {
    fn new(prefix: Option<String>, output: LogOutput) -> Self {
        Self { prefix, output }
    }

    fn format_line(&self, timestamp: &str, file: &str, line: u32, message: &str) -> String {
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!(
                "[{}][{}][{}:{}] {}",
                timestamp, prefix, file_name, line, message
            ),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    fn write_line(
        &self,
        out: &mut impl Write,
        file: &str,
        line: u32,
        message: &str,
    ) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        writeln!(out, "{}", self.format_line(&timestamp, file, line, message))
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        // Write failures are ignored.
        let _ = match self.output {
            LogOutput::Stdout => self.write_line(&mut io::stdout().lock(), file, line, message),
            LogOutput::Stderr => self.write_line(&mut io::stderr().lock(), file, line, message),
        };
    }
}

/// Installs the process-wide logger. Later calls keep the first settings.
pub fn init_logger(prefix: Option<String>, output: LogOutput) {
    LOGGER.get_or_init(|| Logger::new(prefix, output));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
