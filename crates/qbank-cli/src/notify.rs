//! Console notification surface
//!
//! Local server failures that are not suppressed land here: one line on
//! stderr per failure, in red when colors are enabled.

use colored::Colorize;
use qbank_core::Notifier;
use std::fmt;
use std::io::Write;
use std::sync::Mutex;

pub struct ConsoleNotifier {
    use_color: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    pub fn new(use_color: bool) -> Self {
        Self::with_sink(use_color, Box::new(std::io::stderr()))
    }

    pub fn with_sink(use_color: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            use_color,
            sink: Mutex::new(sink),
        }
    }

    fn render(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "✗".red().bold(), message.red())
        } else {
            format!("✗ {}", message)
        }
    }
}

impl fmt::Debug for ConsoleNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleNotifier")
            .field("use_color", &self.use_color)
            .finish_non_exhaustive()
    }
}

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        let line = self.render(message);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", line);
            let _ = sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_one_line_per_failure() {
        let captured = Captured::default();
        let notifier = ConsoleNotifier::with_sink(false, Box::new(captured.clone()));

        notifier.error("题库不存在");
        notifier.error("timeout of 30000ms exceeded");

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "✗ 题库不存在\n✗ timeout of 30000ms exceeded\n");
    }
}
