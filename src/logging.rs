use std::fmt::Display;

/// `-v`: bumps, plus projects and files that were skipped or abandoned.
pub const PROGRESS: u8 = 1;
/// `-vv`: individual retry attempts and package manifest rewrites.
pub const DETAIL: u8 = 2;

/// Verbosity-gated output on standard output, where a build log captures it
/// next to the compiler's own lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    /// `quiet` wins over any verbosity level.
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn enabled(&self, level: u8) -> bool {
        !self.quiet && self.verbose >= level
    }

    pub fn progress(&self, message: impl Display) {
        self.emit(PROGRESS, message);
    }

    pub fn detail(&self, message: impl Display) {
        self.emit(DETAIL, message);
    }

    fn emit(&self, level: u8, message: impl Display) {
        if self.enabled(level) {
            println!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let log = Logger::new(1, false);
        assert!(log.enabled(PROGRESS));
        assert!(!log.enabled(DETAIL));

        assert!(Logger::new(2, false).enabled(DETAIL));
        assert!(!Logger::default().enabled(PROGRESS));
    }

    #[test]
    fn test_quiet_silences_everything() {
        let log = Logger::new(3, true);
        assert!(!log.enabled(PROGRESS));
        assert!(!log.enabled(DETAIL));
    }
}
