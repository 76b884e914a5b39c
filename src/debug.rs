//! Opt-in debug logging for colorcard.
//!
//! Structured diagnostics written to stderr, off by default. Enabled with
//! [`enable`] or by setting `COLORCARD_DEBUG=1` and calling [`init_from_env`].
//! Histogram sampling, cache hits/evictions and configuration loading report here.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Environment variable that turns debug output on.
pub const DEBUG_ENV_VAR: &str = "COLORCARD_DEBUG";

/// Global debug mode flag.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Start time stored as millis since UNIX epoch (atomic-safe).
static START_TIME_MS: AtomicU64 = AtomicU64::new(0);

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Enables debug mode globally.
pub fn enable() {
    START_TIME_MS.store(now_ms(), Ordering::SeqCst);
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Disables debug mode globally.
pub fn disable() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns true if debug mode is enabled.
#[inline]
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Enables debug mode when `COLORCARD_DEBUG` is `1` or `true`.
///
/// Returns whether debug mode ended up enabled.
pub fn init_from_env() -> bool {
    if std::env::var(DEBUG_ENV_VAR).map(|v| env_flag_set(&v)).unwrap_or(false) {
        enable();
    }
    is_enabled()
}

fn env_flag_set(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Gets elapsed time since debug was enabled.
fn elapsed_ms() -> u64 {
    let start = START_TIME_MS.load(Ordering::Relaxed);
    if start == 0 {
        return 0;
    }
    now_ms().saturating_sub(start)
}

/// Debug log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Tracing entry/exit of functions
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
        }
    }

    fn color_code(self) -> &'static str {
        match self {
            Level::Trace => "\x1b[90m", // Gray
            Level::Debug => "\x1b[36m", // Cyan
            Level::Info => "\x1b[32m",  // Green
            Level::Warn => "\x1b[33m",  // Yellow
        }
    }
}

/// Logs a debug message if debug mode is enabled.
pub fn log(level: Level, component: &str, message: &str) {
    if !is_enabled() {
        return;
    }

    let reset = "\x1b[0m";

    // Format: [+0000ms] [LEVEL] [component] message
    let _ = writeln!(
        io::stderr(),
        "[+{:04}ms] {}[{:5}]{} [{}] {}",
        elapsed_ms(),
        level.color_code(),
        level.as_str(),
        reset,
        component,
        message
    );
}

/// Logs with format arguments.
#[macro_export]
macro_rules! debug_log {
    ($level:expr, $component:expr, $($arg:tt)*) => {
        if $crate::debug::is_enabled() {
            $crate::debug::log($level, $component, &format!($($arg)*));
        }
    };
}

/// Convenience macro for trace level.
#[macro_export]
macro_rules! trace {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Trace, $component, $($arg)*)
    };
}

/// Convenience macro for debug level.
#[macro_export]
macro_rules! debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Debug, $component, $($arg)*)
    };
}

/// Convenience macro for info level.
#[macro_export]
macro_rules! info {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Info, $component, $($arg)*)
    };
}

/// Convenience macro for warn level.
#[macro_export]
macro_rules! warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Warn, $component, $($arg)*)
    };
}

/// RAII guard for timing a scope.
pub struct TimingGuard {
    component: &'static str,
    operation: &'static str,
    start: Instant,
}

impl TimingGuard {
    /// Creates a new timing guard.
    ///
    /// Nothing is allocated while logging is disabled.
    pub fn new(component: &'static str, operation: &'static str) -> Self {
        if is_enabled() {
            log(Level::Trace, component, &format!("-> {operation}"));
        }
        Self { component, operation, start: Instant::now() }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if is_enabled() {
            let elapsed = self.start.elapsed();
            log(
                Level::Trace,
                self.component,
                &format!("<- {} ({:.2}ms)", self.operation, elapsed.as_secs_f64() * 1000.0),
            );
        }
    }
}

/// Creates a timing guard for a scope.
#[macro_export]
macro_rules! time_scope {
    ($component:expr, $operation:expr) => {
        let _guard = $crate::debug::TimingGuard::new($component, $operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only this test toggles the global flag; other tests must not assume its state.
    #[test]
    fn test_enable_log_disable_sequence() {
        enable();
        assert!(is_enabled());

        log(Level::Trace, "test", "trace message");
        log(Level::Debug, "test", "debug message");
        log(Level::Info, "test", "info message");
        log(Level::Warn, "test", "warn message");
        debug_log!(Level::Debug, "test", "formatted {}", 42);
        {
            let guard = TimingGuard::new("test", "operation");
            assert_eq!(guard.component, "test");
            assert_eq!(guard.operation, "operation");
        }

        let t1 = elapsed_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let t2 = elapsed_ms();
        assert!(t2 >= t1, "elapsed should increase: {t2} >= {t1}");

        disable();
        assert!(!is_enabled());
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(Level::Trace.as_str(), "TRACE");
        assert_eq!(Level::Debug.as_str(), "DEBUG");
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Warn.as_str(), "WARN");
    }

    #[test]
    fn test_level_has_color() {
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn] {
            assert!(level.color_code().starts_with("\x1b["));
        }
    }

    #[test]
    fn test_env_flag_values() {
        assert!(env_flag_set("1"));
        assert!(env_flag_set("TRUE"));
        assert!(env_flag_set(" yes "));
        assert!(!env_flag_set("0"));
        assert!(!env_flag_set(""));
        assert!(!env_flag_set("off"));
    }

    #[test]
    fn test_timing_guard_never_panics() {
        let _guard = TimingGuard::new("test", "noop");
    }

    #[test]
    fn test_timing_guard_keeps_static_names() {
        let guard = TimingGuard::new("overlay", "zone");
        let operation: &'static str = guard.operation;
        assert_eq!((guard.component, operation), ("overlay", "zone"));
    }
}
