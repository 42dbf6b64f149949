//! Routes `log` records to the browser console.

/// Install the console logger at `Info`. Later calls are no-ops.
pub fn init() {
    // Err only means a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}
