//! Logging setup for the synth binary

/// Initialize the logger at INFO level unless `RUST_LOG` says otherwise.
///
/// Lines start with a carriage return so they stay aligned while the
/// terminal is in raw mode.
pub fn init_logger() {
    init_logger_with_level(log::LevelFilter::Info);
}

pub fn init_logger_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "\r[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .try_init();
}
