use std::io::Write;

/// Initialise the `log` backend.
///
/// Lines go to stderr as `[HH:MM:SS.mmm] LEVEL message` so they never mix with
/// a board drawing on stdout. `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "parkboard=debug"
    } else {
        "parkboard=info"
    };

    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(buf, "[{}] {:<5} {}", timestamp, record.level(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .try_init();

    log::debug!(
        "Parkboard v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}
