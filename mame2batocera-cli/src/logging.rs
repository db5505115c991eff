//! Console logger setup.

use std::io::Write;

use log::LevelFilter;

const WORKSPACE_CRATES: &[&str] = &[
    "mame2batocera",
    "mame2batocera_lib",
    "mame2batocera_dat",
    "mame2batocera_frontend",
    "mame2batocera_core",
];

/// Install the process-wide logger. `RUST_LOG` overrides the levels chosen
/// here.
pub(crate) fn init(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for module in WORKSPACE_CRATES {
        builder.filter_module(module, level);
    }
    builder.parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.target(env_logger::Target::Stdout);
    // A logger may already be installed (tests)
    let _ = builder.try_init();
}
