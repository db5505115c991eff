//! mame2batocera CLI
//!
//! Builds a Batocera `gamelist.xml` and `media/` tree from MAME DAT zips and
//! the MAME extras archives.

mod cli_types;
mod error;
mod logging;
mod progress;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mame2batocera_lib::settings::{Settings, load_settings, settings_path};
use mame2batocera_lib::{ConvertOptions, ConvertSummary, convert};

use cli_types::Cli;
use error::CliError;
use progress::BarProgress;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Everything owned by the run (the staging directory included) is dropped
    // before exiting
    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{} {e}", "\u{2718}".if_supports_color(Stdout, |t| t.red()));
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings_file = cli.config.clone().unwrap_or_else(settings_path);
    let settings = load_settings(&settings_file)?;
    let options = resolve_options(cli, settings)?;

    print_header(&options);
    let progress = BarProgress::new(cli.quiet);
    let summary = convert(&options, &progress)?;
    print_summary(&summary);
    Ok(())
}

/// Combine flags and settings; flags win.
fn resolve_options(cli: &Cli, settings: Settings) -> Result<ConvertOptions, CliError> {
    let paths = settings.paths;
    let extras_dir = cli
        .extras_dir
        .clone()
        .or(paths.extras_dir)
        .ok_or_else(|| CliError::missing_argument("--extras-dir", "extras_dir"))?;
    let roms_dir = cli
        .roms_dir
        .clone()
        .or(paths.roms_dir)
        .ok_or_else(|| CliError::missing_argument("--roms-dir", "roms_dir"))?;

    Ok(ConvertOptions {
        dat_source: cli.dat_zip.clone().or(paths.dat_zip),
        extras_dir,
        roms_dir,
        extract_temp: cli.extract_temp.clone().or(paths.extract_temp),
        no_merge: cli.no_merge,
        dry_run: cli.dry_run,
        extras: settings.extras,
        mapping: settings.mapping,
    })
}

fn print_header(options: &ConvertOptions) {
    log::info!(
        "Converting MAME data into {}",
        options
            .roms_dir
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    let dat_source = options.dat_source.as_ref().unwrap_or(&options.extras_dir);
    log::info!(
        "{}",
        format!("DATs: {}", dat_source.display()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "{}",
        format!("Extras: {}", options.extras_dir.display())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if options.dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if options.no_merge {
        log::info!(
            "{}",
            "Not merging with the existing gamelist".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");
}

fn print_summary(summary: &ConvertSummary) {
    let ok = "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string();

    let dats: Vec<String> = summary
        .dats_loaded
        .iter()
        .map(|(category, count)| format!("{category} ({count})"))
        .collect();
    let build = summary
        .dat_build
        .as_deref()
        .map(|b| format!(", MAME {b}"))
        .unwrap_or_default();
    log::info!(
        "{ok} {} games from {}{build}",
        summary.games.if_supports_color(Stdout, |t| t.bold()),
        dats.join(", ")
    );
    for (category, reason) in &summary.dats_skipped {
        log::debug!("  {category} DAT skipped: {reason}");
    }

    let media: Vec<String> = summary
        .media_found
        .iter()
        .map(|(category, count)| format!("{count} {category}"))
        .collect();
    log::info!("{ok} Media: {}", media.join(", "));

    log::info!(
        "{ok} Gamelist: {} merged, {} new, {} preserved",
        summary.merge.merged,
        summary.merge.added,
        summary.merge.preserved
    );
    if summary.merge.duplicates_dropped > 0 {
        log::warn!(
            "{} Dropped {} duplicate gamelist entries",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.merge.duplicates_dropped
        );
    }

    log::info!("");
    if summary.dry_run {
        log::info!(
            "{}",
            format!(
                "Dry run complete: {} entries not written to {}",
                summary.merge.total(),
                summary.gamelist_path.display()
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!(
            "{ok} Wrote {} ({} media files installed)",
            summary
                .gamelist_path
                .display()
                .if_supports_color(Stdout, |t| t.cyan()),
            summary.media_installed
        );
        if summary.media_failed > 0 {
            log::warn!(
                "{} {} media files could not be installed",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                summary.media_failed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["mame2batocera", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "mame2batocera",
            "--extras-dir",
            "/cli/extras",
            "--dry-run",
        ])
        .unwrap();
        let mut settings = Settings::default();
        settings.paths.extras_dir = Some(PathBuf::from("/settings/extras"));
        settings.paths.roms_dir = Some(PathBuf::from("/settings/roms"));
        settings.mapping.default_genre = "Coin-Op".to_string();

        let options = resolve_options(&cli, settings).unwrap();
        assert_eq!(options.extras_dir, PathBuf::from("/cli/extras"));
        assert_eq!(options.roms_dir, PathBuf::from("/settings/roms"));
        assert_eq!(options.dat_source, None);
        assert!(options.dry_run);
        assert_eq!(options.mapping.default_genre, "Coin-Op");
    }

    #[test]
    fn missing_roms_dir_is_reported() {
        let cli = Cli::try_parse_from(["mame2batocera", "--extras-dir", "/extras"]).unwrap();
        let result = resolve_options(&cli, Settings::default());
        assert!(matches!(
            result,
            Err(CliError::MissingArgument {
                flag: "--roms-dir",
                ..
            })
        ));
    }
}
