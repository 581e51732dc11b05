use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_merge_lib::{
    Confidence, MergeOptions, MergeProgress, MergeReport, MergeSummary, PatchResult, PatchStatus,
    run_merge_with_catalog, write_report,
};

use crate::cli_types::CorpusArgs;
use crate::commands::{load_catalog, resolve_inputs, scan_corpora};
use crate::error::CliError;

/// Run a full merge. Returns the process exit code.
pub(crate) fn run_patch(
    corpus: CorpusArgs,
    dry_run: bool,
    report: Option<PathBuf>,
    quiet: bool,
) -> Result<i32, CliError> {
    let inputs = resolve_inputs(corpus)?;
    let catalog = load_catalog(&inputs.dat)?;
    let (vendor, community) = scan_corpora(&inputs, &catalog)?;

    if dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb
    };

    let progress_callback = |progress: MergeProgress| match progress {
        MergeProgress::Correlated { total } => {
            pb.set_length(total as u64);
        }
        MergeProgress::Merging {
            ref file_name,
            index,
            ..
        } => {
            pb.set_position(index as u64);
            pb.set_message(file_name.clone());
        }
        MergeProgress::Done => {
            pb.finish_and_clear();
        }
    };

    let options = MergeOptions {
        attribution: inputs.attribution.clone(),
        dry_run,
    };
    let run = run_merge_with_catalog(&catalog, vendor, community, &options, &progress_callback);
    pb.finish_and_clear();

    for result in &run.results {
        print_result(result);
    }
    print_summary(&run.summary, dry_run);

    if let Some(path) = report {
        write_report(&path, &MergeReport::new(&run, dry_run))?;
        log::info!(
            "Report written to {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    Ok(if run.summary.has_failures() { 1 } else { 0 })
}

fn print_result(result: &PatchResult) {
    let file = result.file_path.display().to_string();
    let community = result
        .community_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match &result.status {
        PatchStatus::Success => {
            let marker = if result.confidence == Confidence::Fuzzy {
                " (fuzzy)"
            } else {
                ""
            };
            log::info!(
                "  {} {} {} {}{}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                file,
                "\u{2190}".if_supports_color(Stdout, |t| t.dimmed()),
                community,
                marker.if_supports_color(Stdout, |t| t.yellow()),
            );
            log::info!(
                "      {}",
                format!(
                    "+{} added, {} duplicate, {} unsupported",
                    result.entries_added,
                    result.entries_skipped_as_duplicate,
                    result.entries_unsupported
                )
                .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        PatchStatus::NoNewEntries => {
            log::debug!("  = {} (nothing new from {})", file, community);
        }
        PatchStatus::Skipped => {
            let level = if result.confidence == Confidence::Ambiguous {
                Level::Warn
            } else {
                Level::Debug
            };
            log::log!(
                level,
                "  {} {} {}",
                "?".if_supports_color(Stdout, |t| t.yellow()),
                file,
                format!("({})", result.confidence).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        PatchStatus::Failure(err) => {
            log::error!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                file,
                err,
            );
        }
    }
}

fn print_summary(summary: &MergeSummary, dry_run: bool) {
    log::info!("");
    let verb = if dry_run { "would be patched" } else { "patched" };
    log::info!(
        "{} {} files {}, {} entries added",
        "Summary:".if_supports_color(Stdout, |t| t.bold()),
        summary.patched.if_supports_color(Stdout, |t| t.green()),
        verb,
        summary.entries_added,
    );
    log::info!("  {} already up to date", summary.no_new_entries);
    if summary.fuzzy > 0 {
        log::info!(
            "  {} matched by title only (check the report)",
            summary.fuzzy.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!(
        "  {} ambiguous, {} unmatched (left untouched)",
        summary.ambiguous,
        summary.unmatched,
    );
    if summary.failed > 0 {
        log::warn!(
            "  {} failed",
            summary.failed.if_supports_color(Stdout, |t| t.red()),
        );
    }
}
