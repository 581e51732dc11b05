use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_merge_lib::{Confidence, Correspondence, Verdict, correlate_corpora};

use crate::cli_types::CorpusArgs;
use crate::commands::{load_catalog, resolve_inputs, scan_corpora};
use crate::error::CliError;

/// Print every vendor file's verdict without merging.
pub(crate) fn run_correlate(corpus: CorpusArgs) -> Result<(), CliError> {
    let inputs = resolve_inputs(corpus)?;
    let catalog = load_catalog(&inputs.dat)?;
    let (vendor, community) = scan_corpora(&inputs, &catalog)?;
    log::info!("");

    let correspondences = correlate_corpora(&catalog, vendor, community);
    let mut counts = [0usize; 4];
    for c in &correspondences {
        counts[c.confidence() as usize] += 1;
        print_correspondence(c);
    }

    log::info!("");
    log::info!(
        "{} {} exact, {} fuzzy, {} ambiguous, {} unmatched",
        "Verdicts:".if_supports_color(Stdout, |t| t.bold()),
        counts[Confidence::Exact as usize].if_supports_color(Stdout, |t| t.green()),
        counts[Confidence::Fuzzy as usize].if_supports_color(Stdout, |t| t.yellow()),
        counts[Confidence::Ambiguous as usize].if_supports_color(Stdout, |t| t.yellow()),
        counts[Confidence::Unmatched as usize].if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

fn print_correspondence(c: &Correspondence) {
    let label = format!("{:<9}", c.confidence().label());
    let vendor = format!("{} \"{}\"", c.vendor.file_name(), c.vendor.raw_title);

    match &c.verdict {
        Verdict::Exact(community) => log::info!(
            "  {} {} \u{2190} {}",
            label.if_supports_color(Stdout, |t| t.green()),
            vendor,
            community.raw_title,
        ),
        Verdict::Fuzzy(community) => log::info!(
            "  {} {} \u{2190} {}",
            label.if_supports_color(Stdout, |t| t.yellow()),
            vendor,
            community.raw_title,
        ),
        Verdict::Ambiguous(tied) => {
            log::warn!(
                "  {} {}",
                label.if_supports_color(Stdout, |t| t.yellow()),
                vendor,
            );
            for candidate in tied {
                log::warn!(
                    "              {}",
                    candidate.raw_title.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        Verdict::Unmatched => log::debug!(
            "  {} {}",
            label.if_supports_color(Stdout, |t| t.dimmed()),
            vendor,
        ),
    }
}
