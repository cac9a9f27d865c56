//! Outbound reply and caption texts
//!
//! Everything user-visible is assembled here, so the handler code reads as
//! control flow and the wording lives in one place.

use linkledger_engine::{EngineError, RemovalReport, StatsReport};

pub(crate) const GENERIC_FAILURE: &str = "Something went wrong, please try again!";
pub(crate) const CERTIFICATE_USAGE: &str =
    "Reply to a user's message with /cer to give them a certificate!";
pub(crate) const CERTIFICATE_FAILURE: &str = "Error generating certificate. Please try again.";

/// Map an expected ledger outcome to its user-facing reply.
///
/// Returns `None` for persistence failures, which take the generic failure
/// path instead.
pub(crate) fn expected_outcome_reply(err: &EngineError) -> Option<&'static str> {
    match err {
        EngineError::NoLinkInTarget => Some("That message doesn't contain a URL!"),
        EngineError::NotOwner => Some("You can only delete your own URLs!"),
        EngineError::EntryNotFound => Some("URL not found in pending list"),
        EngineError::NothingToRemove => Some("You have no URLs to remove!"),
        EngineError::NothingToExport => Some("No URLs collected yet!"),
        EngineError::Store(_) => None,
    }
}

pub(crate) fn milestone(pending: usize) -> String {
    format!("Progress: {pending} URLs")
}

pub(crate) fn greeting(pending: usize, batch_size: usize) -> String {
    format!(
        "Hello! I'm the URL Counter Bot.\n\n\
         Send any URL (TikTok, Facebook, etc.)\n\n\
         Progress: {pending}/{batch_size}\n\n\
         Commands:\n\
         /get - Download all URLs as file\n\
         /remove - Remove your last URL\n\
         /stats - Show statistics"
    )
}

pub(crate) fn reply_delete_success(report: &RemovalReport, batch_size: usize) -> String {
    format!(
        "URL removed!\nProfile: {}\nProgress: {}/{} URLs",
        report.removed.profile, report.pending, batch_size
    )
}

pub(crate) fn remove_latest_success(report: &RemovalReport, batch_size: usize) -> String {
    format!(
        "Removed your URL!\nProfile: {}\nProgress: {}/{} URLs",
        report.removed.profile, report.pending, batch_size
    )
}

pub(crate) fn stats(report: &StatsReport, batch_size: usize) -> String {
    if report.contributors == 0 {
        return format!("No URLs yet!\nPending: {}/{}", report.pending, batch_size);
    }

    let leaderboard = report
        .leaderboard
        .iter()
        .map(|row| format!("  @{}: {}", row.owner, row.count))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "URL Statistics\n\n\
         Total URLs: {}\n\
         Pending: {}/{}\n\
         Contributors: {}\n\n\
         Top contributors:\n{}",
        report.total, report.pending, batch_size, report.contributors, leaderboard
    )
}

pub(crate) fn total(pending: usize) -> String {
    format!("Total URLs: {pending}")
}

pub(crate) fn export_filename(count: usize) -> String {
    format!("{count}link.txt")
}

pub(crate) fn export_caption(count: usize) -> String {
    format!("{count} URLs collected! Thank you contributors!")
}

pub(crate) fn certificate_filename(name: &str) -> String {
    format!("Certificate_{name}.pdf")
}

pub(crate) fn certificate_caption(name: &str) -> String {
    format!(
        "\u{1F3C6} Certificate of Achievement for {name}!\n\n\
         Congratulations on your hard work! \u{1F389}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkledger_domain::LinkEntry;
    use linkledger_engine::LeaderboardRow;

    #[test]
    fn test_removal_replies_show_profile_and_progress() {
        let report = RemovalReport {
            removed: LinkEntry::new("https://x.test/v", Some("@alice".to_string()), "bob"),
            pending: 4,
        };
        let text = reply_delete_success(&report, 30);
        assert!(text.contains("@alice"));
        assert!(text.contains("4/30"));
    }

    #[test]
    fn test_stats_empty_form() {
        let report = StatsReport {
            total: 0,
            pending: 2,
            contributors: 0,
            leaderboard: vec![],
        };
        assert_eq!(stats(&report, 30), "No URLs yet!\nPending: 2/30");
    }

    #[test]
    fn test_stats_full_form_lists_contributors() {
        let report = StatsReport {
            total: 3,
            pending: 1,
            contributors: 2,
            leaderboard: vec![
                LeaderboardRow {
                    owner: "carol".to_string(),
                    count: 2,
                },
                LeaderboardRow {
                    owner: "bob".to_string(),
                    count: 1,
                },
            ],
        };
        let text = stats(&report, 30);
        assert!(text.contains("Total URLs: 3"));
        assert!(text.contains("Pending: 1/30"));
        assert!(text.contains("  @carol: 2\n  @bob: 1"));
    }

    #[test]
    fn test_export_artifact_naming() {
        assert_eq!(export_filename(17), "17link.txt");
        assert_eq!(export_caption(17), "17 URLs collected! Thank you contributors!");
    }

    #[test]
    fn test_certificate_naming() {
        assert_eq!(certificate_filename("Alice Wong"), "Certificate_Alice Wong.pdf");
        assert!(certificate_caption("Alice Wong").contains("Alice Wong"));
    }
}
