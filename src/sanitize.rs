//! Attachment name sanitization and per-call collision avoidance.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_NAME: &str = "attachment";

/// Reduce `raw` to an ASCII token safe for a PDF attachment name or a zip
/// entry name.
///
/// The input is NFKD-decomposed so accented letters split into a base letter
/// plus combining marks, every non-ASCII character is dropped, spaces become
/// underscores, and an empty result falls back to [`FALLBACK_NAME`].
///
/// ```
/// use pdf_attachments::sanitize_name;
///
/// assert_eq!(sanitize_name("résumé café.pdf"), "resume_cafe.pdf");
/// assert_eq!(sanitize_name("日本語"), "attachment");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    if ascii.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        ascii
    }
}

/// Return `name` without its final extension.
///
/// A name without a `.` is returned unchanged.
pub fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Download name for a PDF produced by the embedder from `base_filename`.
///
/// ```
/// use pdf_attachments::embedded_pdf_filename;
///
/// assert_eq!(embedded_pdf_filename("Rapport été.pdf"), "Rapport_ete_with_attachments.pdf");
/// ```
pub fn embedded_pdf_filename(base_filename: &str) -> String {
    format!("{}_with_attachments.pdf", sanitize_name(file_stem(base_filename)))
}

/// Download name for the zip archive built from the attachments of
/// `pdf_filename`.
pub fn archive_filename(pdf_filename: &str) -> String {
    format!("{}_attachments.zip", sanitize_name(file_stem(pdf_filename)))
}

// ── NameRegistry ─────────────────────────────────────────────────────────────

/// Set of names already handed out during one embed or extract call.
///
/// A registry must not outlive the call it belongs to; create a fresh one per
/// call so concurrent calls never see each other's names.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `candidate`, or the first free `base_N.ext` variant of it.
    ///
    /// Suffixes start at 1 and go before the text after the final `.`, so a
    /// dot-file such as `.env` becomes `_1.env`. A name without a `.`, or
    /// ending in `.`, gets the suffix appended to the whole name.
    ///
    /// ```
    /// use pdf_attachments::NameRegistry;
    ///
    /// let mut names = NameRegistry::new();
    /// assert_eq!(names.claim("report.pdf"), "report.pdf");
    /// assert_eq!(names.claim("report.pdf"), "report_1.pdf");
    /// assert_eq!(names.claim("notes"), "notes");
    /// assert_eq!(names.claim("notes"), "notes_1");
    /// ```
    pub fn claim(&mut self, candidate: &str) -> String {
        if self.used.insert(candidate.to_string()) {
            return candidate.to_string();
        }

        let split = candidate
            .rsplit_once('.')
            .filter(|(_, ext)| !ext.is_empty());

        let mut counter = 1usize;
        loop {
            let probe = match split {
                Some((base, ext)) => format!("{base}_{counter}.{ext}"),
                None => format!("{candidate}_{counter}"),
            };
            if self.used.insert(probe.clone()) {
                return probe;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        " ",
        "plain.txt",
        "résumé café.pdf",
        "Ünïcödé  spaced  name.docx",
        "日本語のファイル.xlsx",
        "ｆｕｌｌｗｉｄｔｈ.png",
        "ligature ﬁle.txt",
        "tab\tand\u{00a0}nbsp.csv",
        "emoji 📎.bin",
        "\u{0301}\u{0301}",
    ];

    #[test]
    fn strips_accents_and_spaces() {
        assert_eq!(sanitize_name("résumé café.pdf"), "resume_cafe.pdf");
        assert_eq!(sanitize_name("a b  c"), "a_b__c");
    }

    #[test]
    fn compatibility_forms_are_folded() {
        assert_eq!(sanitize_name("ｆｕｌｌｗｉｄｔｈ.png"), "fullwidth.png");
        assert_eq!(sanitize_name("ligature ﬁle.txt"), "ligature_file.txt");
        // NBSP decomposes to a plain space, which then becomes an underscore.
        assert_eq!(sanitize_name("a\u{00a0}b"), "a_b");
    }

    #[test]
    fn falls_back_when_nothing_survives() {
        assert_eq!(sanitize_name(""), FALLBACK_NAME);
        assert_eq!(sanitize_name("日本語"), FALLBACK_NAME);
        assert_eq!(sanitize_name("\u{0301}"), FALLBACK_NAME);
    }

    #[test]
    fn sanitize_is_idempotent_and_total() {
        for raw in SAMPLES {
            let once = sanitize_name(raw);
            assert!(!once.is_empty(), "empty output for {raw:?}");
            assert!(once.is_ascii(), "non-ascii output for {raw:?}");
            assert!(!once.contains(' '), "space left in output for {raw:?}");
            assert_eq!(sanitize_name(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn stem_drops_only_the_final_extension() {
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_stem("report.pdf"), "report");
    }

    #[test]
    fn download_names() {
        assert_eq!(embedded_pdf_filename("my file.pdf"), "my_file_with_attachments.pdf");
        assert_eq!(archive_filename("déjà vu.pdf"), "deja_vu_attachments.zip");
        assert_eq!(archive_filename(".pdf"), "attachment_attachments.zip");
    }

    #[test]
    fn registry_suffixes_before_the_extension() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("report.pdf"), "report.pdf");
        assert_eq!(names.claim("report.pdf"), "report_1.pdf");
        assert_eq!(names.claim("report.pdf"), "report_2.pdf");
        assert_eq!(names.claim("archive.tar.gz"), "archive.tar.gz");
        assert_eq!(names.claim("archive.tar.gz"), "archive.tar_1.gz");
        assert_eq!(names.used.len(), 5);
    }

    #[test]
    fn registry_without_extension() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("notes"), "notes");
        assert_eq!(names.claim("notes"), "notes_1");
        assert_eq!(names.claim(".env"), ".env");
        assert_eq!(names.claim(".env"), "_1.env");
        assert_eq!(names.claim(".env"), "_2.env");
        assert_eq!(names.claim("odd."), "odd.");
        assert_eq!(names.claim("odd."), "odd._1");
    }

    #[test]
    fn literal_suffixed_names_take_part_in_probing() {
        let mut names = NameRegistry::new();
        let got: Vec<String> = ["x_1.txt", "x_1.txt", "x.txt"]
            .iter()
            .map(|n| names.claim(n))
            .collect();
        assert_eq!(got, ["x_1.txt", "x_1_1.txt", "x.txt"]);

        let mut names = NameRegistry::new();
        let got: Vec<String> = ["x.txt", "x.txt", "x_1.txt"]
            .iter()
            .map(|n| names.claim(n))
            .collect();
        assert_eq!(got, ["x.txt", "x_1.txt", "x_1_1.txt"]);
    }

    #[test]
    fn registry_output_is_pairwise_distinct() {
        let input = ["a.txt", "a.txt", "a_1.txt", "b", "b", "b_1", "a.txt", "b"];
        let mut names = NameRegistry::new();
        let out: Vec<String> = input.iter().map(|n| names.claim(n)).collect();

        let unique: HashSet<&String> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
        assert_eq!(out[0], "a.txt");
        assert_eq!(out[3], "b");
        assert!(out.iter().all(|n| names.used.contains(n)));
    }
}
