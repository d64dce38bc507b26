//! Merging per-file reports into per-language project summaries.

use std::collections::BTreeMap;

use crate::analysis::{NamingDistribution, NamingProfile, Role, StyleTag};
use crate::formatting::FormattingProfile;
use crate::language::Language;
use crate::profile::FileReport;

/// Merged naming and formatting for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    pub file_count: usize,
    pub naming: NamingProfile,
    pub formatting: FormattingProfile,
}

/// Kind of file-local problem recorded during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The file could not be read or is not text; it was skipped.
    Read,
    /// The file did not parse; it contributed formatting only.
    Parse,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::Read => "read",
            WarningKind::Parse => "parse",
        }
    }
}

/// A file-local problem that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWarning {
    pub file: String,
    pub kind: WarningKind,
    pub message: String,
}

/// Style summary for a whole project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectReport {
    pub project: String,
    /// Number of files discovered, whether or not they were profiled.
    pub total_files: usize,
    pub languages: BTreeMap<Language, LanguageSummary>,
    pub warnings: Vec<FileWarning>,
}

impl ProjectReport {
    /// A report for a run that found no files.
    pub fn empty(project: &str) -> Self {
        Self {
            project: project.to_string(),
            total_files: 0,
            languages: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(self, warnings: Vec<FileWarning>) -> Self {
        Self { warnings, ..self }
    }
}

/// Merge file reports into a project report, grouped by language.
///
/// Reports with an unrecognized language are ignored. Within a group, files
/// keep their order in `reports`, which decides formatting tie-breaks.
pub fn merge(project: &str, total_files: usize, reports: &[FileReport]) -> ProjectReport {
    let mut groups: BTreeMap<Language, Vec<&FileReport>> = BTreeMap::new();
    for report in reports {
        if let Some(lang) = report.language {
            groups.entry(lang).or_default().push(report);
        }
    }

    let languages = groups
        .into_iter()
        .filter(|(_, group)| !group.is_empty())
        .map(|(lang, group)| {
            let naming: Vec<&NamingProfile> = group.iter().map(|r| &r.naming).collect();
            let formatting: Vec<&FormattingProfile> =
                group.iter().map(|r| &r.formatting).collect();
            (
                lang,
                LanguageSummary {
                    file_count: group.len(),
                    naming: merge_naming(&naming),
                    formatting: merge_formatting(&formatting),
                },
            )
        })
        .collect();

    ProjectReport {
        project: project.to_string(),
        total_files,
        languages,
        warnings: Vec::new(),
    }
}

/// Average naming distributions role by role.
///
/// For each role only files that observed at least one identifier take part.
/// Each tag's merged share is the mean of its per-file shares over those
/// files, a missing tag counting as 0, so every file weighs the same no
/// matter how many identifiers it has.
pub fn merge_naming(profiles: &[&NamingProfile]) -> NamingProfile {
    let mut merged = NamingProfile::default();
    for role in Role::ALL {
        let participants: Vec<&NamingDistribution> = profiles
            .iter()
            .map(|p| p.role(role))
            .filter(|d| !d.is_empty())
            .collect();
        *merged.role_mut(role) = merge_distributions(&participants);
    }
    merged
}

/// Mean of the given distributions, tag by tag.
pub fn merge_distributions(distributions: &[&NamingDistribution]) -> NamingDistribution {
    if distributions.is_empty() {
        return NamingDistribution::new();
    }

    let mut sums: BTreeMap<StyleTag, f64> = BTreeMap::new();
    for dist in distributions {
        for (tag, share) in dist.iter() {
            *sums.entry(tag).or_insert(0.0) += share;
        }
    }

    let n = distributions.len() as f64;
    NamingDistribution::from_shares(sums.into_iter().map(|(t, s)| (t, s / n)).collect())
}

/// Merge formatting profiles.
///
/// Categorical fields take the most frequent value with ties going to the
/// value seen first. Only non-zero indent sizes are candidates.
pub fn merge_formatting(profiles: &[&FormattingProfile]) -> FormattingProfile {
    if profiles.is_empty() {
        return FormattingProfile::default();
    }

    let n = profiles.len();
    let mean_total: usize = profiles.iter().map(|p| p.line_length_mean).sum();

    FormattingProfile {
        indentation_type: most_frequent(profiles.iter().map(|p| p.indentation_type))
            .unwrap_or_default(),
        indentation_size: most_frequent(
            profiles
                .iter()
                .map(|p| p.indentation_size)
                .filter(|&s| s > 0),
        )
        .unwrap_or(0),
        line_length_mean: mean_total / n,
        line_length_max: profiles.iter().map(|p| p.line_length_max).max().unwrap_or(0),
        quote_style: most_frequent(profiles.iter().map(|p| p.quote_style)).unwrap_or_default(),
        trailing_newline: profiles.iter().all(|p| p.trailing_newline),
    }
}

/// The most frequent item; among equally frequent items, the one that
/// appeared first.
pub fn most_frequent<T, I>(items: I) -> Option<T>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(v, _)| *v == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, n) in counts {
        match best {
            Some((_, b)) if n <= b => {}
            _ => best = Some((value, n)),
        }
    }
    best.map(|(v, _)| v)
}
