//! # Dataset
//!
//! Turns the wire [`Payload`] into the read-only model every layout and hit
//! test works from. Loading never fails on a bad reference: the offending
//! entity is logged, recorded in [`Dataset::issues`] and skipped.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{VizError, VizResult};
use crate::types::{
    Author, AuthorGroup, Commit, CommitRef, DataIssue, FileAuthor, FileCommitEntry,
    FileCommitInfo, LineStats, Payload, RawAuthor, RawCommit, RawFileInfo, TimeExtent,
};
use crate::utils::time::{minutes_since_midnight, minutes_since_week_start, parse_instant};

#[cfg(test)]
mod tests;

/// Repository activity, resolved and indexed for drawing.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Indexed by payload position; `None` where the commit was unusable
    commits: Vec<Option<Commit>>,
    /// Main authors in payload order, the low-commit group last
    authors: Vec<Author>,
    author_rows: HashMap<String, usize>,
    time_extent: Option<TimeExtent>,
    line_stats: LineStats,
    files: Vec<FileCommitInfo>,
    file_line_stats: LineStats,
    issues: Vec<DataIssue>,
}

impl Dataset {
    pub fn from_json_str(content: &str) -> VizResult<Self> {
        let payload: Payload = serde_json::from_str(content)?;
        Ok(Self::from_payload(payload))
    }

    pub fn from_payload(payload: Payload) -> Self {
        let mut issues = Vec::new();

        let raw_commits = collect_raw_commits(&payload);
        let commits: Vec<Option<Commit>> = raw_commits
            .into_iter()
            .enumerate()
            .map(|(index, raw)| match resolve_commit(index, raw) {
                Ok(commit) => Some(commit),
                Err(issue) => {
                    issues.push(issue);
                    None
                }
            })
            .collect();

        let mut authors: Vec<Author> = payload.authors.iter().map(individual_author).collect();
        if !payload.low_commit_authors.is_empty() {
            authors.push(group_author(&payload.low_commit_authors));
        }

        let author_rows = index_author_rows(&payload, &authors);

        for commit in commits.iter().flatten() {
            match author_rows.get(&commit.email) {
                Some(&row) => authors[row].commits.push(commit.index),
                None => issues.push(DataIssue::UnknownAuthor {
                    commit: commit.index,
                    email: commit.email.clone(),
                }),
            }
        }
        for author in &mut authors {
            sort_by_time(&mut author.commits, |&index| index, &commits);
        }

        let files = payload
            .files_with_max_commits
            .iter()
            .map(|raw| resolve_file(raw, &commits, &mut issues))
            .collect();

        let time_extent = resolve_extent(&payload.time_extent, &mut issues);

        for issue in &issues {
            log::warn!("Skipping unresolvable payload entry: {}", issue);
        }
        log::debug!(
            "Loaded {} commits, {} author rows, {} files",
            commits.iter().flatten().count(),
            authors.len(),
            payload.files_with_max_commits.len()
        );

        Self {
            commits,
            authors,
            author_rows,
            time_extent,
            line_stats: payload.line_stats,
            files,
            file_line_stats: payload.filestats_line_stats,
            issues,
        }
    }

    pub fn commit(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index).and_then(Option::as_ref)
    }

    /// All usable commits, in payload order.
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter().flatten()
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn files(&self) -> &[FileCommitInfo] {
        &self.files
    }

    pub fn time_extent(&self) -> Option<TimeExtent> {
        self.time_extent
    }

    pub fn line_stats(&self) -> LineStats {
        self.line_stats
    }

    pub fn file_line_stats(&self) -> LineStats {
        self.file_line_stats
    }

    pub fn issues(&self) -> &[DataIssue] {
        &self.issues
    }

    /// Row of the author a commit is drawn under.
    pub fn author_row_for_commit(&self, commit: &Commit) -> Option<usize> {
        self.author_rows.get(&commit.email).copied()
    }

    /// Row key a commit is drawn under: the group key for low-commit authors.
    pub fn email_for_commit(&self, commit: &Commit) -> Option<&str> {
        self.author_row_for_commit(commit)
            .map(|row| self.authors[row].key.as_str())
    }

    /// Row of the author owning `email`, following aliases and group membership.
    pub fn author_row_for_email(&self, email: &str) -> Option<usize> {
        self.author_rows.get(email).copied()
    }

    fn required_extent(&self) -> VizResult<TimeExtent> {
        if let Some(extent) = self.time_extent {
            return Ok(extent);
        }
        let invalid = self.issues.iter().find_map(|issue| match issue {
            DataIssue::InvalidTimeExtent { values } => Some(values.join(", ")),
            _ => None,
        });
        Err(match invalid {
            Some(value) => VizError::InvalidTime {
                field: "time_extent",
                value,
            },
            None => VizError::MissingTimeExtent,
        })
    }

    /// The commits view needs a time extent and at least one author.
    pub fn commits_view_extent(&self) -> VizResult<TimeExtent> {
        let extent = self.required_extent()?;
        if self.authors.is_empty() {
            return Err(VizError::NoAuthors);
        }
        Ok(extent)
    }

    /// The files view needs a time extent and at least one file.
    pub fn files_view_extent(&self) -> VizResult<TimeExtent> {
        let extent = self.required_extent()?;
        if self.files.is_empty() {
            return Err(VizError::NoFiles);
        }
        Ok(extent)
    }
}

/// Read and resolve a payload file without blocking the caller.
pub async fn load_dataset_async(path: impl AsRef<Path>) -> VizResult<Dataset> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| VizError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let dataset = tokio::task::spawn_blocking(move || Dataset::from_json_str(&content))
        .await
        .map_err(|e| VizError::Render(format!("payload task failed: {}", e)))??;
    log::info!(
        "Loaded {} ({} issues)",
        path.display(),
        dataset.issues().len()
    );
    Ok(dataset)
}

/// Top-level commits, or the inline commits of the author lists when absent.
fn collect_raw_commits(payload: &Payload) -> Vec<RawCommit> {
    if !payload.commits.is_empty() {
        return payload.commits.clone();
    }
    payload
        .authors
        .iter()
        .chain(payload.low_commit_authors.iter())
        .flat_map(|author| {
            author.commits.iter().filter_map(move |commit_ref| match commit_ref {
                CommitRef::Inline(raw) => {
                    let mut raw = raw.clone();
                    raw.email.get_or_insert_with(|| author.email.clone());
                    Some(raw)
                }
                CommitRef::Index(_) => None,
            })
        })
        .collect()
}

fn resolve_commit(index: usize, raw: RawCommit) -> Result<Commit, DataIssue> {
    let time = parse_instant(&raw.time).ok_or_else(|| DataIssue::UnparsableTime {
        commit: index,
        value: raw.time.clone(),
    })?;
    Ok(Commit {
        index,
        sha: raw.sha,
        email: raw.email.unwrap_or_default(),
        name: raw.name,
        message: raw.message.lines().next().unwrap_or_default().to_string(),
        local_day_minutes: raw
            .local_day_minutes
            .unwrap_or_else(|| minutes_since_midnight(&time)),
        local_weekday_minutes: raw
            .local_weekday_minutes
            .unwrap_or_else(|| minutes_since_week_start(&time)),
        time,
        insertions: raw.insertions,
        deletions: raw.deletions,
    })
}

fn individual_author(raw: &RawAuthor) -> Author {
    Author {
        key: raw.email.clone(),
        name: raw.name.clone(),
        other_emails: raw.other_emails.clone(),
        listed_commits: raw.commits.len(),
        commits: Vec::new(),
        group: None,
    }
}

fn group_author(members: &[RawAuthor]) -> Author {
    let emails: Vec<String> = members.iter().map(|a| a.email.clone()).collect();
    let names: Vec<String> = members.iter().map(|a| a.name.clone()).collect();
    Author {
        key: emails.join(","),
        name: names.join(", "),
        other_emails: Vec::new(),
        listed_commits: members.iter().map(|a| a.commits.len()).sum(),
        commits: Vec::new(),
        group: Some(AuthorGroup { emails, names }),
    }
}

/// Map every known email (aliases and group members included) to its row.
/// The first author claiming an email keeps it.
fn index_author_rows(payload: &Payload, authors: &[Author]) -> HashMap<String, usize> {
    let mut rows = HashMap::new();
    for (row, author) in authors.iter().enumerate() {
        if author.is_group() {
            for member in &payload.low_commit_authors {
                for email in std::iter::once(&member.email).chain(&member.other_emails) {
                    rows.entry(email.clone()).or_insert(row);
                }
            }
        } else {
            for email in std::iter::once(&author.key).chain(&author.other_emails) {
                rows.entry(email.clone()).or_insert(row);
            }
        }
    }
    rows
}

fn resolve_file(
    raw: &RawFileInfo,
    commits: &[Option<Commit>],
    issues: &mut Vec<DataIssue>,
) -> FileCommitInfo {
    let mut entries = Vec::with_capacity(raw.commits.len());
    for entry in &raw.commits {
        let resolved = usize::try_from(entry.commit_index)
            .ok()
            .filter(|&index| commits.get(index).is_some_and(Option::is_some));
        match resolved {
            Some(commit_index) => entries.push(FileCommitEntry {
                commit_index,
                insertions: entry.insertions.unwrap_or(0),
                deletions: entry.deletions.unwrap_or(0),
            }),
            None => issues.push(DataIssue::CommitIndexOutOfRange {
                file: raw.file.clone(),
                index: entry.commit_index,
            }),
        }
    }
    let mut by_time: Vec<usize> = (0..entries.len()).collect();
    sort_by_time(&mut by_time, |&pos| entries[pos].commit_index, commits);
    FileCommitInfo {
        file: raw.file.clone(),
        authors: raw
            .authors
            .iter()
            .map(|a| FileAuthor {
                name: a.name.clone(),
                email: a.email.clone(),
            })
            .collect(),
        entries,
        by_time,
    }
}

fn resolve_extent(values: &[String], issues: &mut Vec<DataIssue>) -> Option<TimeExtent> {
    if values.is_empty() {
        return None;
    }
    let parsed: Option<Vec<_>> = values.iter().map(|v| parse_instant(v)).collect();
    let parsed = match parsed {
        Some(parsed) if parsed.len() >= 2 => parsed,
        _ => {
            issues.push(DataIssue::InvalidTimeExtent {
                values: values.to_vec(),
            });
            return None;
        }
    };
    // the extent of the listed instants, so a reversed pair still works
    let start = parsed.iter().min()?.with_timezone(&chrono::Utc);
    let end = parsed.iter().max()?.with_timezone(&chrono::Utc);
    Some(TimeExtent { start, end })
}

/// Sort items ascending by the time of the commit they point at, ties by index.
fn sort_by_time<T>(items: &mut [T], commit_of: impl Fn(&T) -> usize, commits: &[Option<Commit>]) {
    items.sort_by_key(|item| {
        let index = commit_of(item);
        let time = commits
            .get(index)
            .and_then(Option::as_ref)
            .map(|c| c.time.timestamp_millis())
            .unwrap_or(i64::MIN);
        (time, index)
    });
}
