use super::*;
use crate::fixtures::{sample_dataset, sample_payload};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_group_author_is_last() {
    let dataset = sample_dataset();
    let authors = dataset.authors();

    assert_eq!(authors.len(), 3);
    let group = authors.last().unwrap();
    assert!(group.is_group());
    assert_eq!(group.key, "c@x,d@x");
    assert_eq!(group.label(), "& 2 more authors");
    assert_eq!(group.commit_count(), 2);
    assert!(authors[..2].iter().all(|a| !a.is_group()));
}

#[test]
fn test_email_for_commit_resolves_group_and_aliases() {
    let dataset = sample_dataset();

    let carol = dataset.commit(3).unwrap();
    assert_eq!(dataset.email_for_commit(carol), Some("c@x,d@x"));
    assert_eq!(dataset.author_row_for_commit(carol), Some(2));

    let alias = dataset.commit(2).unwrap();
    assert_eq!(dataset.email_for_commit(alias), Some("b@x"));

    let alice = dataset.commit(0).unwrap();
    assert_eq!(dataset.email_for_commit(alice), Some("a@x"));
}

#[test]
fn test_every_commit_resolves_to_one_row() {
    let dataset = sample_dataset();
    for commit in dataset.commits() {
        let row = dataset.author_row_for_commit(commit).unwrap();
        let owners = dataset
            .authors()
            .iter()
            .filter(|a| a.commits.contains(&commit.index))
            .count();
        assert_eq!(owners, 1);
        assert!(dataset.authors()[row].commits.contains(&commit.index));
    }
    assert!(dataset.issues().is_empty());
}

#[test]
fn test_author_commits_sorted_by_time() {
    let dataset = sample_dataset();
    assert_eq!(dataset.authors()[0].commits, vec![4, 0]);
    assert_eq!(dataset.authors()[1].commits, vec![2, 1]);
    assert_eq!(dataset.authors()[2].commits, vec![5, 3]);
}

#[test]
fn test_file_entries_sorted_by_time() {
    let dataset = sample_dataset();
    let parser = &dataset.files()[0];
    assert_eq!(parser.file, "src/parser.rs");
    assert_eq!(parser.entries.len(), 3);
    // missing deletions default to zero
    assert_eq!(parser.entries[1].deletions, 0);
    assert_eq!(parser.by_time, vec![1, 2, 0]);
}

#[test]
fn test_local_minutes_follow_commit_offset() {
    let dataset = sample_dataset();
    let commit = dataset.commit(1).unwrap();
    assert_eq!(commit.local_day_minutes, 14 * 60 + 30);
    // 2020-02-15 is a Saturday
    assert_eq!(commit.local_weekday_minutes, 5 * 1440 + 14 * 60 + 30);
    assert_eq!(commit.message, "Fix bug");
    assert_eq!(dataset.commit(0).unwrap().message, "Refactor parser");
}

#[test]
fn test_payload_minutes_take_precedence() {
    let payload = json!({
        "authors": [{"name": "A", "email": "a@x"}],
        "commits": [{"email": "a@x", "time": "2020-01-01T10:00:00Z", "message": "m",
                     "insertions": 1, "deletions": 1,
                     "local_day_minutes": 42, "local_weekday_minutes": 1482}],
        "time_extent": ["2020-01-01", "2020-01-02"]
    });
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    let commit = dataset.commit(0).unwrap();
    assert_eq!(commit.local_day_minutes, 42);
    assert_eq!(commit.local_weekday_minutes, 1482);
}

#[test]
fn test_unresolvable_references_are_reported_and_skipped() {
    let mut payload = sample_payload();
    payload["commits"][5]["email"] = json!("nobody@x");
    payload["commits"][3]["time"] = json!("not a time");
    payload["files_with_max_commits"][0]["commits"]
        .as_array_mut()
        .unwrap()
        .push(json!({"commit_index": 99, "insertions": 1}));
    payload["files_with_max_commits"][1]["commits"]
        .as_array_mut()
        .unwrap()
        .push(json!({"commit_index": -1}));

    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();

    assert_eq!(dataset.issues().len(), 5);
    assert!(dataset.issues().contains(&DataIssue::UnknownAuthor {
        commit: 5,
        email: "nobody@x".to_string()
    }));
    assert!(dataset.issues().contains(&DataIssue::CommitIndexOutOfRange {
        file: "src/parser.rs".to_string(),
        index: 99
    }));
    assert!(dataset.commit(3).is_none());
    // README.md loses both the negative index and the commit with the bad time
    assert_eq!(dataset.files()[1].entries.len(), 1);
    assert_eq!(dataset.files()[0].entries.len(), 3);
    // remaining commits still resolve
    assert_eq!(dataset.commits().count(), 5);
    assert!(dataset.authors()[2].commits.is_empty());
}

#[test]
fn test_inline_author_commits() {
    let payload = json!({
        "authors": [{"email": "a@x", "commits": [
            {"time": "2020-01-01T10:00:00Z", "insertions": 10, "deletions": 2}
        ]}],
        "time_extent": ["2020-01-01", "2020-01-02"],
        "line_stats": {"min": 0, "max": 10, "percentile_value": 10}
    });
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();

    assert_eq!(dataset.commits().count(), 1);
    let commit = dataset.commit(0).unwrap();
    assert_eq!(commit.email, "a@x");
    assert_eq!(dataset.authors()[0].commits, vec![0]);
    assert_eq!(dataset.authors()[0].label(), "a@x");
    assert!(dataset.commits_view_extent().is_ok());
}

#[test]
fn test_missing_extent_and_empty_views() {
    let payload = json!({
        "authors": [{"name": "A", "email": "a@x"}],
        "commits": []
    });
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    assert!(matches!(
        dataset.commits_view_extent(),
        Err(VizError::MissingTimeExtent)
    ));

    let payload = json!({"time_extent": ["2020-01-01", "2020-01-02"]});
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    assert!(matches!(dataset.commits_view_extent(), Err(VizError::NoAuthors)));
    assert!(matches!(dataset.files_view_extent(), Err(VizError::NoFiles)));
}

#[test]
fn test_unparsable_extent() {
    let payload = json!({
        "authors": [{"name": "A", "email": "a@x"}],
        "time_extent": ["yesterday", "2020-01-02"]
    });
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    assert!(matches!(
        dataset.commits_view_extent(),
        Err(VizError::InvalidTime { field: "time_extent", .. })
    ));
}

#[test]
fn test_reversed_extent_is_normalized() {
    let payload = json!({"time_extent": ["2020-03-01", "2020-01-01"]});
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    let extent = dataset.time_extent().unwrap();
    assert!(extent.start < extent.end);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Dataset::from_json_str("{\"authors\": 3}"),
        Err(VizError::Json(_))
    ));
}

#[tokio::test]
async fn test_load_dataset_async() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("repo.json");
    std::fs::write(&path, sample_payload().to_string()).unwrap();

    let dataset = load_dataset_async(&path).await.unwrap();
    assert_eq!(dataset.commits().count(), 6);

    let missing = load_dataset_async(dir.path().join("missing.json")).await;
    assert!(matches!(missing, Err(VizError::Io { .. })));
}
