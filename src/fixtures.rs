//! Shared payloads for unit tests.

use serde_json::json;

use crate::dataset::Dataset;

/// Two main authors (one with an alias), two low-commit authors, two files.
pub fn sample_payload() -> serde_json::Value {
    json!({
        "authors": [
            {"name": "Alice Smith", "email": "a@x", "commits": [0, 4]},
            {"name": "Bob Jones", "email": "b@x", "other_emails": ["bob@old"], "commits": [1, 2]}
        ],
        "low_commit_authors": [
            {"name": "Carol", "email": "c@x", "commits": [3]},
            {"name": "Dave", "email": "d@x", "commits": [5]}
        ],
        "commits": [
            {"email": "a@x", "name": "Alice Smith", "sha": "c0", "time": "2020-03-01T09:00:00Z",
             "message": "Refactor parser\n\nLong body", "insertions": 120, "deletions": 30},
            {"email": "b@x", "name": "Bob Jones", "sha": "c1", "time": "2020-02-15T14:30:00+01:00",
             "message": "Fix bug", "insertions": 5, "deletions": 1},
            {"email": "bob@old", "name": "Bob Jones", "sha": "c2", "time": "2020-02-01T08:00:00Z",
             "message": "Old alias commit", "insertions": 40, "deletions": 10},
            {"email": "c@x", "name": "Carol", "sha": "c3", "time": "2020-01-20T22:15:00Z",
             "message": "Docs", "insertions": 3, "deletions": 0},
            {"email": "a@x", "name": "Alice Smith", "sha": "c4", "time": "2020-01-10T10:00:00Z",
             "message": "Initial parser", "insertions": 300, "deletions": 0},
            {"email": "d@x", "name": "Dave", "sha": "c5", "time": "2020-01-05T12:00:00Z",
             "message": "Typo", "insertions": 1, "deletions": 1}
        ],
        "time_extent": ["2020-01-01T00:00:00Z", "2020-03-31T00:00:00Z"],
        "line_stats": {"min": 0, "max": 300, "percentile_value": 100},
        "files_with_max_commits": [
            {"file": "src/parser.rs",
             "authors": [{"name": "Alice Smith", "email": "a@x"}, {"name": "Bob Jones", "email": "b@x"}],
             "commits": [
                {"commit_index": 0, "insertions": 100, "deletions": 20},
                {"commit_index": 4, "insertions": 250},
                {"commit_index": 2, "insertions": 10, "deletions": 10}
             ]},
            {"file": "README.md",
             "authors": [{"name": "Carol", "email": "c@x"}, {"name": "Alice Smith", "email": "a@x"}],
             "commits": [
                {"commit_index": 3, "insertions": 3, "deletions": 0},
                {"commit_index": 1, "insertions": 2, "deletions": 1}
             ]}
        ],
        "filestats_line_stats": {"min": 0, "max": 250, "percentile_value": 100}
    })
}

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_dataset() -> Dataset {
    init_logger();
    Dataset::from_json_str(&sample_payload().to_string()).unwrap()
}
