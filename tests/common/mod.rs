use assert_cmd::Command;

#[allow(dead_code)]
pub fn bin() -> Command {
  Command::cargo_bin("ado-review-report").unwrap()
}

/// Two-repository project listing used by most end-to-end tests.
#[allow(dead_code)]
pub fn repos_fixture() -> String {
  serde_json::json!([
    {"id": "r-api", "name": "platform-api"},
    {"id": "r-web", "name": "platform-web"}
  ])
  .to_string()
}

/// Pull requests keyed by repository id.
///
/// With the June 2025 window, reviewers alice+bob, and review date mode this
/// yields exactly three normalized rows: alice and bob on PR 412, and alice
/// on PR 413 through the creation-date fallback. Carol is unconfigured, the
/// zero vote on PR 413 is not a decision, and the July review on PR 900
/// falls outside the window.
#[allow(dead_code)]
pub fn prs_fixture() -> String {
  serde_json::json!({
    "r-api": [
      {
        "pullRequestId": 412,
        "title": "Add retry to uploader",
        "creationDate": "2025-06-02T09:15:00Z",
        "createdBy": {"displayName": "Dana Developer"},
        "reviewers": [
          {"uniqueName": "Alice@Example.com", "vote": 10, "reviewedDate": "2025-06-03T11:00:00Z"},
          {"uniqueName": "bob@example.com", "vote": -10, "reviewedDate": "2025-06-03T15:20:00Z"},
          {"uniqueName": "carol@example.com", "vote": 10, "reviewedDate": "2025-06-03T12:00:00Z"}
        ]
      },
      {
        "pullRequestId": 413,
        "title": "Fix pagination off by one",
        "creationDate": "2025-06-05T10:00:00Z",
        "createdBy": {"displayName": "Dana Developer"},
        "reviewers": [
          {"uniqueName": "alice@example.com", "vote": 5},
          {"uniqueName": "bob@example.com", "vote": 0, "reviewedDate": "2025-06-06T09:00:00Z"}
        ]
      }
    ],
    "r-web": [
      {
        "pullRequestId": 900,
        "title": "Update header layout",
        "creationDate": "2025-06-10T08:30:00Z",
        "createdBy": {"displayName": "Evan Example"},
        "reviewers": [
          {"uniqueName": "alice@example.com", "vote": 10, "reviewedDate": "2025-07-02T09:00:00Z"}
        ]
      }
    ]
  })
  .to_string()
}

/// Standard invocation against the fixture project, writing to `out_dir`.
/// The first reviewer is deliberately mixed-case; every report artifact must
/// still come out folded to lowercase.
#[allow(dead_code)]
pub fn base_args(out_dir: &str) -> Vec<String> {
  [
    "--org",
    "contoso",
    "--project",
    "platform",
    "--repos",
    "platform-api",
    "platform-web",
    "--reviewers",
    "Alice@Example.com",
    "bob@example.com",
    "--from",
    "2025-06-01",
    "--to",
    "2025-06-30",
    "--out",
    out_dir,
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}
