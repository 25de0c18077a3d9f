// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Azure DevOps Git REST client (PAT discovery, repository listing, paginated PR fetch)
// role: api/client
// inputs: env AZURE_DEVOPS_PAT / AZURE_DEVOPS_EXT_PAT; env ARR_TEST_*_JSON fixtures for offline runs
// outputs: Typed repository and pull request collections in API listing order
// side_effects: Network calls to dev.azure.com unless env fixtures are present
// invariants:
// - Backend selection happens before any request; a missing credential fails fast
// - Pagination advances skip by the page size and stops on the first short page
// - A page budget bounds the skip/top loop; exceeding it is an error, not a truncation
// errors: Fatal; transport and HTTP-status failures surface to the caller via Result
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::model::{ApiList, PullRequest, Repository};

const API_VERSION: &str = "7.0";

/// Upper bound on pages fetched per repository. A source that ignores `$skip`
/// would otherwise replay the first page forever.
const MAX_PAGES: u32 = 1000;

/// Discover an Azure DevOps PAT: AZURE_DEVOPS_PAT first, then the az CLI
/// convention AZURE_DEVOPS_EXT_PAT.
pub fn discover_credential() -> Option<String> {
  if let Ok(t) = std::env::var("AZURE_DEVOPS_PAT") {
    if !t.trim().is_empty() {
      return Some(t);
    }
  }

  if let Ok(t) = std::env::var("AZURE_DEVOPS_EXT_PAT") {
    if !t.trim().is_empty() {
      return Some(t);
    }
  }

  None
}

/// Basic authorization header for a PAT. The username part is empty; the
/// service only inspects the password slot.
pub fn basic_auth_header(pat: &str) -> String {
  format!("Basic {}", STANDARD.encode(format!(":{pat}")))
}

// --- Trait seam for the Azure DevOps Git API ---
pub trait AdoApi {
  fn list_repositories(&self) -> Result<Vec<Repository>>;
  fn list_pull_requests(&self, repo_id: &str, skip: u32, top: u32) -> Result<Vec<PullRequest>>;
}

struct AdoHttpApi {
  agent: ureq::Agent,
  base_url: String,
  auth: String,
}

impl AdoHttpApi {
  fn new(organization: &str, project: &str, pat: &str) -> Self {
    Self {
      agent: ureq::AgentBuilder::new().build(),
      base_url: format!("https://dev.azure.com/{}/{}", organization, project),
      auth: basic_auth_header(pat),
    }
  }

  fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
    let resp = self
      .agent
      .get(url)
      .set("Accept", "application/json")
      .set("Authorization", &self.auth)
      .call()
      .with_context(|| format!("GET {url}"))?;

    resp.into_json::<T>().with_context(|| format!("decoding response from {url}"))
  }
}

impl AdoApi for AdoHttpApi {
  fn list_repositories(&self) -> Result<Vec<Repository>> {
    let url = format!("{}/_apis/git/repositories?api-version={}", self.base_url, API_VERSION);
    let list: ApiList<Repository> = self.get_json(&url)?;

    Ok(list.value)
  }

  fn list_pull_requests(&self, repo_id: &str, skip: u32, top: u32) -> Result<Vec<PullRequest>> {
    let url = format!(
      "{}/_apis/git/repositories/{}/pullrequests?searchCriteria.status=all&$top={}&$skip={}&api-version={}",
      self.base_url, repo_id, top, skip, API_VERSION
    );
    let list: ApiList<PullRequest> = self.get_json(&url)?;

    Ok(list.value)
  }
}

// Env-backed fixture API. ARR_TEST_REPOS_JSON holds the repository listing;
// ARR_TEST_PRS_JSON maps repository id to its full PR list, and the skip/top
// window is applied here so pagination behaves like the live service.
struct AdoEnvApi;

impl AdoApi for AdoEnvApi {
  fn list_repositories(&self) -> Result<Vec<Repository>> {
    let raw = std::env::var("ARR_TEST_REPOS_JSON").unwrap_or_else(|_| "[]".to_string());
    let repos: Vec<Repository> = serde_json::from_str(&raw).context("parsing ARR_TEST_REPOS_JSON")?;

    Ok(repos)
  }

  fn list_pull_requests(&self, repo_id: &str, skip: u32, top: u32) -> Result<Vec<PullRequest>> {
    let raw = std::env::var("ARR_TEST_PRS_JSON").unwrap_or_else(|_| "{}".to_string());
    let by_repo: std::collections::HashMap<String, Vec<PullRequest>> =
      serde_json::from_str(&raw).context("parsing ARR_TEST_PRS_JSON")?;

    let prs = by_repo.get(repo_id).cloned().unwrap_or_default();
    let start = (skip as usize).min(prs.len());
    let end = start.saturating_add(top as usize).min(prs.len());

    Ok(prs[start..end].to_vec())
  }
}

fn env_wants_mock() -> bool {
  std::env::var("ARR_TEST_REPOS_JSON").is_ok() || std::env::var("ARR_TEST_PRS_JSON").is_ok()
}

/// Select the API backend. Env fixtures win when present; otherwise a
/// credential is required up front, before any request goes out.
pub fn build_api(organization: &str, project: &str) -> Result<Box<dyn AdoApi>> {
  if env_wants_mock() {
    return Ok(Box::new(AdoEnvApi));
  }

  let Some(pat) = discover_credential() else {
    bail!("no Azure DevOps credential found; set AZURE_DEVOPS_PAT (or AZURE_DEVOPS_EXT_PAT)");
  };

  Ok(Box::new(AdoHttpApi::new(organization, project, &pat)))
}

// Public constructors for dependency injection in higher layers/tests.
#[cfg(any(test, feature = "testutil"))]
pub fn make_env_api() -> Box<dyn AdoApi> {
  Box::new(AdoEnvApi)
}

/// Resolve configured repository names against the project listing. Match
/// order follows the listing response. Unknown names warn and are skipped;
/// an empty match set is fatal.
pub fn resolve_repositories(api: &dyn AdoApi, names: &[String]) -> Result<Vec<Repository>> {
  let listing = api.list_repositories().context("listing repositories")?;

  let mut matched: Vec<Repository> = Vec::new();

  for repo in listing {
    if names.iter().any(|n| n == &repo.name) {
      matched.push(repo);
    }
  }

  for name in names {
    if !matched.iter().any(|r| &r.name == name) {
      eprintln!("[ado] repository {name} not found in project; skipping");
    }
  }

  if matched.is_empty() {
    bail!("none of the requested repositories exist in the project");
  }

  Ok(matched)
}

/// Fetch every pull request for one repository via the skip/top window.
/// The first page shorter than the page size ends the loop.
pub fn fetch_all_pull_requests(api: &dyn AdoApi, repo: &Repository, page_size: u32) -> Result<Vec<PullRequest>> {
  let mut all: Vec<PullRequest> = Vec::new();
  let mut skip: u32 = 0;
  let mut pages: u32 = 0;

  loop {
    let batch = api
      .list_pull_requests(&repo.id, skip, page_size)
      .with_context(|| format!("listing pull requests for {}", repo.name))?;

    let last = batch.len() < page_size as usize;
    all.extend(batch);

    if last {
      break;
    }

    pages += 1;

    if pages >= MAX_PAGES {
      bail!(
        "pull request listing for {} did not terminate after {} pages; refusing to loop",
        repo.name,
        MAX_PAGES
      );
    }

    skip += page_size;
  }

  Ok(all)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn pr(id: i64) -> PullRequest {
    PullRequest {
      pull_request_id: id,
      ..PullRequest::default()
    }
  }

  /// Serves a fixed PR list through the same skip/top window as the service.
  struct PagedApi {
    prs: Vec<PullRequest>,
  }

  impl AdoApi for PagedApi {
    fn list_repositories(&self) -> Result<Vec<Repository>> {
      Ok(vec![Repository {
        id: "r1".into(),
        name: "one".into(),
      }])
    }

    fn list_pull_requests(&self, _repo_id: &str, skip: u32, top: u32) -> Result<Vec<PullRequest>> {
      let start = (skip as usize).min(self.prs.len());
      let end = start.saturating_add(top as usize).min(self.prs.len());
      Ok(self.prs[start..end].to_vec())
    }
  }

  /// Ignores skip entirely, like a server that drops the query string.
  struct EndlessApi;

  impl AdoApi for EndlessApi {
    fn list_repositories(&self) -> Result<Vec<Repository>> {
      Ok(Vec::new())
    }

    fn list_pull_requests(&self, _repo_id: &str, _skip: u32, top: u32) -> Result<Vec<PullRequest>> {
      Ok(vec![PullRequest::default(); top as usize])
    }
  }

  struct StaticApi {
    repos: Vec<Repository>,
  }

  impl AdoApi for StaticApi {
    fn list_repositories(&self) -> Result<Vec<Repository>> {
      Ok(self.repos.clone())
    }

    fn list_pull_requests(&self, _repo_id: &str, _skip: u32, _top: u32) -> Result<Vec<PullRequest>> {
      Ok(Vec::new())
    }
  }

  #[test]
  fn basic_auth_header_encodes_empty_username() {
    // base64(":secret")
    assert_eq!(basic_auth_header("secret"), "Basic OnNlY3JldA==");
  }

  #[test]
  #[serial]
  fn credential_env_precedence_and_blank_rejection() {
    std::env::set_var("AZURE_DEVOPS_PAT", "primary");
    std::env::set_var("AZURE_DEVOPS_EXT_PAT", "secondary");
    assert_eq!(discover_credential().as_deref(), Some("primary"));

    std::env::set_var("AZURE_DEVOPS_PAT", "   ");
    assert_eq!(discover_credential().as_deref(), Some("secondary"));

    std::env::remove_var("AZURE_DEVOPS_PAT");
    assert_eq!(discover_credential().as_deref(), Some("secondary"));

    std::env::remove_var("AZURE_DEVOPS_EXT_PAT");
    assert_eq!(discover_credential(), None);
  }

  #[test]
  #[serial]
  fn build_api_without_credential_or_fixtures_fails() {
    std::env::remove_var("ARR_TEST_REPOS_JSON");
    std::env::remove_var("ARR_TEST_PRS_JSON");
    std::env::remove_var("AZURE_DEVOPS_PAT");
    std::env::remove_var("AZURE_DEVOPS_EXT_PAT");

    let err = build_api("org", "proj").err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("AZURE_DEVOPS_PAT"), "unexpected error: {err}");
  }

  #[test]
  #[serial]
  fn build_api_prefers_fixtures_over_missing_credential() {
    std::env::remove_var("AZURE_DEVOPS_PAT");
    std::env::remove_var("AZURE_DEVOPS_EXT_PAT");
    std::env::set_var("ARR_TEST_REPOS_JSON", r#"[{"id": "r1", "name": "alpha"}]"#);
    std::env::remove_var("ARR_TEST_PRS_JSON");

    let api = build_api("org", "proj").unwrap();
    let repos = api.list_repositories().unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "alpha");

    std::env::remove_var("ARR_TEST_REPOS_JSON");
  }

  #[test]
  #[serial]
  fn env_api_applies_skip_top_window() {
    let fixture = serde_json::json!({
      "r1": [
        {"pullRequestId": 1}, {"pullRequestId": 2}, {"pullRequestId": 3}
      ]
    });
    std::env::set_var("ARR_TEST_PRS_JSON", fixture.to_string());

    let api = make_env_api();
    let first = api.list_pull_requests("r1", 0, 2).unwrap();
    let second = api.list_pull_requests("r1", 2, 2).unwrap();
    let past_end = api.list_pull_requests("r1", 9, 2).unwrap();
    let other = api.list_pull_requests("unknown", 0, 2).unwrap();

    assert_eq!(first.iter().map(|p| p.pull_request_id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(second.iter().map(|p| p.pull_request_id).collect::<Vec<_>>(), vec![3]);
    assert!(past_end.is_empty());
    assert!(other.is_empty());

    std::env::remove_var("ARR_TEST_PRS_JSON");
  }

  #[test]
  #[serial]
  fn env_api_rejects_malformed_fixture() {
    std::env::set_var("ARR_TEST_PRS_JSON", "not json");
    let api = make_env_api();
    assert!(api.list_pull_requests("r1", 0, 10).is_err());
    std::env::remove_var("ARR_TEST_PRS_JSON");
  }

  #[test]
  fn fetch_walks_every_page_and_stops_on_short_page() {
    let api = PagedApi {
      prs: (1..=5).map(pr).collect(),
    };
    let repo = Repository {
      id: "r1".into(),
      name: "one".into(),
    };

    let all = fetch_all_pull_requests(&api, &repo, 2).unwrap();
    assert_eq!(all.iter().map(|p| p.pull_request_id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn fetch_handles_totals_that_divide_evenly() {
    // 4 PRs with page size 2: the third page is empty and ends the loop.
    let api = PagedApi {
      prs: (1..=4).map(pr).collect(),
    };
    let repo = Repository {
      id: "r1".into(),
      name: "one".into(),
    };

    let all = fetch_all_pull_requests(&api, &repo, 2).unwrap();
    assert_eq!(all.len(), 4);
  }

  #[test]
  fn fetch_bails_when_pagination_never_terminates() {
    let repo = Repository {
      id: "r1".into(),
      name: "loop".into(),
    };

    let err = fetch_all_pull_requests(&EndlessApi, &repo, 1)
      .err()
      .map(|e| e.to_string())
      .unwrap_or_default();
    assert!(err.contains("did not terminate"), "unexpected error: {err}");
  }

  #[test]
  fn resolve_keeps_listing_order_and_skips_unknown_names() {
    let api = StaticApi {
      repos: vec![
        Repository { id: "a".into(), name: "alpha".into() },
        Repository { id: "b".into(), name: "beta".into() },
        Repository { id: "c".into(), name: "gamma".into() },
      ],
    };

    let names = vec!["gamma".to_string(), "alpha".to_string(), "missing".to_string()];
    let matched = resolve_repositories(&api, &names).unwrap();

    let got: Vec<&str> = matched.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(got, vec!["alpha", "gamma"]);
  }

  #[test]
  fn resolve_with_no_matches_is_fatal() {
    let api = StaticApi { repos: Vec::new() };
    let err = resolve_repositories(&api, &["alpha".to_string()])
      .err()
      .map(|e| e.to_string())
      .unwrap_or_default();
    assert!(err.contains("none of the requested repositories"), "unexpected error: {err}");
  }
}
