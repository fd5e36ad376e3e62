//! GitHub client for repository automation.
//!
//! Provides API access to GitHub for:
//! - Repository creation and lookup
//! - Single-file and multi-file commits
//! - Branch and pull request management
//! - Actions workflow setup and status
//!
//! The multi-file commit is the one multi-step operation in this codebase:
//! read ref, read commit, create tree, create commit, update ref. Any
//! failing step aborts the sequence before later calls are made.

use std::time::Duration;

use base64::Engine;
use futures::future::join_all;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::{Error, Result};

/// A repository as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub html_url: String,
    pub clone_url: String,
    pub default_branch: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A branch as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
    pub protected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchCommit {
    pub sha: String,
    pub url: String,
}

/// An Actions workflow run as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub id: i64,
    pub name: String,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
    pub html_url: String,
}

/// Summary of the most recent run of a workflow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub html_url: String,
    pub updated_at: String,
}

/// A pull request as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub merged_at: Option<String>,
    pub draft: Option<bool>,
}

/// One file to include in a commit.
#[derive(Debug, Clone, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Where the generated CI workflow deploys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployTarget {
    #[default]
    Netlify,
    Vercel,
    None,
}

// ----------------------------------------------------------------------
// Vendor wire shapes
// ----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RepoWire {
    node_id: String,
    name: String,
    full_name: String,
    description: Option<String>,
    private: bool,
    html_url: String,
    clone_url: String,
    default_branch: String,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<RepoWire> for Repository {
    fn from(repo: RepoWire) -> Self {
        Repository {
            id: repo.node_id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            private: repo.private,
            html_url: repo.html_url,
            clone_url: repo.clone_url,
            default_branch: repo.default_branch,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchWire {
    name: String,
    commit: BranchCommitWire,
    #[serde(default)]
    protected: bool,
}

#[derive(Debug, Deserialize)]
struct BranchCommitWire {
    sha: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RefWire {
    object: RefObjectWire,
}

#[derive(Debug, Deserialize)]
struct RefObjectWire {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitCommitWire {
    tree: TreeRefWire,
}

#[derive(Debug, Deserialize)]
struct TreeRefWire {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CreatedObjectWire {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct FileContentWire {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsWire {
    workflow_runs: Vec<WorkflowRunWire>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunWire {
    id: i64,
    name: Option<String>,
    status: Option<String>,
    conclusion: Option<String>,
    created_at: String,
    updated_at: String,
    url: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestWire {
    id: i64,
    number: i64,
    title: String,
    state: String,
    html_url: String,
    created_at: String,
    updated_at: String,
    merged_at: Option<String>,
    draft: Option<bool>,
}

/// Client for GitHub API operations.
#[derive(Clone)]
pub struct GitHubService {
    client: Client,
    api_url: String,
}

impl GitHubService {
    /// Create a new GitHub client.
    pub fn new(api_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("siteforge/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build headers with authentication.
    fn build_headers(&self, token: &str) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Ok(v) = format!("Bearer {}", token).parse() {
            headers.insert(header::AUTHORIZATION, v);
        }
        if let Ok(v) = "application/vnd.github+json".parse() {
            headers.insert(header::ACCEPT, v);
        }
        if let Ok(v) = "2022-11-28".parse() {
            headers.insert("X-GitHub-Api-Version", v);
        }
        headers
    }

    /// Check a response status and read its JSON body.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound("GitHub resource".to_string()));
            }
            let text = response.text().await.unwrap_or_default();
            return Err(Error::GitHub(format!("GitHub API error {}: {}", status, text)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHub(format!("Failed to parse response: {}", e)))
    }

    // ------------------------------------------------------------------
    // Repositories
    // ------------------------------------------------------------------

    /// Create a repository for the authenticated user.
    pub async fn create_repository(
        &self,
        name: &str,
        private: bool,
        description: Option<&str>,
        token: &str,
    ) -> Result<Repository> {
        let url = format!("{}/user/repos", self.api_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .json(&json!({
                "name": name,
                "description": description,
                "private": private,
                "auto_init": true,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let repo: RepoWire = Self::read_json(response).await?;
        info!(repo = %repo.full_name, "Created repository");
        Ok(repo.into())
    }

    /// Get a repository by owner and name.
    pub async fn get_repository(&self, owner: &str, repo: &str, token: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.api_url, owner, repo);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let repo: RepoWire = Self::read_json(response).await?;
        Ok(repo.into())
    }

    /// Resolve an explicit branch or fall back to the repository default.
    async fn resolve_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        token: &str,
    ) -> Result<String> {
        match branch {
            Some(b) => Ok(b.to_string()),
            None => Ok(self.get_repository(owner, repo, token).await?.default_branch),
        }
    }

    // ------------------------------------------------------------------
    // File contents
    // ------------------------------------------------------------------

    /// Create a file with a single commit.
    pub async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        branch: Option<&str>,
        token: &str,
    ) -> Result<()> {
        let branch = self.resolve_branch(owner, repo, branch, token).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(content);

        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            owner,
            repo,
            encode_path(path)
        );

        let response = self
            .client
            .put(&url)
            .headers(self.build_headers(token))
            .json(&json!({
                "message": message,
                "content": encoded,
                "branch": branch,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        Self::read_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Update a file, reading its current SHA first.
    pub async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        branch: Option<&str>,
        token: &str,
    ) -> Result<()> {
        let branch = self.resolve_branch(owner, repo, branch, token).await?;

        let lookup_url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url,
            owner,
            repo,
            encode_path(path),
            urlencoding::encode(&branch)
        );

        let response = self
            .client
            .get(&lookup_url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let existing: FileContentWire = Self::read_json(response).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(content);

        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            owner,
            repo,
            encode_path(path)
        );

        let response = self
            .client
            .put(&url)
            .headers(self.build_headers(token))
            .json(&json!({
                "message": message,
                "content": encoded,
                "sha": existing.sha,
                "branch": branch,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        Self::read_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Multi-file commit
    // ------------------------------------------------------------------

    /// Commit several files in one commit via the git data API.
    ///
    /// Sequence: read ref, read commit, create tree, create commit, update
    /// ref. Each step runs exactly once; a failing step aborts before any
    /// later call. Returns the new commit SHA.
    pub async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileChange],
        branch: Option<&str>,
        token: &str,
    ) -> Result<String> {
        if files.is_empty() {
            return Err(Error::Validation("files must not be empty".to_string()));
        }

        let branch = self.resolve_branch(owner, repo, branch, token).await?;

        // Step 1: latest commit SHA on the branch.
        let ref_url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            self.api_url, owner, repo, branch
        );
        let response = self
            .client
            .get(&ref_url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        let git_ref: RefWire = Self::read_json(response).await?;
        let parent_sha = git_ref.object.sha;

        // Step 2: tree SHA behind that commit.
        let commit_url = format!(
            "{}/repos/{}/{}/git/commits/{}",
            self.api_url, owner, repo, parent_sha
        );
        let response = self
            .client
            .get(&commit_url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        let parent_commit: GitCommitWire = Self::read_json(response).await?;

        // Step 3: new tree with the file changes. Entry construction is a
        // bounded data-parallel map over the input files.
        let entries = join_all(files.iter().map(|file| async move {
            json!({
                "path": file.path,
                "mode": "100644",
                "type": "blob",
                "content": file.content,
            })
        }))
        .await;

        let tree_url = format!("{}/repos/{}/{}/git/trees", self.api_url, owner, repo);
        let response = self
            .client
            .post(&tree_url)
            .headers(self.build_headers(token))
            .json(&json!({
                "base_tree": parent_commit.tree.sha,
                "tree": entries,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        let tree: CreatedObjectWire = Self::read_json(response).await?;

        // Step 4: commit pointing at the new tree.
        let message = if files.len() == 1 {
            files[0]
                .message
                .clone()
                .unwrap_or_else(|| format!("Update {}", files[0].path))
        } else {
            format!("Update {} files", files.len())
        };

        let commit_create_url = format!("{}/repos/{}/{}/git/commits", self.api_url, owner, repo);
        let response = self
            .client
            .post(&commit_create_url)
            .headers(self.build_headers(token))
            .json(&json!({
                "message": message,
                "tree": tree.sha,
                "parents": [parent_sha],
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        let commit: CreatedObjectWire = Self::read_json(response).await?;

        // Step 5: advance the branch ref.
        let update_ref_url = format!(
            "{}/repos/{}/{}/git/refs/heads/{}",
            self.api_url, owner, repo, branch
        );
        let response = self
            .client
            .patch(&update_ref_url)
            .headers(self.build_headers(token))
            .json(&json!({ "sha": commit.sha }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        Self::read_json::<serde_json::Value>(response).await?;

        info!(
            owner,
            repo,
            branch = %branch,
            files = files.len(),
            sha = %commit.sha,
            "Committed files"
        );

        Ok(commit.sha)
    }

    // ------------------------------------------------------------------
    // Branches and pull requests
    // ------------------------------------------------------------------

    /// Create a branch from a source branch (default branch when absent).
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch_name: &str,
        source_branch: Option<&str>,
        token: &str,
    ) -> Result<()> {
        let source = self.resolve_branch(owner, repo, source_branch, token).await?;

        let ref_url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            self.api_url, owner, repo, source
        );
        let response = self
            .client
            .get(&ref_url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        let git_ref: RefWire = Self::read_json(response).await?;

        let create_url = format!("{}/repos/{}/{}/git/refs", self.api_url, owner, repo);
        let response = self
            .client
            .post(&create_url)
            .headers(self.build_headers(token))
            .json(&json!({
                "ref": format!("refs/heads/{}", branch_name),
                "sha": git_ref.object.sha,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;
        Self::read_json::<serde_json::Value>(response).await?;

        info!(owner, repo, branch = branch_name, "Created branch");
        Ok(())
    }

    /// List branches in a repository.
    pub async fn list_branches(&self, owner: &str, repo: &str, token: &str) -> Result<Vec<Branch>> {
        let url = format!("{}/repos/{}/{}/branches", self.api_url, owner, repo);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let branches: Vec<BranchWire> = Self::read_json(response).await?;
        Ok(branches
            .into_iter()
            .map(|b| Branch {
                name: b.name,
                commit: BranchCommit {
                    sha: b.commit.sha,
                    url: b.commit.url,
                },
                protected: b.protected,
            })
            .collect())
    }

    /// Open a pull request.
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        head: &str,
        base: &str,
        body: Option<&str>,
        token: &str,
    ) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/{}/pulls", self.api_url, owner, repo);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .json(&json!({
                "title": title,
                "head": head,
                "base": base,
                "body": body,
            }))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let pr: PullRequestWire = Self::read_json(response).await?;
        info!(owner, repo, number = pr.number, "Opened pull request");

        Ok(PullRequest {
            id: pr.id,
            number: pr.number,
            title: pr.title,
            state: pr.state,
            html_url: pr.html_url,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            merged_at: pr.merged_at,
            draft: pr.draft,
        })
    }

    // ------------------------------------------------------------------
    // Workflows
    // ------------------------------------------------------------------

    /// Commit a workflow file under `.github/workflows/`.
    pub async fn create_workflow(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
        content: &str,
        token: &str,
    ) -> Result<()> {
        let path = format!(".github/workflows/{}", file_name);
        let message = format!("Add GitHub Actions workflow: {}", file_name);
        self.create_file(owner, repo, &path, content, &message, None, token)
            .await
    }

    /// List runs of a workflow, newest first.
    pub async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: &str,
        token: &str,
    ) -> Result<Vec<WorkflowRun>> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            self.api_url,
            owner,
            repo,
            urlencoding::encode(workflow_id)
        );

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("Request failed: {}", e)))?;

        let runs: WorkflowRunsWire = Self::read_json(response).await?;
        Ok(runs
            .workflow_runs
            .into_iter()
            .map(|run| WorkflowRun {
                id: run.id,
                name: run.name.unwrap_or_else(|| "Unnamed workflow".to_string()),
                status: run.status,
                conclusion: run.conclusion,
                created_at: run.created_at,
                updated_at: run.updated_at,
                url: run.url,
                html_url: run.html_url,
            })
            .collect())
    }

    /// Render the CI/CD workflow YAML.
    pub fn workflow_yaml(build_command: &str, test_command: &str, target: DeployTarget) -> String {
        let mut yaml = format!(
            r#"name: CI/CD Pipeline

on:
  push:
    branches: [ main, master ]
  pull_request:
    branches: [ main, master ]

jobs:
  build-and-test:
    runs-on: ubuntu-latest

    steps:
    - uses: actions/checkout@v3

    - name: Setup Node.js
      uses: actions/setup-node@v3
      with:
        node-version: '18'
        cache: 'npm'

    - name: Install dependencies
      run: npm ci

    - name: Run tests
      run: {test_command}

    - name: Build
      run: {build_command}
"#
        );

        match target {
            DeployTarget::Netlify => {
                yaml.push_str(&format!(
                    r#"
  deploy:
    needs: build-and-test
    if: github.event_name == 'push' && (github.ref == 'refs/heads/main' || github.ref == 'refs/heads/master')
    runs-on: ubuntu-latest

    steps:
    - uses: actions/checkout@v3

    - name: Setup Node.js
      uses: actions/setup-node@v3
      with:
        node-version: '18'
        cache: 'npm'

    - name: Install dependencies
      run: npm ci

    - name: Build
      run: {build_command}

    - name: Deploy to Netlify
      uses: nwtgck/actions-netlify@v2
      with:
        publish-dir: './out'
        production-branch: main
        github-token: ${{{{ secrets.GITHUB_TOKEN }}}}
        deploy-message: 'Deploy from GitHub Actions'
      env:
        NETLIFY_AUTH_TOKEN: ${{{{ secrets.NETLIFY_AUTH_TOKEN }}}}
        NETLIFY_SITE_ID: ${{{{ secrets.NETLIFY_SITE_ID }}}}
"#
                ));
            }
            DeployTarget::Vercel => {
                yaml.push_str(&format!(
                    r#"
  deploy:
    needs: build-and-test
    if: github.event_name == 'push' && (github.ref == 'refs/heads/main' || github.ref == 'refs/heads/master')
    runs-on: ubuntu-latest

    steps:
    - uses: actions/checkout@v3

    - name: Build
      run: {build_command}

    - name: Deploy to Vercel
      uses: amondnet/vercel-action@v25
      with:
        vercel-token: ${{{{ secrets.VERCEL_TOKEN }}}}
        vercel-org-id: ${{{{ secrets.VERCEL_ORG_ID }}}}
        vercel-project-id: ${{{{ secrets.VERCEL_PROJECT_ID }}}}
        vercel-args: '--prod'
"#
                ));
            }
            DeployTarget::None => {}
        }

        yaml
    }

    // ------------------------------------------------------------------
    // Automation compositions
    // ------------------------------------------------------------------

    /// Create a repository for a new project and return its URL.
    pub async fn setup_repository(
        &self,
        name: &str,
        description: Option<&str>,
        private: bool,
        token: &str,
    ) -> Result<String> {
        let repo = self.create_repository(name, private, description, token).await?;
        Ok(repo.html_url)
    }

    /// Commit a set of project files to a repository's default branch.
    pub async fn commit_project_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileChange],
        token: &str,
    ) -> Result<String> {
        self.commit_files(owner, repo, files, None, token).await
    }

    /// Create a `feature/<slug>` branch off the default branch and open a
    /// pull request for it. Returns the pull request URL.
    pub async fn create_feature_branch_and_pr(
        &self,
        owner: &str,
        repo: &str,
        feature_name: &str,
        description: Option<&str>,
        token: &str,
    ) -> Result<String> {
        let base = self.get_repository(owner, repo, token).await?.default_branch;
        let branch = format!("feature/{}", slugify(feature_name));

        self.create_branch(owner, repo, &branch, Some(&base), token)
            .await?;

        let pr = self
            .create_pull_request(owner, repo, feature_name, &branch, &base, description, token)
            .await?;

        Ok(pr.html_url)
    }

    /// Commit a generated CI/CD workflow and return its Actions URL.
    pub async fn setup_cicd(
        &self,
        owner: &str,
        repo: &str,
        build_command: &str,
        test_command: &str,
        target: DeployTarget,
        token: &str,
    ) -> Result<String> {
        let yaml = Self::workflow_yaml(build_command, test_command, target);
        self.create_workflow(owner, repo, "ci-cd.yml", &yaml, token)
            .await?;

        Ok(format!(
            "https://github.com/{}/{}/actions/workflows/ci-cd.yml",
            owner, repo
        ))
    }

    /// Summarize the latest run of a workflow.
    pub async fn workflow_status(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: &str,
        token: &str,
    ) -> Result<WorkflowStatus> {
        let runs = self
            .list_workflow_runs(owner, repo, workflow_id, token)
            .await?;

        let latest = runs
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("workflow runs for {}", workflow_id)))?;

        Ok(WorkflowStatus {
            status: latest.status,
            conclusion: latest.conclusion,
            html_url: latest.html_url,
            updated_at: latest.updated_at,
        })
    }
}

/// Percent-encode a repository file path, keeping `/` separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reduce a feature name to a branch-safe slug.
fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Add Login Form"), "add-login-form");
        assert_eq!(slugify("  spaces  everywhere "), "spaces-everywhere");
        assert_eq!(slugify("emoji 🎉 name"), "emoji-name");
    }

    #[test]
    fn test_workflow_yaml_includes_commands() {
        let yaml =
            GitHubService::workflow_yaml("npm run build", "npm test", DeployTarget::Netlify);
        assert!(yaml.contains("run: npm run build"));
        assert!(yaml.contains("run: npm test"));
        assert!(yaml.contains("Deploy to Netlify"));
        assert!(yaml.contains("${{ secrets.NETLIFY_AUTH_TOKEN }}"));
    }

    #[test]
    fn test_workflow_yaml_without_deploy_job() {
        let yaml = GitHubService::workflow_yaml("npm run build", "npm test", DeployTarget::None);
        assert!(!yaml.contains("deploy:"));
    }

    #[test]
    fn test_workflow_yaml_vercel() {
        let yaml = GitHubService::workflow_yaml("npm run build", "npm test", DeployTarget::Vercel);
        assert!(yaml.contains("Deploy to Vercel"));
        assert!(!yaml.contains("Netlify"));
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(
            encode_path(".github/workflows/ci cd.yml"),
            ".github/workflows/ci%20cd.yml"
        );
    }
}
