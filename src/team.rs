use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::config::AppConfig;
use crate::AppState;

/// Entry from the org member listing. `url` points at the member's user
/// detail resource and is followed as-is.
#[derive(Debug, Deserialize)]
pub struct OrgMember {
    pub login: String,
    pub url: String,
}

/// User detail payload, reduced to the fields the directory renders.
#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
}

/// A fully enriched team member, as served by `GET /api/team`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub bio: String,
}

impl MemberProfile {
    fn from_user(user: GithubUser, org: &str) -> Self {
        Self {
            name: user.name.unwrap_or_else(|| user.login.clone()),
            role: user
                .bio
                .clone()
                .unwrap_or_else(|| "Team Member".to_string()),
            avatar_url: user.avatar_url,
            profile_url: user.html_url,
            bio: user.bio.unwrap_or_else(|| format!("Contributor to {org}")),
        }
    }
}

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("failed to fetch members of {org}: {status}")]
    MemberListing {
        org: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to fetch user details for {login}: {status}")]
    UserDetail {
        login: String,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("detail lookup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Thin client over the two GitHub REST endpoints the site reads.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.github_api_base.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        // GitHub rejects requests without a User-Agent.
        let mut req = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "clitools-site");
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("token {token}"));
        }
        req
    }

    pub async fn list_members(&self, org: &str) -> Result<Vec<OrgMember>, TeamError> {
        let url = format!("{}/orgs/{org}/members", self.api_base);
        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TeamError::MemberListing {
                org: org.to_string(),
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn user_details(&self, member: &OrgMember) -> Result<GithubUser, TeamError> {
        let response = self.get(&member.url).send().await?;
        if !response.status().is_success() {
            return Err(TeamError::UserDetail {
                login: member.login.clone(),
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch the public members of `org` and enrich each with profile
    /// detail. Detail lookups run concurrently as independent tasks joined
    /// all-succeed/any-fail: the first failure fails the whole call and the
    /// remaining in-flight lookups are abandoned, not cancelled.
    pub async fn fetch_team(&self, org: &str) -> Result<Vec<MemberProfile>, TeamError> {
        let members = self.list_members(org).await?;

        let handles: Vec<_> = members
            .into_iter()
            .map(|member| {
                let client = self.clone();
                let org = org.to_string();
                tokio::spawn(async move {
                    let details = client.user_details(&member).await?;
                    Ok::<_, TeamError>(MemberProfile::from_user(details, &org))
                })
            })
            .collect();

        let mut team = Vec::with_capacity(handles.len());
        for handle in handles {
            team.push(handle.await??);
        }
        Ok(team)
    }
}

/// GET /api/team. The enriched member directory for the About page.
pub async fn get_team(State(state): State<AppState>) -> impl IntoResponse {
    match state.github.fetch_team(&state.config.github_org).await {
        Ok(team) => (StatusCode::OK, Json(team)).into_response(),
        Err(e) => {
            error!("Error fetching team members: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch team members" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, bio: Option<&str>) -> GithubUser {
        GithubUser {
            login: "octocat".to_string(),
            name: name.map(str::to_string),
            bio: bio.map(str::to_string),
            avatar_url: "https://avatars.example/octocat".to_string(),
            html_url: "https://github.com/octocat".to_string(),
        }
    }

    #[test]
    fn profile_uses_display_name_and_bio_when_present() {
        let profile = MemberProfile::from_user(user(Some("The Octocat"), Some("Mascot")), "clitools-dev");
        assert_eq!(profile.name, "The Octocat");
        assert_eq!(profile.role, "Mascot");
        assert_eq!(profile.bio, "Mascot");
        assert_eq!(profile.profile_url, "https://github.com/octocat");
    }

    #[test]
    fn profile_falls_back_to_login_and_org_placeholders() {
        let profile = MemberProfile::from_user(user(None, None), "clitools-dev");
        assert_eq!(profile.name, "octocat");
        assert_eq!(profile.role, "Team Member");
        assert_eq!(profile.bio, "Contributor to clitools-dev");
    }

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let profile = MemberProfile::from_user(user(None, None), "clitools-dev");
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("avatarUrl").is_some());
        assert!(json.get("profileUrl").is_some());
        assert!(json.get("avatar_url").is_none());
    }
}
