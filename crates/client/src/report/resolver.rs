//! Target resolution.
//!
//! Maps zero or more caller-supplied selectors to concrete search
//! applications. With no selector the farm must contain exactly one
//! application; otherwise the choice is ambiguous and the caller has to
//! name one. Selectors that match nothing are skipped with a warning,
//! not fatal.

use tracing::warn;
use uuid::Uuid;

use crate::client::SearchAdminClient;
use crate::error::{ClientError, Result};
use crate::models::SearchApplication;

/// One caller-supplied target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    Name(String),
    Id(Uuid),
}

impl TargetSelector {
    /// Interpret a raw argument: anything that parses as a UUID is an
    /// id, everything else a name. Id interpretation takes precedence,
    /// so an application whose name is itself a UUID string can only be
    /// selected by its actual id.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(raw.to_string()),
        }
    }

    fn matches(&self, app: &SearchApplication) -> bool {
        match self {
            Self::Name(name) => app.name.eq_ignore_ascii_case(name),
            Self::Id(id) => app.id == *id,
        }
    }
}

/// Resolve selectors to applications.
///
/// Pure lookup against one enumeration call; no side effects.
pub async fn resolve_targets(
    client: &SearchAdminClient,
    selectors: &[TargetSelector],
) -> Result<Vec<SearchApplication>> {
    let applications = client.list_applications().await?;

    if selectors.is_empty() {
        return match applications.len() {
            0 => Err(ClientError::NotFound(
                "no search service applications in the farm".to_string(),
            )),
            1 => Ok(applications),
            count => Err(ClientError::AmbiguousTarget { count }),
        };
    }

    let mut resolved = Vec::new();
    for selector in selectors {
        match applications.iter().find(|app| selector.matches(app)) {
            Some(app) => resolved.push(app.clone()),
            None => warn!(?selector, "search application not found, skipping"),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_ids_from_names() {
        let id = "8f5f0e6a-3b5c-4d7e-9f0a-1b2c3d4e5f60";
        assert!(matches!(TargetSelector::parse(id), TargetSelector::Id(_)));
        assert_eq!(
            TargetSelector::parse("Search Service Application"),
            TargetSelector::Name("Search Service Application".to_string())
        );
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let app = SearchApplication {
            id: Uuid::new_v4(),
            name: "Search Service Application".to_string(),
            constellation: "C0".to_string(),
        };
        assert!(TargetSelector::Name("search service application".to_string()).matches(&app));
        assert!(!TargetSelector::Name("other".to_string()).matches(&app));
    }
}
