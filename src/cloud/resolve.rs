/// Resource lookup: convert a user-provided ID or name to a specific resource.
///
/// Resolution strategy (in priority order):
///
/// 1. **Exact ID match.**
/// 2. **Exact name match** (case-insensitive). Succeeds only if exactly one
///    resource matches.
/// 3. **Partial match**: ID prefix or name substring (case-insensitive).
///    Succeeds only if exactly one resource matches.
/// 4. **Not found**: fuzzy-score every name and report the closest ones as
///    suggestions. A fuzzy match is never acted on.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::errors::CloudError;
use crate::api::{CloudApi, Firewall, LoadBalancer};

/// Maximum number of "did you mean" suggestions.
const MAX_SUGGESTIONS: usize = 3;

/// A resource addressable by ID or name.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Named for Firewall {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for LoadBalancer {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Find a firewall by ID or name.
///
/// # Errors
///
/// Returns `CloudError::Api` if listing fails, otherwise as [`find`].
pub fn find_firewall(api: &dyn CloudApi, search: &str) -> Result<Firewall, CloudError> {
    let firewalls = api.list_firewalls()?;
    find(&firewalls, "firewall", search).cloned()
}

/// Find a load balancer by ID or name.
///
/// # Errors
///
/// Returns `CloudError::Api` if listing fails, otherwise as [`find`].
pub fn find_load_balancer(api: &dyn CloudApi, search: &str) -> Result<LoadBalancer, CloudError> {
    let load_balancers = api.list_load_balancers()?;
    find(&load_balancers, "load balancer", search).cloned()
}

/// Resolve `search` against `items`.
///
/// # Errors
///
/// - `CloudError::InvalidFlag` — `search` is blank
/// - `CloudError::NotFound` — nothing matches
/// - `CloudError::AmbiguousMatch` — more than one resource matches at the first
///   strategy that finds anything
pub fn find<'a, T: Named>(
    items: &'a [T],
    kind: &'static str,
    search: &str,
) -> Result<&'a T, CloudError> {
    // A blank search would partially match everything.
    if search.trim().is_empty() {
        return Err(CloudError::InvalidFlag(format!("a {kind} ID or name is required")));
    }

    // Strategy 1: exact ID
    if let Some(item) = items.iter().find(|i| i.id() == search) {
        return Ok(item);
    }

    let needle = search.to_lowercase();

    // Strategy 2: exact name
    let exact: Vec<&T> = items
        .iter()
        .filter(|i| i.name().to_lowercase() == needle)
        .collect();
    if let Some(item) = single(exact, kind, search)? {
        return Ok(item);
    }

    // Strategy 3: partial
    let partial: Vec<&T> = items
        .iter()
        .filter(|i| i.id().starts_with(search) || i.name().to_lowercase().contains(&needle))
        .collect();
    if let Some(item) = single(partial, kind, search)? {
        return Ok(item);
    }

    Err(CloudError::NotFound {
        kind,
        search: search.to_owned(),
        suggestions: suggest(items, search),
    })
}

/// `Ok(Some)` for one match, `Ok(None)` for none, ambiguity error otherwise.
fn single<'a, T: Named>(
    matches: Vec<&'a T>,
    kind: &'static str,
    search: &str,
) -> Result<Option<&'a T>, CloudError> {
    match matches.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        many => Err(CloudError::AmbiguousMatch {
            kind,
            search: search.to_owned(),
            candidates: many
                .iter()
                .map(|i| format!("{} ({})", i.name(), i.id()))
                .collect(),
        }),
    }
}

fn suggest<T: Named>(items: &[T], search: &str) -> Vec<String> {
    let pattern = Pattern::parse(search, CaseMatching::Ignore, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(&str, u32)> = items
        .iter()
        .filter_map(|item| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(item.name(), &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| (item.name(), score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, firewall};

    fn firewalls() -> Vec<Firewall> {
        vec![
            firewall("3f1c-aaaa", "default-default"),
            firewall("8b2e-bbbb", "web-frontend"),
            firewall("8b9d-cccc", "web-backend"),
            firewall("c0de-dddd", "Database"),
        ]
    }

    #[test]
    fn test_exact_id() {
        let f = firewalls();
        assert_eq!(find(&f, "firewall", "8b9d-cccc").unwrap().name, "web-backend");
    }

    #[test]
    fn test_exact_name_case_insensitive() {
        let f = firewalls();
        assert_eq!(find(&f, "firewall", "database").unwrap().id, "c0de-dddd");
    }

    #[test]
    fn test_unique_partial() {
        let f = firewalls();
        assert_eq!(find(&f, "firewall", "front").unwrap().id, "8b2e-bbbb");
        assert_eq!(find(&f, "firewall", "3f1c").unwrap().id, "3f1c-aaaa");
    }

    #[test]
    fn test_ambiguous_partial() {
        let f = firewalls();
        match find(&f, "firewall", "web") {
            Err(CloudError::AmbiguousMatch { candidates, .. }) => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates.contains(&"web-frontend (8b2e-bbbb)".to_owned()));
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(matches!(
            find(&f, "firewall", "8b"),
            Err(CloudError::AmbiguousMatch { .. })
        ));
    }

    #[test]
    fn test_exact_name_beats_partial() {
        let f = vec![firewall("1", "web"), firewall("2", "web-old")];
        assert_eq!(find(&f, "firewall", "web").unwrap().id, "1");
    }

    #[test]
    fn test_blank_search_rejected() {
        let f = vec![firewall("3f1c-aaaa", "default-default")];
        for search in ["", "  "] {
            match find(&f, "firewall", search) {
                Err(CloudError::InvalidFlag(msg)) => {
                    assert_eq!(msg, "a firewall ID or name is required");
                }
                other => panic!("expected invalid flag, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_not_found_suggests() {
        let f = firewalls();
        match find(&f, "firewall", "dtbase") {
            Err(CloudError::NotFound { suggestions, .. }) => {
                assert_eq!(suggestions.first().map(String::as_str), Some("Database"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_find_firewall_via_api() {
        let api = FakeApi {
            firewalls: firewalls(),
            ..FakeApi::default()
        };
        assert_eq!(find_firewall(&api, "web-backend").unwrap().id, "8b9d-cccc");
    }
}
