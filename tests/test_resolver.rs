use catalog_enricher::resolver::resolve_source_repo;

#[test]
fn test_github_url_in_description() {
    let desc = "Fast dashboard. Source: https://github.com/foo/bar and docs too";
    assert_eq!(
        resolve_source_repo(Some(desc), "somebody/dashboard"),
        Some(("foo".to_string(), "bar".to_string()))
    );
}

#[test]
fn test_github_url_strips_dot_git() {
    let desc = "clone from https://github.com/foo/bar.git";
    assert_eq!(
        resolve_source_repo(Some(desc), "somebody/dashboard"),
        Some(("foo".to_string(), "bar".to_string()))
    );
}

#[test]
fn test_github_url_without_scheme() {
    let desc = "See github.com/foo/bar for details";
    assert_eq!(
        resolve_source_repo(Some(desc), "somebody/dashboard"),
        Some(("foo".to_string(), "bar".to_string()))
    );
}

#[test]
fn test_github_pages_url() {
    let desc = "Docs at https://foo.github.io/bar/";
    assert_eq!(
        resolve_source_repo(Some(desc), "somebody/dashboard"),
        Some(("foo".to_string(), "bar".to_string()))
    );
}

#[test]
fn test_description_match_wins_over_convention() {
    let desc = "Maintained at https://github.com/upstream/project";
    assert_eq!(
        resolve_source_repo(Some(desc), "linuxserver/heimdall"),
        Some(("upstream".to_string(), "project".to_string()))
    );
}

#[test]
fn test_linuxserver_convention_fallback() {
    assert_eq!(
        resolve_source_repo(Some("A dashboard for your server"), "linuxserver/heimdall"),
        Some(("linuxserver".to_string(), "docker-heimdall".to_string()))
    );
    // Works with no description at all, e.g. when the hub lookup failed.
    assert_eq!(
        resolve_source_repo(None, "linuxserver/sonarr"),
        Some(("linuxserver".to_string(), "docker-sonarr".to_string()))
    );
}

#[test]
fn test_no_candidate() {
    assert_eq!(resolve_source_repo(Some("just some text"), "nginx"), None);
    assert_eq!(resolve_source_repo(None, "somebody/dashboard"), None);
}

#[test]
fn test_unparseable_image_yields_none_without_description_match() {
    assert_eq!(resolve_source_repo(None, "ghcr.io/org/image:v1"), None);
}
