//! URI composition.
//!
//! Plain concatenation: nothing is encoded and duplicate separators are kept
//! as written. Callers pass `base_path` with its trailing `/`.

/// `{protocol}://{host}:{port}{base_path}{resource}/`
pub fn target_uri(protocol: &str, host: &str, port: &str, base_path: &str, resource: &str) -> String {
    format!("{protocol}://{host}:{port}{base_path}{resource}/")
}

/// Address of a single resource under `target`.
pub fn resource_uri(target: &str, id: &str) -> String {
    format!("{target}{id}")
}

/// Address of a single resource pinned to `version`, as used by delete.
pub fn versioned_uri(target: &str, id: &str, version: i64) -> String {
    format!("{target}{id}?version={version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_uri_is_plain_concatenation() {
        assert_eq!(
            target_uri("http", "h", "8080", "/v1/organisation/", "accounts"),
            "http://h:8080/v1/organisation/accounts/"
        );
    }

    #[test]
    fn separators_are_not_normalized() {
        assert_eq!(
            target_uri("https", "api.local", "443", "/v1//organisation/", "/accounts"),
            "https://api.local:443/v1//organisation//accounts/"
        );
    }

    #[test]
    fn resource_and_versioned_uris_append_to_target() {
        let target = "http://h:8080/v1/organisation/accounts/";
        assert_eq!(
            resource_uri(target, "abc-123"),
            "http://h:8080/v1/organisation/accounts/abc-123"
        );
        assert_eq!(
            versioned_uri(target, "abc-123", 2),
            "http://h:8080/v1/organisation/accounts/abc-123?version=2"
        );
    }
}
