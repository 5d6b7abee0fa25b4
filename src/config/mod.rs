pub mod cache;
pub mod cli;

use cache::DefaultsCache;

/// Resolves a defaultable option: explicit flag wins, then the sticky cache,
/// then the built-in fallback. Environment variables are handled by clap.
pub fn resolve(
    flag: Option<&str>,
    cache: &DefaultsCache,
    cache_key: &str,
    fallback: &str,
) -> String {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return value.to_string();
    }
    cache
        .get(cache_key)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_cache_beats_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DefaultsCache::open(dir.path().join("defaults.json"));

        assert_eq!(resolve(None, &cache, "region", "us-east-1"), "us-east-1");

        cache.add("region", "eu-west-1");
        assert_eq!(resolve(None, &cache, "region", "us-east-1"), "eu-west-1");

        assert_eq!(
            resolve(Some("ap-southeast-2"), &cache, "region", "us-east-1"),
            "ap-southeast-2"
        );
    }

    #[test]
    fn empty_flag_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DefaultsCache::open(dir.path().join("defaults.json"));
        assert_eq!(resolve(Some(""), &cache, "bucket_path", "cftcli"), "cftcli");
    }
}
