//! Property-based tests for clone cache addressing.
//!
//! These tests use proptest to generate random remotes and revisions and
//! verify that the cache layout invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::cache::{cache_key, CloneCache};
    use proptest::prelude::*;
    use std::path::Path;

    // ============================================================================
    // cache_key property tests
    // ============================================================================

    proptest! {
        /// Property: cache_key never produces path separators or colons
        #[test]
        fn cache_key_never_produces_separators(
            remote in ".*",
            revision in "[0-9a-f]{5,40}",
        ) {
            let key = cache_key(&remote, &revision);
            prop_assert!(!key.contains('/'), "key '{}' contains '/'", key);
            prop_assert!(!key.contains(':'), "key '{}' contains ':'", key);
        }

        /// Property: cache_key is deterministic (same input = same output)
        #[test]
        fn cache_key_is_deterministic(
            remote in ".*",
            revision in "[0-9a-f]{5,40}",
        ) {
            prop_assert_eq!(cache_key(&remote, &revision), cache_key(&remote, &revision));
        }

        /// Property: the revision is always the key's suffix
        #[test]
        fn cache_key_ends_with_revision(
            remote in ".*",
            revision in "[0-9a-f]{5,40}",
        ) {
            let key = cache_key(&remote, &revision);
            let suffix = format!("-{}", revision);
            prop_assert!(key.ends_with(&suffix));
        }

        /// Property: one remote at two revisions never shares a directory
        #[test]
        fn cache_key_distinct_revisions_are_distinct(
            remote in ".*",
            first in "[0-9a-f]{5,40}",
            second in "[0-9a-f]{5,40}",
        ) {
            prop_assume!(first != second);
            prop_assert_ne!(cache_key(&remote, &first), cache_key(&remote, &second));
        }

        /// Property: remotes that differ outside '/', ':' and '-' never collide
        #[test]
        fn cache_key_distinct_remotes_are_distinct(
            first in "[a-zA-Z0-9.@_]{1,30}",
            second in "[a-zA-Z0-9.@_]{1,30}",
            revision in "[0-9a-f]{5,40}",
        ) {
            prop_assume!(first != second);
            prop_assert_ne!(cache_key(&first, &revision), cache_key(&second, &revision));
        }

        /// Property: clone_dir is always a direct child of the cache root
        #[test]
        fn clone_dir_is_direct_child_of_root(
            remote in "[a-zA-Z0-9.@_/:-]{1,60}",
            revision in "[0-9a-f]{5,40}",
        ) {
            let cache = CloneCache::new("/cache");
            let dir = cache.clone_dir(&remote, &revision);
            prop_assert_eq!(dir.parent(), Some(Path::new("/cache")));
        }
    }
}
