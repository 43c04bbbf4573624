//! Property-based tests for path mapping and extension naming.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::path::{Path, PathBuf};

    use crate::extension::folder_name;
    use crate::path::{clean, expand, guest_join, is_within, relative_to};
    use proptest::prelude::*;

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z0-9_-]{1,8}", 0..5)
    }

    // ============================================================================
    // folder_name property tests
    // ============================================================================

    proptest! {
        /// Property: from version 3 folder names never contain hyphens
        #[test]
        fn folder_name_has_no_hyphens_from_v3(source in ".*", version in 3u32..10) {
            prop_assert!(!folder_name(&source, version).contains('-'));
        }

        /// Property: before version 3 hyphens are preserved
        #[test]
        fn folder_name_keeps_hyphens_before_v3(name in "[a-z]{1,5}-[a-z]{1,5}", version in 0u32..3) {
            let source = format!("https://github.com/acct/{}.git", name);
            prop_assert_eq!(folder_name(&source, version), name);
        }

        /// Property: folder names are lowercase
        #[test]
        fn folder_name_is_lowercase(source in "[A-Za-z/_.-]*", version in 0u32..5) {
            let name = folder_name(&source, version);
            prop_assert_eq!(name.to_lowercase(), name);
        }

        /// Property: folder names never contain a path separator
        #[test]
        fn folder_name_is_a_single_segment(source in ".*", version in 0u32..5) {
            prop_assert!(!folder_name(&source, version).contains('/'));
        }

        /// Property: folder_name is deterministic
        #[test]
        fn folder_name_is_deterministic(source in ".*", version in 0u32..5) {
            prop_assert_eq!(folder_name(&source, version), folder_name(&source, version));
        }
    }

    // ============================================================================
    // path mapping property tests
    // ============================================================================

    proptest! {
        /// Property: a path built under base is within base and relativises
        /// back to the segments it was built from
        #[test]
        fn relative_to_inverts_join(parts in segments()) {
            let base = PathBuf::from("/proj");
            let path = parts.iter().fold(base.clone(), |acc, part| acc.join(part));

            prop_assert!(is_within(&path, &base));
            prop_assert_eq!(relative_to(&path, &base), Some(parts.join("/")));
        }

        /// Property: guest paths never end in a separator and never double it
        #[test]
        fn guest_join_is_well_formed(parts in segments()) {
            let mapped = guest_join("/vagrant", &parts.join("/"));
            prop_assert!(mapped.starts_with("/vagrant"));
            prop_assert!(!mapped.ends_with('/'));
            prop_assert!(!mapped.contains("//"));
        }

        /// Property: a sibling sharing a string prefix is never inside base
        #[test]
        fn sibling_with_shared_prefix_is_outside(suffix in "[a-z0-9]{1,6}") {
            let base = Path::new("/proj");
            let sibling = PathBuf::from(format!("/proj{}", suffix));
            prop_assert!(!is_within(&sibling, base));
            prop_assert_eq!(relative_to(&sibling, base), None);
        }

        /// Property: clean is idempotent
        #[test]
        fn clean_is_idempotent(parts in prop::collection::vec("[a-z]{1,4}|\\.|\\.\\.", 0..8)) {
            let path = PathBuf::from(format!("/{}", parts.join("/")));
            let once = clean(&path);
            prop_assert_eq!(clean(&once), once.clone());
            prop_assert!(once.is_absolute());
        }

        /// Property: expanding an absolute path ignores the base
        #[test]
        fn expand_absolute_ignores_base(parts in segments()) {
            let absolute = format!("/srv/{}", parts.join("/"));
            prop_assert_eq!(
                expand(&absolute, Path::new("/proj")),
                expand(&absolute, Path::new("/elsewhere"))
            );
        }
    }
}
