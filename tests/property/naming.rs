//! Property-based tests for name and path resolution

use intake::naming::resolve_name;
use intake::tree::path::resolve_relative_path;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["photo", "notes", "a b", "x+y"]),
        prop::option::of(0u32..5),
        prop::option::of(prop::sample::select(vec![".jpg", ".txt", ".tar.gz"])),
    )
        .prop_map(|(slug, suffix, ext)| {
            let mut name = slug.to_string();
            if let Some(n) = suffix {
                name.push_str(&format!("-{}", n));
            }
            if let Some(ext) = ext {
                name.push_str(ext);
            }
            name
        })
}

proptest! {
    /// A name already present always comes back changed
    #[test]
    fn prop_present_name_is_renamed(
        name in name_strategy(),
        mut others in prop::collection::vec(name_strategy(), 0..8),
    ) {
        others.push(name.clone());
        prop_assert_ne!(resolve_name(&name, &others), name);
    }

    /// Resolution only ever depends on the set of existing names, not their order
    #[test]
    fn prop_existing_order_irrelevant(
        name in name_strategy(),
        existing in prop::collection::vec(name_strategy(), 0..8),
    ) {
        let mut reversed = existing.clone();
        reversed.reverse();
        let mut sorted = existing.clone();
        sorted.sort();
        sorted.dedup();
        let a = resolve_name(&name, &existing);
        prop_assert_eq!(&a, &resolve_name(&name, &reversed));
        prop_assert_eq!(&a, &resolve_name(&name, &sorted));
    }

    /// Resolving a resolved path changes nothing
    #[test]
    fn prop_path_resolution_idempotent(
        segments in prop::collection::vec(
            prop::sample::select(vec!["a", "b", "img", ".", "..", ""]),
            0..10,
        ),
    ) {
        let path = segments.join("/");
        let once = resolve_relative_path(&path);
        prop_assert_eq!(resolve_relative_path(&once), once.clone());

        // No dot segment survives once a real name has appeared.
        let parts: Vec<&str> = once.split('/').collect();
        if let Some(first_real) = parts.iter().position(|p| *p != "." && *p != "..") {
            prop_assert!(parts[first_real..].iter().all(|p| *p != "." && *p != ".."));
        }
    }
}
