use attachprune::classify::{compute_unused_and_relocations, ClassifyOptions, SweepPlan};
use attachprune::vault::{FileLister, MemoryVault};
use proptest::prelude::*;

fn vault_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    let dir = prop::sample::select(vec!["", "a", "a/b", "c"]);
    let name = prop::sample::select(vec!["x", "y", "banner-z", "Banner-Image-w"]);
    let ext = prop::sample::select(vec!["md", "png", "pdf", "txt"]);
    let in_attachments = any::<bool>();
    let content = prop::sample::select(vec!["", "x.png", "Y.PDF and banner-z.png", "z"]);
    prop::collection::vec((dir, in_attachments, name, ext, content), 0..24).prop_map(|entries| {
        let mut seen = std::collections::HashSet::new();
        entries
            .into_iter()
            .filter_map(|(dir, in_attachments, name, ext, content)| {
                let mut path = String::new();
                if !dir.is_empty() {
                    path.push_str(dir);
                    path.push('/');
                }
                if in_attachments && ext != "md" {
                    path.push_str("attachments/");
                }
                path.push_str(&format!("{}.{}", name, ext));
                seen.insert(path.clone())
                    .then(|| (path, content.to_string()))
            })
            .collect()
    })
}

fn summary(plan: &SweepPlan) -> (Vec<String>, Vec<String>, Vec<String>) {
    let paths = |results: &[attachprune::ClassificationResult]| {
        results.iter().map(|r| r.file.path.clone()).collect::<Vec<_>>()
    };
    (paths(&plan.relocate), paths(&plan.unused), paths(&plan.used))
}

proptest! {
    #[test]
    fn repeated_classification_is_identical(files in vault_strategy(), relocate in any::<bool>()) {
        let vault = files
            .iter()
            .fold(MemoryVault::new(), |v, (path, content)| v.with_file(path, content));
        let options = ClassifyOptions {
            relocate_banners_to_root: relocate,
            ..ClassifyOptions::default()
        };
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let listing = vault.list_files().unwrap();

        let first = runtime.block_on(compute_unused_and_relocations(&listing, &vault, &options));
        let second = runtime.block_on(compute_unused_and_relocations(&listing, &vault, &options));
        prop_assert_eq!(summary(&first), summary(&second));
        prop_assert_eq!(first.attachment_count(), second.attachment_count());

        let mut reversed = listing.clone();
        reversed.reverse();
        let third = runtime.block_on(compute_unused_and_relocations(&reversed, &vault, &options));
        let mut a = summary(&first);
        let mut b = summary(&third);
        for list in [&mut a.0, &mut a.1, &mut a.2, &mut b.0, &mut b.1, &mut b.2] {
            list.sort();
        }
        prop_assert_eq!(a, b);
    }

    #[test]
    fn concurrency_does_not_change_partition(files in vault_strategy()) {
        let vault = files
            .iter()
            .fold(MemoryVault::new(), |v, (path, content)| v.with_file(path, content));
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let listing = vault.list_files().unwrap();

        let sequential = runtime.block_on(compute_unused_and_relocations(
            &listing,
            &vault,
            &ClassifyOptions::default(),
        ));
        let parallel = runtime.block_on(compute_unused_and_relocations(
            &listing,
            &vault,
            &ClassifyOptions { read_concurrency: 3, ..ClassifyOptions::default() },
        ));
        prop_assert_eq!(summary(&sequential), summary(&parallel));
    }
}
