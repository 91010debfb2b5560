use super::*;

#[test]
fn nearest_src_ancestor_is_found() {
    let file = Path::new("/work/app/src/forms/main.au3");
    assert_eq!(resolve_ancestor_dir(file, "src"), Some(PathBuf::from("/work/app/src")));
}

#[test]
fn innermost_matching_ancestor_wins() {
    let file = Path::new("/work/src/app/src/main.au3");
    assert_eq!(resolve_ancestor_dir(file, "src"), Some(PathBuf::from("/work/src/app/src")));
}

#[test]
fn file_name_never_counts_as_ancestor() {
    assert_eq!(resolve_ancestor_dir(Path::new("/work/app/src"), "src"), None);
    assert_eq!(resolve_ancestor_dir(Path::new("/work/app/main.au3"), "src"), None);
}

#[test]
fn ancestor_match_is_whole_component() {
    assert_eq!(resolve_ancestor_dir(Path::new("/work/mysrc/main.au3"), "src"), None);
    assert_eq!(resolve_ancestor_dir(Path::new("/work/src-old/main.au3"), "src"), None);
}

#[test]
fn sibling_root_replaces_last_component_only() {
    assert_eq!(sibling_root(Path::new("/work/src/app/src"), "lib"), PathBuf::from("/work/src/app/lib"));
    assert_eq!(sibling_root(Path::new("/p/src"), "lib"), PathBuf::from("/p/lib"));
}

#[test]
fn roots_for_uses_configured_names() {
    let layout = ProjectLayout {
        source_dir: "scripts".to_string(),
        library_dir: "vendor".to_string(),
        ..ProjectLayout::default()
    };
    let roots = layout.roots_for(Path::new("/p/scripts/ui/main.au3")).expect("roots");
    assert_eq!(
        roots,
        ProjectRoots {
            source: PathBuf::from("/p/scripts"),
            library: PathBuf::from("/p/vendor"),
        }
    );
    assert!(layout.roots_for(Path::new("/p/src/main.au3")).is_none());
}

#[test]
fn default_layout_matches_conventions() {
    let layout = ProjectLayout::default();
    assert_eq!(layout.source_dir, "src");
    assert_eq!(layout.library_dir, "lib");
    assert_eq!(layout.script_extension, "au3");
    assert!(layout.search_includes);
}
