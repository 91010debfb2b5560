use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tower_lsp::lsp_types::Url;

use super::*;
use crate::{
    definition::Identifier,
    ide::navigation::IdePosition,
    vfs::{OsVfs, VfsEntry},
};

/// Real filesystem that records reads and can refuse selected files.
#[derive(Default)]
struct RecordingVfs {
    reads: Mutex<Vec<PathBuf>>,
    unreadable: HashSet<PathBuf>,
}

impl RecordingVfs {
    fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl Vfs for RecordingVfs {
    fn read_dir(
        &self,
        dir: &Path,
    ) -> io::Result<Vec<VfsEntry>> {
        OsVfs.read_dir(dir)
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> io::Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.unreadable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        OsVfs.read_to_string(path)
    }

    fn is_file(
        &self,
        path: &Path,
    ) -> bool {
        OsVfs.is_file(path)
    }
}

struct Project {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl Project {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        for (relative, content) in files {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        Self {
            _dir: dir,
            root,
        }
    }

    fn path(
        &self,
        relative: &str,
    ) -> PathBuf {
        self.root.join(relative)
    }

    fn uri(
        &self,
        relative: &str,
    ) -> Url {
        Url::from_file_path(self.path(relative)).unwrap()
    }
}

fn pattern(word: &str) -> SearchPattern {
    SearchPattern::build(&Identifier::classify(word).unwrap()).unwrap()
}

#[test]
fn included_scripts_come_from_src_and_lib() {
    let project = Project::new(&[
        ("src/main.au3", ""),
        ("src/forms/ui.au3", ""),
        ("lib/strings.au3", ""),
        ("lib/unused.au3", ""),
    ]);
    let uri = project.uri("src/main.au3");
    let text = "#include <strings.au3>\n#include \"forms\\ui.au3\"\n";
    let document = DocumentView::new(&uri, text);

    let mut stats = ScanStats::default();
    let scripts = included_scripts(&OsVfs, &document, &ProjectLayout::default(), &mut stats);

    assert_eq!(
        scripts,
        vec![ScriptCandidate::new(project.path("lib/strings.au3")), ScriptCandidate::new(project.path("src/forms/ui.au3"))]
    );
    assert_eq!(stats.candidates, 4);
    assert_eq!(stats.included, 2);
}

#[test]
fn missing_lib_directory_does_not_block_src() {
    let project = Project::new(&[("src/main.au3", ""), ("src/utils.au3", "Func Helper()\nEndFunc\n")]);
    let uri = project.uri("src/main.au3");
    let text = "#include \"utils.au3\"\nHelper()\n";
    let document = DocumentView::new(&uri, text);

    let result = resolve_across_files(&OsVfs, &document, &pattern("Helper"), &ProjectLayout::default());
    let location = result.location.expect("resolved through src");
    assert_eq!(location.uri, project.uri("src/utils.au3"));
    assert_eq!(location.range.start, IdePosition::new(0, 5));
}

#[test]
fn document_outside_src_searches_nothing() {
    let project = Project::new(&[("scripts/main.au3", ""), ("scripts/utils.au3", "Func Helper()\nEndFunc\n")]);
    let uri = project.uri("scripts/main.au3");
    let text = "#include \"utils.au3\"\nHelper()\n";
    let document = DocumentView::new(&uri, text);

    let vfs = RecordingVfs::default();
    let result = resolve_across_files(&vfs, &document, &pattern("Helper"), &ProjectLayout::default());
    assert!(result.location.is_none());
    assert_eq!(result.stats, ScanStats::default());
    assert!(vfs.reads().is_empty());
}

#[test]
fn first_included_script_in_include_order_wins() {
    let project = Project::new(&[
        ("src/main.au3", ""),
        ("src/a.au3", "Func Helper()\nEndFunc\n"),
        ("lib/b.au3", "; shared\nFunc Helper()\nEndFunc\n"),
    ]);
    let uri = project.uri("src/main.au3");
    let text = "#include <b.au3>\n#include \"a.au3\"\n";
    let document = DocumentView::new(&uri, text);

    let vfs = RecordingVfs::default();
    let result = resolve_across_files(&vfs, &document, &pattern("Helper"), &ProjectLayout::default());
    let location = result.location.expect("resolved");
    assert_eq!(location.uri, project.uri("lib/b.au3"));
    assert_eq!(location.range.start, IdePosition::new(1, 5));
    assert_eq!(vfs.reads(), vec![project.path("lib/b.au3")]);
    assert_eq!(result.stats.scripts_read, 1);
}

#[test]
fn each_script_is_read_at_most_once() {
    let project = Project::new(&[
        ("src/main.au3", ""),
        ("src/a.au3", "Func Other()\nEndFunc\n"),
        ("src/b.au3", "Func Another()\nEndFunc\n"),
        ("src/c.au3", "Global $g_hWnd = 0\n"),
    ]);
    let uri = project.uri("src/main.au3");
    let text = "#include \"a.au3\"\n#include \"b.au3\"\n#include \"a.au3\"\n#include \"c.au3\"\n";
    let document = DocumentView::new(&uri, text);

    let vfs = RecordingVfs::default();
    let result = resolve_across_files(&vfs, &document, &pattern("$g_hWnd"), &ProjectLayout::default());
    let location = result.location.expect("resolved in c.au3");
    assert_eq!(location.uri, project.uri("src/c.au3"));
    assert_eq!(location.range.start, IdePosition::new(0, 7));
    assert_eq!(location.range.end, IdePosition::new(0, 14));

    let reads = vfs.reads();
    let unique: HashSet<_> = reads.iter().collect();
    assert_eq!(reads.len(), unique.len(), "duplicate reads: {reads:?}");
    assert_eq!(reads.len(), 3);
}

#[test]
fn unreadable_script_is_skipped() {
    let project = Project::new(&[
        ("src/main.au3", ""),
        ("src/locked.au3", "Func Helper()\nEndFunc\n"),
        ("src/open.au3", "\n\nFunc Helper()\nEndFunc\n"),
    ]);
    let uri = project.uri("src/main.au3");
    let text = "#include \"locked.au3\"\n#include \"open.au3\"\n";
    let document = DocumentView::new(&uri, text);

    let vfs = RecordingVfs {
        unreadable: HashSet::from([project.path("src/locked.au3")]),
        ..RecordingVfs::default()
    };
    let result = resolve_across_files(&vfs, &document, &pattern("Helper"), &ProjectLayout::default());
    let location = result.location.expect("resolved in the readable script");
    assert_eq!(location.uri, project.uri("src/open.au3"));
    assert_eq!(location.range.start, IdePosition::new(2, 5));
    assert_eq!(result.stats.scripts_read, 1);
}

#[test]
fn includes_of_included_scripts_are_not_followed() {
    let project = Project::new(&[
        ("src/main.au3", ""),
        ("src/a.au3", "#include \"b.au3\"\n"),
        ("src/b.au3", "Func Deep()\nEndFunc\n"),
    ]);
    let uri = project.uri("src/main.au3");
    let text = "#include \"a.au3\"\nDeep()\n";
    let document = DocumentView::new(&uri, text);

    let result = resolve_across_files(&OsVfs, &document, &pattern("Deep"), &ProjectLayout::default());
    assert!(result.location.is_none());
    assert_eq!(result.stats.included, 1);
}

#[test]
fn materialize_projects_onto_the_winner_content() {
    let content = "; header\n; more\nFunc Helper()\nEndFunc\n".to_string();
    let found = pattern("Helper").find(&content).unwrap().unwrap();
    let script_match = ScriptMatch {
        script: ScriptCandidate::new("/p/lib/helpers.au3"),
        content,
        found,
    };

    let location = materialize(&script_match).expect("absolute path");
    assert_eq!(location.uri.path(), "/p/lib/helpers.au3");
    assert_eq!(location.range.start, IdePosition::new(2, 5));
    assert_eq!(location.range.end, IdePosition::new(2, 11));

    let relative = ScriptMatch {
        script: ScriptCandidate::new("lib/helpers.au3"),
        ..script_match
    };
    assert!(materialize(&relative).is_none());
}

#[test]
fn find_matching_script_returns_none_when_nothing_matches() {
    let project = Project::new(&[("src/a.au3", "Func Other()\nEndFunc\n")]);
    let mut stats = ScanStats::default();
    let scripts = vec![ScriptCandidate::new(project.path("src/a.au3"))];
    assert!(find_matching_script(&OsVfs, &scripts, &pattern("Helper"), &mut stats).is_none());
    assert_eq!(stats.scripts_read, 1);
}
