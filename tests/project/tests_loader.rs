//! Directory loading into an AnalysisHost.

use std::fs;

use provtrace::ide::AnalysisHost;
use provtrace::project::{LoadError, collect_source_files, load_directory, load_file};
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, content: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_collects_only_source_files_sorted() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b/B.java", "class B {}");
    write(&dir, "a/A.java", "class A {}");
    write(&dir, "notes.txt", "not source");

    let files = collect_source_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a/A.java", "b/B.java"]);
}

#[test]
fn test_load_directory_resolves_across_files() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "repo/Repo.java",
        "class Repo {\n    int size() {\n        return 3;\n    }\n}\n",
    );
    write(
        &dir,
        "app/App.java",
        "class App {\n    void run(Repo repo) {\n        int n = repo.size();\n    }\n}\n",
    );

    let mut host = AnalysisHost::new();
    let loaded = load_directory(dir.path(), &mut host).unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(host.file_count(), 2);

    let analysis = host.analysis();
    assert_eq!(analysis.program().class_count(), 2);

    let app_path = dir.path().join("app/App.java");
    let file = analysis.file_id(&app_path.to_string_lossy()).unwrap();
    let text = analysis.file_text(file).unwrap();
    let offset = text.find("n =").unwrap() as u32;
    let result = analysis.trace_at(file, offset.into()).unwrap();
    assert!(
        result
            .nodes()
            .any(|(_, node)| node.label == "Method call: Repo.size()")
    );
}

#[test]
fn test_syntax_errors_do_not_block_loading() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Broken.java", "class Broken { int x = ; }");

    let mut host = AnalysisHost::new();
    assert_eq!(load_directory(dir.path(), &mut host).unwrap(), 1);
    assert_eq!(host.analysis().program().class_count(), 1);
}

#[test]
fn test_load_single_file_reports_errors() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Ok.java", "class Ok { int x = 1; }");
    write(&dir, "Bad.java", "class Bad { int x = ; }");

    let mut host = AnalysisHost::new();
    assert!(load_file(dir.path().join("Ok.java"), &mut host).unwrap().is_empty());
    assert!(!load_file(dir.path().join("Bad.java"), &mut host).unwrap().is_empty());
    assert_eq!(host.file_count(), 2);
}

#[test]
fn test_file_is_not_a_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir, "A.java", "class A {}");

    let mut host = AnalysisHost::new();
    let err = load_directory(dir.path().join("A.java"), &mut host).unwrap_err();
    assert!(matches!(err, LoadError::DirectoryNotFound(_)));
    assert!(err.to_string().starts_with("Directory not found: "));
}
