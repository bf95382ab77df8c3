use super::*;
use crate::models::FileId;

fn records(names: &[&str]) -> Vec<FileRecord> {
    names
        .iter()
        .enumerate()
        .map(|(seq, name)| FileRecord::new(FileId::new(1, seq as u32), *name, ""))
        .collect()
}

fn root_names<'a>(view: &FolderView<'a>) -> Vec<&'a str> {
    view.root_files.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn groups_one_level_by_first_segment() {
    let files = records(&[
        "index.html",
        "src/app.js",
        "src/lib/util.js",
        "css/site.css",
        "README.md",
    ]);
    let view = group_by_folder(&files);

    assert_eq!(root_names(&view), ["index.html", "README.md"]);
    assert_eq!(view.folder_names().collect::<Vec<_>>(), ["src", "css"]);

    let src = view.folder("src").unwrap();
    let rel: Vec<&str> = src.entries.iter().map(|e| e.relative_path).collect();
    assert_eq!(rel, ["app.js", "lib/util.js"]);
    assert_eq!(src.entries[1].record.name, "src/lib/util.js");
    assert_eq!(view.file_count(), 5);
}

#[test]
fn placeholder_makes_folder_visible_without_an_entry() {
    let files = records(&["a.txt", "empty/.keep", "docs/.keep", "docs/guide.md"]);
    let view = group_by_folder(&files);

    let empty = view.folder("empty").unwrap();
    assert!(empty.is_empty());
    let docs = view.folder("docs").unwrap();
    assert_eq!(docs.entries.len(), 1);
    assert_eq!(docs.entries[0].relative_path, "guide.md");
}

#[test]
fn does_not_mutate_and_is_deterministic() {
    let files = records(&["b/x.js", "a/y.js", "b/z.js"]);
    let before = files.clone();
    let first = group_by_folder(&files);
    let second = group_by_folder(&files);
    assert_eq!(first, second);
    assert_eq!(files, before);
    assert_eq!(first.folder_names().collect::<Vec<_>>(), ["b", "a"]);
}

#[test]
fn empty_input_gives_empty_view() {
    let view = group_by_folder(&[]);
    assert!(view.root_files.is_empty());
    assert!(view.folders.is_empty());
}

#[test]
fn folder_paths_lists_every_nested_prefix() {
    let files = records(&["index.html", "src/lib/util.js", "src/app.js", "assets/.keep"]);
    assert_eq!(folder_paths(&files), ["assets", "src", "src/lib"]);
}
