use super::*;
use std::fs;
use tempfile::tempdir;

fn paths(uploads: &[PendingUpload]) -> Vec<&str> {
    let mut paths: Vec<&str> = uploads.iter().map(|u| u.path.as_str()).collect();
    paths.sort_unstable();
    paths
}

#[test]
fn junk_names_are_skipped() {
    assert!(should_skip(".DS_Store"));
    assert!(should_skip("node_modules"));
    assert!(!should_skip("index.html"));
    assert!(!should_skip(".keep"));
}

#[tokio::test]
async fn collects_files_under_folder_name() {
    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    fs::create_dir_all(site.join("css")).unwrap();
    fs::create_dir_all(site.join("node_modules").join("dep")).unwrap();
    fs::write(site.join("index.html"), "<p></p>").unwrap();
    fs::write(site.join("css").join("main.css"), "p {}").unwrap();
    fs::write(site.join(".DS_Store"), "").unwrap();
    fs::write(site.join("node_modules").join("dep").join("x.js"), "").unwrap();

    let uploads = collect_folder_uploads(&site).unwrap();
    assert_eq!(paths(&uploads), vec!["site/css/main.css", "site/index.html"]);

    for upload in uploads {
        let content = upload.read.await.unwrap();
        match upload.path.as_str() {
            "site/index.html" => assert_eq!(content, "<p></p>"),
            _ => assert_eq!(content, "p {}"),
        }
    }
}

#[tokio::test]
async fn invalid_utf8_surfaces_as_read_error() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("bin");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("blob.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let mut uploads = collect_folder_uploads(&dir).unwrap();
    let upload = uploads.pop().unwrap();
    assert_eq!(upload.path, "bin/blob.txt");
    assert!(upload.read.await.is_err());
}

#[test]
fn file_path_is_not_a_folder() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("a.txt");
    fs::write(&file, "").unwrap();

    let err = collect_folder_uploads(&file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn virtual_paths_use_forward_slashes() {
    let relative = Path::new("a").join("b").join("c.js");
    assert_eq!(to_virtual_path("site", &relative), "site/a/b/c.js");
}
