use std::fs;
use std::path::{Path, PathBuf};

use masthead_core::{manifest, FailurePolicy, SiteManifest};
use masthead_sync::{FileOutcome, HeaderSynchronizer, SyncOptions};
use tempfile::TempDir;

const TEMPLATE: &str = "<header class=\"site\">\n  <nav>NEW</nav>\n</header>";

fn write_site(root: &Path, pages: &[(&str, &str)]) {
    fs::write(root.join("header.html"), TEMPLATE).expect("write template");
    for (name, body) in pages {
        fs::write(root.join(name), body).expect("write page");
    }
}

fn sync_for(root: &Path, targets: &[&str]) -> HeaderSynchronizer {
    HeaderSynchronizer::new(
        root.join("header.html"),
        targets.iter().map(|t| root.join(t)),
    )
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).expect("read page")
}

#[test]
fn second_run_leaves_content_as_first_run_left_it() {
    let root = TempDir::new().expect("root");
    write_site(
        root.path(),
        &[
            ("a.html", "<body>\n<header id=\"x\">\nold\n</header>\n</body>\n"),
            ("b.html", "<p>no header</p>"),
        ],
    );
    let sync = sync_for(root.path(), &["a.html", "b.html"]);

    sync.run(SyncOptions::default()).expect("first run");
    let first = (read(root.path(), "a.html"), read(root.path(), "b.html"));
    sync.run(SyncOptions::default()).expect("second run");
    let second = (read(root.path(), "a.html"), read(root.path(), "b.html"));

    assert_eq!(first, second);
}

#[test]
fn page_result_does_not_depend_on_other_targets() {
    let page = "<html><header>old</header><main>A</main></html>";

    let alone = TempDir::new().expect("alone");
    write_site(alone.path(), &[("a.html", page)]);
    sync_for(alone.path(), &["a.html"])
        .run(SyncOptions::default())
        .expect("run alone");

    let crowded = TempDir::new().expect("crowded");
    write_site(
        crowded.path(),
        &[
            ("a.html", page),
            ("b.html", "<header>b</header><header>b2</header>"),
        ],
    );
    sync_for(crowded.path(), &["b.html", "missing.html", "a.html"])
        .run(SyncOptions::default())
        .expect("run crowded");

    assert_eq!(read(alone.path(), "a.html"), read(crowded.path(), "a.html"));
}

#[test]
fn header_region_replaced_byte_for_byte_and_surroundings_kept() {
    let root = TempDir::new().expect("root");
    let before = "<!doctype html>\r\n<html>\n  <header class=\"old\" data-x='1'>\n    <a href=\"/\">Home</a>\n  </header>\n  <main>\tBody</main>\n</html>\n";
    write_site(root.path(), &[("about.html", before)]);

    sync_for(root.path(), &["about.html"])
        .run(SyncOptions::default())
        .expect("run");

    let expected = format!(
        "<!doctype html>\r\n<html>\n  {TEMPLATE}\n  <main>\tBody</main>\n</html>\n"
    );
    assert_eq!(read(root.path(), "about.html"), expected);
}

#[test]
fn missing_target_stays_missing_and_is_reported_skipped() {
    let root = TempDir::new().expect("root");
    write_site(root.path(), &[]);

    let report = sync_for(root.path(), &["contact.html"])
        .run(SyncOptions::default())
        .expect("run");

    assert!(!root.path().join("contact.html").exists());
    assert_eq!(
        report.outcomes,
        vec![FileOutcome::Skipped {
            path: root.path().join("contact.html")
        }]
    );
}

#[test]
fn page_without_header_is_rewritten_identically() {
    let root = TempDir::new().expect("root");
    let body = "<html>\n<body>no header at all</body>\n</html>\n";
    write_site(root.path(), &[("plain.html", body)]);

    let report = sync_for(root.path(), &["plain.html"])
        .run(SyncOptions::default())
        .expect("run");

    assert_eq!(read(root.path(), "plain.html"), body);
    assert_eq!(
        report.outcomes,
        vec![FileOutcome::Updated {
            path: root.path().join("plain.html"),
            header_replaced: false,
        }]
    );
}

#[test]
fn only_first_of_two_header_regions_is_replaced() {
    let root = TempDir::new().expect("root");
    write_site(
        root.path(),
        &[(
            "two.html",
            "<header>first</header>\n<article><header>second</header></article>",
        )],
    );

    sync_for(root.path(), &["two.html"])
        .run(SyncOptions::default())
        .expect("run");

    assert_eq!(
        read(root.path(), "two.html"),
        format!("{TEMPLATE}\n<article><header>second</header></article>")
    );
}

#[test]
fn about_updated_contact_skipped() {
    let root = TempDir::new().expect("root");
    fs::write(
        root.path().join("header.html"),
        r#"<header class="site"><nav>NEW</nav></header>"#,
    )
    .unwrap();
    fs::write(
        root.path().join("about.html"),
        r#"<html><header id="old"><nav>OLD</nav></header><body>X</body></html>"#,
    )
    .unwrap();

    let report = sync_for(root.path(), &["about.html", "contact.html"])
        .run(SyncOptions::default())
        .expect("run");

    assert_eq!(
        read(root.path(), "about.html"),
        r#"<html><header class="site"><nav>NEW</nav></header><body>X</body></html>"#
    );
    assert!(!root.path().join("contact.html").exists());
    assert_eq!((report.updated(), report.skipped()), (1, 1));
}

#[test]
fn manifest_driven_run_uses_site_root() {
    let root = TempDir::new().expect("root");
    fs::create_dir_all(root.path().join("partials")).unwrap();
    fs::write(root.path().join("partials/header.html"), TEMPLATE).unwrap();
    fs::write(root.path().join("news.html"), "<header>old</header>").unwrap();

    let site = SiteManifest {
        template: PathBuf::from("partials/header.html"),
        targets: vec![PathBuf::from("news.html"), PathBuf::from("privacy.html")],
        on_error: FailurePolicy::KeepGoing,
    };
    manifest::save_at(root.path(), &site).expect("save manifest");

    let loaded = manifest::load_or_default_at(root.path()).expect("load manifest");
    let report = HeaderSynchronizer::from_manifest(&loaded, root.path())
        .run(SyncOptions {
            dry_run: false,
            policy: loaded.on_error,
        })
        .expect("run");

    assert_eq!(read(root.path(), "news.html"), TEMPLATE);
    assert_eq!((report.updated(), report.skipped(), report.failed()), (1, 1, 0));
}

#[test]
#[cfg(unix)]
fn symlinked_page_is_updated_through_the_link() {
    let root = TempDir::new().expect("root");
    write_site(root.path(), &[]);
    fs::create_dir_all(root.path().join("shared")).unwrap();
    fs::write(root.path().join("shared/about.html"), "<header>OLD</header>").unwrap();
    std::os::unix::fs::symlink(
        root.path().join("shared/about.html"),
        root.path().join("about.html"),
    )
    .unwrap();

    let report = sync_for(root.path(), &["about.html"])
        .run(SyncOptions::default())
        .expect("run");

    let link_meta = fs::symlink_metadata(root.path().join("about.html")).unwrap();
    assert!(link_meta.file_type().is_symlink(), "link must stay a symlink");
    assert_eq!(read(root.path(), "shared/about.html"), TEMPLATE);
    assert_eq!(
        report.outcomes,
        vec![FileOutcome::Updated {
            path: root.path().join("about.html"),
            header_replaced: true,
        }]
    );
    assert!(!root.path().join("shared/about.html.masthead.tmp").exists());
}
