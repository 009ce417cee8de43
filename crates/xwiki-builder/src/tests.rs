use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

use ecow::EcoString;

use super::*;

const INDEX: &str = r#"{"tag": "document", "children": [
    {"tag": "section", "attributes": {"ids": ["welcome"]}, "children": [
        {"tag": "title", "children": ["Welcome"]},
        {"tag": "meta", "attributes": {"name": "keywords", "content": "intro, start"}},
        {"tag": "paragraph", "children": [
            "Read the ",
            {"tag": "reference", "attributes": {"refuri": "getting_started#install", "internal": true},
             "children": ["install guide"]},
            "."
        ]}
    ]}
]}"#;

const GUIDE: &str = r#"{"tag": "document", "children": [
    {"tag": "bullet_list", "children": [
        {"tag": "list_item", "children": [{"tag": "paragraph", "children": ["Download"]}]},
        {"tag": "list_item", "children": [{"tag": "paragraph", "children": ["Unpack"]}]}
    ]},
    {"tag": "sidebar", "children": [{"tag": "paragraph", "children": ["Unknown construct"]}]}
]}"#;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn project() -> (tempfile::TempDir, BuildConfig) {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("trees/index.json"), INDEX);
    write(&dir.path().join("trees/getting_started.json"), GUIDE);

    let config = BuildConfig {
        root_page: "Docs".into(),
        source_dir: dir.path().join("trees"),
        out_dir: dir.path().join("out"),
        ..BuildConfig::default()
    };
    (dir, config)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn builds_one_page_per_document() {
    let (dir, config) = project();
    let summary = Builder::new(config).unwrap().build().unwrap();

    assert_eq!(summary.found, 2);
    assert_eq!(summary.skipped(), 0);
    let names: Vec<_> = summary.pages.iter().map(|page| page.docname.as_str()).collect();
    assert_eq!(names, ["getting_started", "index"]);
    // The unknown construct warns on entry and exit.
    assert_eq!(summary.warnings(), 2);

    insta::assert_snapshot!(read(&dir.path().join("out/Index.xwiki")).trim(), @r#"
    (% id="welcome" %)
    = Welcome =

    Read the [[install guide>>Docs.getting_started||anchor="install"]].
    "#);
    assert_eq!(
        read(&dir.path().join("out/GettingStarted.xwiki")),
        "* ((( Download )))\n* ((( Unpack )))\n\nUnknown construct\n\n"
    );
}

#[test]
fn up_to_date_pages_are_skipped() {
    let (dir, config) = project();
    let builder = Builder::new(config.clone()).unwrap();
    builder.build().unwrap();

    let later = SystemTime::now() + Duration::from_secs(60);
    for page in ["Index.xwiki", "GettingStarted.xwiki"] {
        let file = File::options().write(true).open(dir.path().join("out").join(page)).unwrap();
        file.set_modified(later).unwrap();
    }

    let summary = builder.build().unwrap();
    assert_eq!(summary.found, 2);
    assert!(summary.pages.is_empty());

    let forced = Builder::new(BuildConfig { force: true, ..config }).unwrap();
    assert_eq!(forced.build().unwrap().pages.len(), 2);
}

#[test]
fn overrides_and_templates_shape_the_output() {
    let (dir, mut config) = project();
    let template = dir.path().join("page.tmpl");
    write(
        &template,
        "{{box title=\"<<docname>>\"}}\n<<page_contents>>{{/box}}\n\
         <% if keywords %>keywords: << keywords|join(\", \") >><% endif %>\n",
    );
    config.page_template = Some(template);
    config
        .page_name_overrides
        .insert(EcoString::from("index"), EcoString::from("WebHome.xwiki"));

    let builder = Builder::new(config).unwrap();
    builder.build().unwrap();

    assert!(!dir.path().join("out/Index.xwiki").exists());
    let page = read(&dir.path().join("out/WebHome.xwiki"));
    assert!(page.starts_with("{{box title=\"index\"}}\n\n(% id=\"welcome\" %)\n= Welcome =\n\n"));
    assert!(page.ends_with("{{/box}}\nkeywords: intro, start"));

    let guide = read(&dir.path().join("out/GettingStarted.xwiki"));
    assert!(guide.ends_with("Unknown construct\n\n{{/box}}\n"));
}

#[test]
fn missing_template_fails_before_building() {
    let (dir, mut config) = project();
    config.page_template = Some(dir.path().join("missing.tmpl"));

    let err = Builder::new(config).unwrap_err();
    assert!(err.to_string().contains("missing.tmpl"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn malformed_trees_name_their_file() {
    let (dir, config) = project();
    write(&dir.path().join("trees/broken.json"), "{\"tag\": ");

    let err = Builder::new(config).unwrap().build().unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}
