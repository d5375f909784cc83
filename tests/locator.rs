mod helper;

use std::path::PathBuf;

use helper::{Fixture, PROGRAM};

#[test]
fn directories_for_project_follow_precedence() {
    let fixture = Fixture::new();

    let dirs = fixture.locator().directories_for(Some("blaa"));

    assert_eq!(
        dirs,
        vec![
            fixture.home().join(".blaa"),
            fixture.home(),
            fixture.etc().join("blaa"),
            fixture.etc(),
        ]
    );
}

#[test]
fn find_config_files_returns_project_and_program_files() {
    let fixture = Fixture::new();
    let project_file = fixture.write(&fixture.home(), ".blaa/blaa.conf", "");
    let program_file = fixture.write(&fixture.etc(), &format!("{PROGRAM}.conf"), "");

    let found = fixture
        .locator()
        .find_config_files(Some("blaa"), None, ".conf");

    assert_eq!(found, vec![project_file, program_file]);
}

#[test]
fn find_config_files_requires_matching_extension() {
    let fixture = Fixture::new();
    let json_file = fixture.write(&fixture.etc(), &format!("{PROGRAM}.json"), "{}");
    let locator = fixture.locator();

    assert_eq!(
        locator.find_config_files(Some("blaa"), None, ".conf"),
        Vec::<PathBuf>::new()
    );
    assert_eq!(
        locator.find_config_files(Some("blaa"), None, ".json"),
        vec![json_file]
    );
}

#[test]
fn find_config_files_prefers_home_over_etc() {
    let fixture = Fixture::new();
    let home_file = fixture.write(&fixture.home(), "blaa.conf", "");
    fixture.write(&fixture.etc(), "blaa/blaa.conf", "");
    fixture.write(&fixture.etc(), "blaa.conf", "");

    let found = fixture
        .locator()
        .find_config_files(Some("blaa"), Some("unused"), ".conf");

    assert_eq!(found, vec![home_file]);
}

#[test]
fn find_config_files_only_tests_existence() {
    let fixture = Fixture::new();
    std::fs::create_dir_all(fixture.etc().join("blaa")).unwrap();

    // A directory named like the file counts as a hit
    let found = fixture
        .locator()
        .find_config_files(Some("blaa"), Some("missing"), "");

    assert_eq!(found, vec![fixture.etc().join("blaa")]);
}
