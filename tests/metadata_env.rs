mod helper;

use helper::Fixture;
use serial_test::serial;
use version_info::config::METADATA_PATH_ENV;
use version_info::metadata::SitePackagesIndex;

#[test]
#[serial]
fn site_packages_index_reads_roots_from_env() {
    let fixture = Fixture::new();
    let roots = std::env::join_paths([fixture.site(), fixture.project()]).unwrap();

    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::set_var(METADATA_PATH_ENV, &roots) };
    let index = SitePackagesIndex::from_env();
    unsafe { std::env::remove_var(METADATA_PATH_ENV) };

    assert_eq!(index.roots(), &[fixture.site(), fixture.project()]);
}

#[test]
#[serial]
fn site_packages_index_is_empty_without_env() {
    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::remove_var(METADATA_PATH_ENV) };

    assert!(SitePackagesIndex::from_env().roots().is_empty());
}
