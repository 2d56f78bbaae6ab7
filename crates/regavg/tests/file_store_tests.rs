//! Tests for input file discovery.

mod common;

use common::{date, TextProduct};
use regavg::FileStore;
use test_utils::{temp_test_dir_with_prefix, write_test_file};

#[test]
fn test_scan_groups_files_by_day() {
    let dir = temp_test_dir_with_prefix("filestore_test");
    let root = dir.path();
    write_test_file(root, "2010/01/sst-20100101.nc", "291");
    write_test_file(root, "b/sst-20100115.nc", "292");
    write_test_file(root, "a/sst-20100115.nc", "293");
    write_test_file(root, "2010/02/sst-20100210.nc", "294");

    let store = FileStore::scan(&TextProduct, ".nc", &[root]).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.product_name(), "TEXT");

    let january = store.files(date(2010, 1, 1), date(2010, 2, 1));
    assert_eq!(january.len(), 2);
    assert_eq!(january[0].date, date(2010, 1, 1));
    assert_eq!(january[1].date, date(2010, 1, 15));
    assert_eq!(january[1].files, vec![root.join("a/sst-20100115.nc"), root.join("b/sst-20100115.nc")]);
}

#[test]
fn test_files_range_is_half_open() {
    let dir = temp_test_dir_with_prefix("filestore_test");
    write_test_file(dir.path(), "sst-20100201.nc", "291");

    let store = FileStore::scan(&TextProduct, ".nc", &[dir.path()]).unwrap();
    assert!(store.files(date(2010, 1, 1), date(2010, 2, 1)).is_empty());
    assert_eq!(store.files(date(2010, 2, 1), date(2010, 2, 2)).len(), 1);
    assert!(store.files(date(2010, 2, 2), date(2010, 2, 1)).is_empty());
}

#[test]
fn test_scan_skips_foreign_and_undated_files() {
    let dir = temp_test_dir_with_prefix("filestore_test");
    write_test_file(dir.path(), "sst-20100101.nc", "291");
    write_test_file(dir.path(), "sst-20100101.nc.md5", "abc");
    write_test_file(dir.path(), "readme.nc", "not a product");
    write_test_file(dir.path(), "sst-2010.nc", "291");

    let store = FileStore::scan(&TextProduct, ".nc", &[dir.path()]).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.files(date(2010, 1, 1), date(2011, 1, 1))[0].files.len(), 1);
}

#[test]
fn test_scan_multiple_input_paths() {
    let first = temp_test_dir_with_prefix("filestore_a");
    let second = temp_test_dir_with_prefix("filestore_b");
    write_test_file(first.path(), "sst-20100101.nc", "291");
    write_test_file(second.path(), "sst-20100101.nc", "292");

    let store = FileStore::scan(&TextProduct, ".nc", &[first.path(), second.path()]).unwrap();
    assert_eq!(store.input_paths().len(), 2);
    assert_eq!(store.files(date(2010, 1, 1), date(2010, 1, 2))[0].files.len(), 2);
}

#[test]
fn test_scan_missing_path_fails() {
    let dir = temp_test_dir_with_prefix("filestore_test");
    let missing = dir.path().join("does-not-exist");
    assert!(FileStore::scan(&TextProduct, ".nc", &[missing]).is_err());
}
