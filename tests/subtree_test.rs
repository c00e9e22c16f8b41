extern crate devtree_fs;

mod common;

use devtree_fs::base::{Binding, BindingTable};
use devtree_fs::fdt_util::props::parse_string;
use devtree_fs::prelude::*;
use devtree_fs::DevTreeFs;

use common::Fixture;

#[test]
fn each_match_is_walked_separately() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("ethernet").unwrap();
    assert_eq!(devtree.pending_matches(), 2);
    assert!(devtree.is_exhausted());

    let mut walks = Vec::new();
    while let Some(sub) = devtree.next_match().unwrap() {
        let first = sub.next_dev().unwrap().unwrap();
        assert!(first.is_root());
        let mut walked = vec![first.name().to_owned()];
        while let Some(dev) = sub.next_dev().unwrap() {
            assert!(!dev.is_root());
            walked.push(dev.name().to_owned());
        }
        walks.push(walked);
    }
    assert_eq!(devtree.pending_matches(), 0);
    assert!(devtree.next_match().unwrap().is_none());

    walks.sort();
    assert_eq!(
        walks,
        vec![
            vec!["ethernet@e000b000".to_owned(), "phy@7".to_owned()],
            vec!["ethernet@e000c000".to_owned()],
        ]
    );
    assert_eq!(walks.iter().map(Vec::len).sum::<usize>(), 3);
}

#[test]
fn matched_devices_are_kept_until_freed() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("i2c").unwrap();

    let sub = devtree.next_match().unwrap().unwrap();
    assert!(sub.is_open());

    let matched = devtree.matched().map(|d| d.name()).collect::<Vec<_>>();
    assert_eq!(matched, vec!["i2c@e0004000"]);

    devtree.free_match();
    assert_eq!(devtree.matched().count(), 0);
    devtree.free_match();
}

#[test]
fn no_match_yields_nothing() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("spi").unwrap();
    assert_eq!(devtree.pending_matches(), 0);
    assert!(devtree.next_match().unwrap().is_none());
    assert!(!devtree.is_error());
}

#[test]
fn match_resumes_from_current_position() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.find_by_name("ethernet@e000b000").unwrap().unwrap();

    // Only devices after the current position are considered.
    devtree.match_prefix("ethernet").unwrap();
    assert!(devtree.pending_matches() <= 1);

    devtree.reset().unwrap();
    devtree.match_prefix("cpu").unwrap();
    assert_eq!(devtree.pending_matches(), 2);
}

#[test]
fn new_match_replaces_unclaimed_matches() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("ethernet").unwrap();
    assert_eq!(devtree.pending_matches(), 2);

    devtree.reset().unwrap();
    devtree.match_prefix("cpu").unwrap();
    assert_eq!(devtree.pending_matches(), 2);
    while let Some(sub) = devtree.next_match().unwrap() {
        let cpu = sub.next_dev().unwrap().unwrap();
        assert!(cpu.name().starts_with("cpu@"));
    }
}

#[test]
fn matched_device_keeps_its_name_in_the_sub_walk() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("i2c").unwrap();

    let sub = devtree.next_match().unwrap().unwrap();
    let bus = sub.find_by_name("i2c@e0004000").unwrap().unwrap();
    assert!(bus.is_root());
    assert_eq!(bus.base(), 0xe000_4000);
    assert_eq!(sub.next_dev().unwrap().unwrap().name(), "eeprom@50");

    let matched = devtree.matched().next().unwrap();
    assert_eq!(matched.name(), "i2c@e0004000");
    assert_eq!(matched.path(), bus.path());
}

#[test]
fn close_releases_matches() {
    let fx = Fixture::zynq();
    let mut devtree = DevTreeFs::from_root(fx.root()).unwrap();
    devtree.match_prefix("cpu").unwrap();
    devtree.next_match().unwrap().unwrap();

    devtree.close();
    assert!(!devtree.is_open());
    assert_eq!(devtree.pending_matches(), 0);
    assert_eq!(devtree.matched().count(), 0);
}

#[test]
fn sub_walks_inherit_bindings() {
    let fx = Fixture::zynq();
    let table = BindingTable::new(vec![Binding::new("instance", parse_string)]);
    let mut devtree = DevTreeFs::with_bindings(&table);
    devtree.open(fx.root()).unwrap();
    devtree.match_prefix("serial").unwrap();

    let sub = devtree.next_match().unwrap().unwrap();
    let uart = sub.next_dev().unwrap().unwrap();
    assert_eq!(uart.string_property("instance"), Some("uart0"));
}
