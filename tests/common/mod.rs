#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Raw contents of a `reg` file with one address and one size cell.
pub fn reg(base: u32, size: u32) -> Vec<u8> {
    let mut raw = base.to_be_bytes().to_vec();
    raw.extend_from_slice(&size.to_be_bytes());
    raw
}

/// Raw contents of a `compatible` file.
pub fn compat(strings: &[&str]) -> Vec<u8> {
    let mut raw = Vec::new();
    for s in strings {
        raw.extend_from_slice(s.as_bytes());
        raw.push(0);
    }
    raw
}

/// A device tree directory hierarchy in a temporary directory.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the node directory `rel` (and its parents).
    pub fn node(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates the property file `name` of the node `rel`.
    pub fn prop(&self, rel: &str, name: &str, content: &[u8]) -> PathBuf {
        let path = self.node(rel).join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Creates a device node at `rel`.
    pub fn device(&self, rel: &str, base: u32, size: u32) -> PathBuf {
        self.prop(rel, "reg", &reg(base, size));
        self.node(rel)
    }

    /// A Zynq-like tree with eight devices.
    ///
    /// ```text
    /// /                       compatible, no reg
    /// ├── cpus
    /// │   ├── cpu@0           reg
    /// │   └── cpu@1           reg
    /// ├── amba
    /// │   ├── ethernet@e000b000   reg, compatible
    /// │   │   └── phy@7           reg
    /// │   ├── ethernet@e000c000   reg, compatible
    /// │   ├── serial@84000000     reg, compatible, instance, value, gpios
    /// │   └── i2c@e0004000        reg
    /// │       └── eeprom@50       reg
    /// └── chosen              bootargs, no reg
    /// ```
    pub fn zynq() -> Self {
        let fx = Self::new();
        fx.prop("", "compatible", &compat(&["xlnx,zynq-7000"]));

        fx.device("cpus/cpu@0", 0, 1);
        fx.prop("cpus/cpu@0", "compatible", &compat(&["arm,cortex-a9"]));
        fx.device("cpus/cpu@1", 1, 1);
        fx.prop("cpus/cpu@1", "compatible", &compat(&["arm,cortex-a9"]));

        fx.device("amba/ethernet@e000b000", 0xe000_b000, 0x1000);
        fx.prop(
            "amba/ethernet@e000b000",
            "compatible",
            &compat(&["cdns,gem", "xlnx,ps7-ethernet-1.00.a"]),
        );
        fx.device("amba/ethernet@e000b000/phy@7", 7, 1);
        fx.device("amba/ethernet@e000c000", 0xe000_c000, 0x1000);
        fx.prop("amba/ethernet@e000c000", "compatible", &compat(&["cdns,gem"]));

        fx.device("amba/serial@84000000", 0x8400_0000, 0x1_0000);
        fx.prop(
            "amba/serial@84000000",
            "compatible",
            &compat(&["xlnx,xps-uartlite-1.00.a"]),
        );
        fx.prop("amba/serial@84000000", "instance", b"uart0\0");
        fx.prop("amba/serial@84000000", "value", &[0, 0, 0, 5]);
        fx.prop("amba/serial@84000000", "gpios", &[0, 0, 0, 3, 0, 0, 0, 1]);

        fx.device("amba/i2c@e0004000", 0xe000_4000, 0x1000);
        fx.device("amba/i2c@e0004000/eeprom@50", 0x50, 1);

        fx.prop("chosen", "bootargs", b"console=ttyPS0,115200\0");
        fx
    }
}
