//! # USB Transport
//!
//! Brother QL printers are USB printer-class devices. On Linux the `usblp`
//! driver exposes each one as `/dev/usb/lpN`; this module finds the node
//! belonging to a vendor/product id through sysfs and opens it with
//! [`FileBackend`].
//!
//! ```text
//! /sys/class/usbmisc/lp0/device   → .../1-1/1-1:1.0   (interface)
//! /sys/class/usbmisc/lp0/device/.. → .../1-1           (idVendor, idProduct, serial)
//! ```
//!
//! Common ids: vendor `0x04f9` (Brother), product `0x209b` (QL-800),
//! `0x209c` (QL-810W), `0x209d` (QL-820NWB), `0x2042` (QL-700).

use std::fs;
use std::path::{Path, PathBuf};

use super::file::FileBackend;
use crate::error::TransportError;

const SYSFS_USBMISC: &str = "/sys/class/usbmisc";
const DEV_USB: &str = "/dev/usb";

/// Open the printer with the given ids.
pub fn open(vendor: u16, product: u16, serial: Option<&str>) -> Result<FileBackend, TransportError> {
    let backend = FileBackend::open(find_device(vendor, product, serial)?)?;
    log::info!(
        "Using {} for USB printer {:04x}:{:04x}",
        backend.path().display(),
        vendor,
        product
    );
    Ok(backend)
}

/// Device node for the given ids.
pub fn find_device(
    vendor: u16,
    product: u16,
    serial: Option<&str>,
) -> Result<PathBuf, TransportError> {
    find_device_in(Path::new(SYSFS_USBMISC), Path::new(DEV_USB), vendor, product, serial)
}

pub(crate) fn find_device_in(
    sysfs: &Path,
    dev_root: &Path,
    vendor: u16,
    product: u16,
    serial: Option<&str>,
) -> Result<PathBuf, TransportError> {
    let entries = fs::read_dir(sysfs).map_err(|e| {
        TransportError::NotFound(format!(
            "cannot list {} ({}); is the usblp kernel module loaded?",
            sysfs.display(),
            e
        ))
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("lp"))
        .collect();
    names.sort();

    for name in names {
        let usb_device = sysfs.join(&name).join("device").join("..");

        let ids = (
            read_hex(&usb_device.join("idVendor")),
            read_hex(&usb_device.join("idProduct")),
        );
        if ids != (Some(vendor), Some(product)) {
            continue;
        }

        if let Some(wanted) = serial {
            let found = fs::read_to_string(usb_device.join("serial")).unwrap_or_default();
            if found.trim() != wanted {
                log::debug!("{} has serial '{}', skipping", name, found.trim());
                continue;
            }
        }

        return Ok(dev_root.join(name));
    }

    Err(TransportError::NotFound(match serial {
        Some(serial) => format!(
            "no USB printer {:04x}:{:04x} with serial {}",
            vendor, product, serial
        ),
        None => format!("no USB printer {:04x}:{:04x}", vendor, product),
    }))
}

fn read_hex(path: &Path) -> Option<u16> {
    let text = fs::read_to_string(path).ok()?;
    u16::from_str_radix(text.trim(), 16).ok()
}
