//! The real transport against nodes that are not usbdevfs devices.

mod common;

use common::init_logger;
use nix::errno::Errno;
use windroidpro::error::{claim_status, transfer_status};
use windroidpro::{
    BulkTransferRequest, ControlTransferRequest, Endpoint, UsbConfig, UsbError, UsbManager,
    REQUEST_GET_DESCRIPTOR,
};

#[test]
fn missing_node_reports_enoent() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("001").join("002");
    let usb = UsbManager::usbfs(UsbConfig::default());
    let err = usb.open_device(path.to_str().unwrap()).unwrap_err();
    assert_eq!(err.errno(), Errno::ENOENT);
}

#[test]
fn ioctls_on_a_regular_file_fail_cleanly() {
    init_logger();
    let file = tempfile::NamedTempFile::new().unwrap();
    let usb = UsbManager::usbfs(UsbConfig::default());
    let mut handle = usb.open_device(file.path().to_str().unwrap()).unwrap();
    assert!(handle.as_raw() >= 0);

    let mut buf = [0u8; 18];
    let ctrl = ControlTransferRequest::new_with_data(0x80, REQUEST_GET_DESCRIPTOR, 0x0100, 0, &mut buf, 100);
    assert!(transfer_status(&usb.control_transfer(&handle, ctrl)) < 0);

    let bulk = BulkTransferRequest::new(Endpoint::bulk_in(1), &mut buf, 100);
    assert!(matches!(
        usb.bulk_transfer(&handle, bulk),
        Err(UsbError::Transfer { .. })
    ));

    assert!(!claim_status(&usb.claim_interface(&handle, 0)));
    assert!(!claim_status(&usb.release_interface(&handle, 0)));

    usb.close_device(&mut handle);
    assert!(!handle.is_valid());
    usb.close_device(&mut handle);
}

#[test]
fn read_write_go_through_the_descriptor() {
    init_logger();
    let file = tempfile::NamedTempFile::new().unwrap();
    let usb = UsbManager::usbfs(UsbConfig::default());
    let mut handle = usb.open_device(file.path().to_str().unwrap()).unwrap();
    assert_eq!(usb.write_device(&handle, b"abcdef", 6).unwrap(), 6);
    usb.close_device(&mut handle);

    let mut handle = usb.open_device(file.path().to_str().unwrap()).unwrap();
    let mut buf = [0u8; 6];
    assert_eq!(usb.read_device(&handle, &mut buf, 6).unwrap(), 6);
    assert_eq!(&buf, b"abcdef");
    usb.close_device(&mut handle);
}
