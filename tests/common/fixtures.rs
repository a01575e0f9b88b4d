//! Firmware archive fixtures

use std::io::{Cursor, Write};
use std::path::Path;
use uefi_fetch::Config;

/// Zip laid out like a GitHub source archive of the firmware repository
pub fn firmware_archive() -> Vec<u8> {
    build_zip(&[
        ("RaspberryPiPkg-master/", b""),
        ("RaspberryPiPkg-master/README.md", b"readme"),
        ("RaspberryPiPkg-master/Binary/", b""),
        ("RaspberryPiPkg-master/Binary/prebuilt/", b""),
        ("RaspberryPiPkg-master/Binary/prebuilt/2018Nov05-GCC49/", b""),
        (
            "RaspberryPiPkg-master/Binary/prebuilt/2018Nov05-GCC49/RELEASE/RPI_EFI.fd",
            b"2018 release",
        ),
        ("RaspberryPiPkg-master/Binary/prebuilt/2019Jan25-GCC49/", b""),
        ("RaspberryPiPkg-master/Binary/prebuilt/2019Jan25-GCC49/RELEASE/", b""),
        (
            "RaspberryPiPkg-master/Binary/prebuilt/2019Jan25-GCC49/RELEASE/RPI_EFI.fd",
            b"2019 release",
        ),
        ("RaspberryPiPkg-master/Binary/prebuilt/2019Jan25-GCC49/DEBUG/", b""),
        (
            "RaspberryPiPkg-master/Binary/prebuilt/2019Jan25-GCC49/DEBUG/RPI_EFI.fd",
            b"2019 debug",
        ),
    ])
}

/// Build a zip in memory; names ending with `/` become directory entries
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Config fetching `source_url` and extracting under `root`
pub fn config_for(source_url: String, root: &Path) -> Config {
    Config {
        source_url,
        destination: root.join("Downloaded").join("UEFI"),
        fetch_timeout_secs: 10,
        ..Default::default()
    }
}
