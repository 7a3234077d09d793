//! Builds `.hpi` archives with a manifest for tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// An archive whose manifest carries `Plugin-Version` and, when given,
/// `Plugin-Dependencies`.
pub fn build(version: &str, dependencies: Option<&str>) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    write!(zip, "Manifest-Version: 1.0\r\nPlugin-Version: {}\r\n", version).unwrap();
    if let Some(deps) = dependencies {
        write!(zip, "Plugin-Dependencies: {}\r\n", deps).unwrap();
    }
    write!(zip, "\r\n").unwrap();
    zip.start_file("WEB-INF/lib/payload.jar", options).unwrap();
    let payload: Vec<u8> = (0u8..=255).cycle().take(2000).collect();
    zip.write_all(&payload).unwrap();
    zip.finish().unwrap().into_inner()
}
