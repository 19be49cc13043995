#![allow(dead_code)]

use jarslim_core::{DependencyGraph, GraphFileResolver, ProjectModel};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const MANIFEST: &str = "Manifest-Version: 1.0\nMain-Class: org.springframework.boot.loader.launch.JarLauncher\n";

/// Writes a jar with stored (uncompressed) entries so sizes are predictable.
pub fn build_jar(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(name.trim_end_matches('/'), options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap();
}

pub fn entry_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Breaks the local file header signature of `entry`. The central directory still lists
/// the entry, so the archive opens but that one entry cannot be read.
pub fn corrupt_local_header(path: &Path, entry: &str) {
    const LOCAL_HEADER: &[u8] = b"PK\x03\x04";
    const NAME_OFFSET: usize = 30;

    let mut data = std::fs::read(path).unwrap();
    let name = entry.as_bytes();
    let start = (NAME_OFFSET..data.len() - name.len())
        .find(|&i| {
            &data[i..i + name.len()] == name
                && &data[i - NAME_OFFSET..i - NAME_OFFSET + 4] == LOCAL_HEADER
        })
        .map(|i| i - NAME_OFFSET)
        .unwrap();
    data[start..start + 4].copy_from_slice(b"XXXX");
    std::fs::write(path, data).unwrap();
}

pub fn bytes(len: usize) -> Vec<u8> {
    vec![b'x'; len]
}

pub fn project_from_tgf(tgf: &str) -> (ProjectModel, GraphFileResolver) {
    let graph = DependencyGraph::from_tgf(tgf).unwrap();
    let project = ProjectModel::from_graph(&graph);
    (project, GraphFileResolver::new(graph))
}
