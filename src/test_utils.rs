//! Test utilities for writing usage listings to disk.
//!
//! This module is only compiled for tests and benchmarks.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::record::Record;

/// A temporary directory holding usage listings.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestInput {
    dir: TempDir,
}

impl TestInput {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write raw listing text to `name` and return its full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(name);
        fs::write(&full_path, content).expect("Failed to write listing");
        full_path
    }

    /// Write `(size, owner, path)` triples as a listing.
    pub fn write_records(&self, name: &str, records: &[(u64, &str, &str)]) -> PathBuf {
        self.write(name, &listing(records))
    }
}

impl Default for TestInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `(size, owner, path)` triples in the input format.
pub fn listing(records: &[(u64, &str, &str)]) -> String {
    let mut out = String::new();
    for (size, owner, path) in records {
        let _ = writeln!(out, "{} {} {}", size, owner, path);
    }
    out
}

/// A synthetic listing of `count` files spread over a few owners and a
/// three-level directory layout.
pub fn synthetic_records(count: usize) -> Vec<Record> {
    const OWNERS: [&str; 4] = ["alice", "bob", "carol", "dave"];
    (0..count)
        .map(|i| {
            let path = format!(
                "/data/group_{}/project_{}/file_{}.dat",
                i % 7,
                i / 100,
                i
            );
            Record::new(&path, (i as u64 % 1000 + 1) * 4096, OWNERS[i % OWNERS.len()])
        })
        .collect()
}
