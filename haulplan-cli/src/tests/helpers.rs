//! Test helpers for writing job files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// The five-job fixture with city, date and location metadata.
pub(super) const JOBS_CSV: &str = "\
id,revenue,loaded_miles,deadhead_miles,hours,pallets,pickup_city,dropoff_city,date,notes,pickup_lat,pickup_lon,dropoff_lat,dropoff_lon
1,700,120,0,3,2,Leeds,York,2024-03-04,,53.75,-1.5,54,-1.125
2,500,60,0,2,1,Hull,Leeds,2024-03-02,,,,,
3,900,180,0,4.5,3,Leeds,Manchester,2024-03-05,,,,,
4,400,40,0,1.5,1,York,Hull,2024-03-06,,,,,
5,650,100,0,3,2,Manchester,Leeds,2024-03-07,,,,,
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory holding `jobs.csv`.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("jobs.csv"), JOBS_CSV.as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn jobs(&self) -> Utf8PathBuf {
        self.path("jobs.csv")
    }
}
