//! Test/recording helpers for persisting raw GraphQL bodies as fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("FB_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Bodies of one endpoint/target pair arrive once per page, so each write gets
/// the next free `_<n>` suffix instead of overwriting the previous page.
pub(crate) fn record_fixture(
    endpoint: &str,
    target: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let mut page = 1u32;
    let path = loop {
        let candidate = dir.join(format!("{endpoint}_{target}_{page}.{ext}"));
        if !candidate.exists() {
            break candidate;
        }
        page += 1;
    };

    let mut file = fs::File::create(&path)?;
    file.write_all(body.as_bytes())?;

    tracing::debug!(path = %path.display(), "FB_RECORD: wrote fixture");
    Ok(())
}
