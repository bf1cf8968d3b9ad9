use std::io::Write;

/// Write a raw response body to the temp dir when `FB_DEBUG=1`.
pub fn dump_body(kind: &str, page: u32, body: &str) -> std::io::Result<()> {
    if std::env::var("FB_DEBUG").ok().as_deref() != Some("1") {
        return Ok(());
    }
    let path = std::env::temp_dir().join(format!("fbfeed_rs-{kind}-page{page}.txt"));
    let mut f = std::fs::File::create(&path)?;
    f.write_all(body.as_bytes())?;
    eprintln!("FB_DEBUG=1: wrote {}", path.display());
    Ok(())
}
