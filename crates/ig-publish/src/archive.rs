//! Versioned copies and zip archives of a build

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Files and directories under `dir`, depth first, sorted by name.
fn walk(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("cannot read {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("cannot read {}", dir.display()))?;
    entries.sort();

    let mut out = Vec::new();
    for path in entries {
        let is_dir = path.is_dir();
        out.push(path.clone());
        if is_dir {
            out.extend(walk(&path)?);
        }
    }
    Ok(out)
}

/// Archive entry name of `path` relative to `root`, with `/` separators.
fn entry_name(prefix: &str, root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
    let mut name = prefix.trim_end_matches('/').to_string();
    for part in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&part.as_os_str().to_string_lossy());
    }
    Ok(name)
}

/// Copy the tree at `src` to `dst`, creating `dst`. Returns the number of
/// files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("cannot create {}", dst.display()))?;

    let mut copied = 0;
    for path in walk(src)? {
        let target = dst.join(path.strip_prefix(src)?);
        if path.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("cannot create {}", target.display()))?;
        } else {
            fs::copy(&path, &target).with_context(|| {
                format!("cannot copy {} to {}", path.display(), target.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Zip the tree at `src` into `archive`, placing every entry under `prefix/`.
pub fn zip_dir(src: &Path, prefix: &str, archive: &Path) -> Result<PathBuf> {
    if let Some(parent) = archive.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let file =
        File::create(archive).with_context(|| format!("cannot create {}", archive.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.add_directory(format!("{}/", prefix.trim_end_matches('/')), options)?;
    for path in walk(src)? {
        let name = entry_name(prefix, src, &path)?;
        if path.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
        } else {
            zip.start_file(name, options)?;
            let mut input =
                File::open(&path).with_context(|| format!("cannot open {}", path.display()))?;
            io::copy(&mut input, &mut zip)
                .with_context(|| format!("cannot archive {}", path.display()))?;
        }
    }
    zip.finish()
        .with_context(|| format!("cannot finish {}", archive.display()))?;
    Ok(archive.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_uses_prefix_and_forward_slashes() {
        let root = Path::new("/tmp/build");
        let path = root.join("site").join("index.html");
        assert_eq!(
            entry_name("1.0.0", root, &path).unwrap(),
            "1.0.0/site/index.html"
        );
        assert_eq!(entry_name("", root, &path).unwrap(), "site/index.html");
    }
}
