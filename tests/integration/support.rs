use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a vault on disk from (path, content) pairs.
pub fn vault_on_disk(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (path, content) in files {
        write_file(temp.path(), path, content);
    }
    temp
}

pub fn write_file(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// Config file with relocation switched on or off, placed outside the vault.
///
/// Deletes permanently so test runs leave nothing in the user's trash.
pub fn config_file(dir: &TempDir, move_banners_to_root: bool) -> std::path::PathBuf {
    let path = dir.path().join("attachprune-test.toml");
    fs::write(
        &path,
        format!(
            "[sweep]\nmove_banners_to_root = {}\ndelete_mode = \"permanent\"\n",
            move_banners_to_root
        ),
    )
    .unwrap();
    path
}
