/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use super::consts::{DATABASE_FILE_NAME, UPLOAD_DIR_NAME};
use super::input::load_secret;
use super::types::Cli;

/// Builds a point-in-time ZIP of the database file and every uploaded
/// file, with archive paths relative to the data directory so a restore
/// is a straight extraction. A momentarily absent database file is
/// skipped; everything under uploads/ is included even when no row
/// references it.
pub fn build_backup_archive(data_dir: &str) -> Result<Vec<u8>> {
    let data_dir = Path::new(data_dir);
    let mut buffer = Vec::new();

    {
        let mut archive = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let db_path = data_dir.join(DATABASE_FILE_NAME);
        if db_path.is_file() {
            let bytes = fs::read(&db_path).context("Failed to read database file")?;
            archive
                .start_file(DATABASE_FILE_NAME, options)
                .context("Failed to add database file to archive")?;
            archive
                .write_all(&bytes)
                .context("Failed to write database file to archive")?;
        }

        let upload_dir = data_dir.join(UPLOAD_DIR_NAME);
        if upload_dir.is_dir() {
            add_dir_recursive(&mut archive, options, data_dir, &upload_dir)?;
        }

        archive.finish().context("Failed to finalize archive")?;
    }

    Ok(buffer)
}

fn add_dir_recursive(
    archive: &mut ZipWriter<Cursor<&mut Vec<u8>>>,
    options: FileOptions,
    data_dir: &Path,
    dir: &Path,
) -> Result<()> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            add_dir_recursive(archive, options, data_dir, &path)?;
            continue;
        }

        let arc_name = path
            .strip_prefix(data_dir)
            .context("Upload path outside data directory")?
            .to_string_lossy()
            .replace('\\', "/");

        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        archive
            .start_file(&arc_name, options)
            .with_context(|| format!("Failed to add {} to archive", arc_name))?;
        archive
            .write_all(&bytes)
            .with_context(|| format!("Failed to write {} to archive", arc_name))?;
    }

    Ok(())
}

pub fn backup_file_name() -> String {
    format!(
        "wellatlas-backup-{}.zip",
        Utc::now().format("%Y%m%d-%H%M%S")
    )
}

/// Pushes an already-built archive to the configured remote provider.
/// Independent of local archive generation: a failure here is reported
/// to the caller and never affects the local path.
pub async fn upload_backup(cli: &Cli, archive: Vec<u8>, file_name: &str) -> Result<()> {
    let Some(url) = &cli.backup_url else {
        bail!("Remote backup is not configured");
    };

    let mut request = reqwest::Client::new()
        .post(url)
        .query(&[("name", file_name)])
        .header(reqwest::header::CONTENT_TYPE, "application/zip")
        .body(archive);

    if let Some(folder) = &cli.backup_folder {
        request = request.query(&[("folder", folder)]);
    }

    if let Some(secret_file) = &cli.backup_secret_file {
        request = request.bearer_auth(load_secret(secret_file));
    }

    let response = request
        .send()
        .await
        .context("Failed to reach backup provider")?;

    if !response.status().is_success() {
        bail!("Backup provider returned {}", response.status());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entries = Vec::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            entries.push((file.name().to_string(), content));
        }

        entries
    }

    #[test]
    fn archives_database_file_alone() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DATABASE_FILE_NAME), b"sqlite bytes").unwrap();
        fs::create_dir_all(dir.path().join(UPLOAD_DIR_NAME)).unwrap();

        let bytes = build_backup_archive(dir.path().to_str().unwrap()).unwrap();
        let entries = entries(&bytes);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, DATABASE_FILE_NAME);
        assert_eq!(entries[0].1, b"sqlite bytes");
    }

    #[test]
    fn missing_database_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let upload_dir = dir.path().join(UPLOAD_DIR_NAME);
        fs::create_dir_all(&upload_dir).unwrap();
        fs::write(upload_dir.join("20240105_photo.png"), b"png").unwrap();

        let bytes = build_backup_archive(dir.path().to_str().unwrap()).unwrap();
        let entries = entries(&bytes);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "uploads/20240105_photo.png");
    }

    #[test]
    fn upload_paths_are_relative_to_data_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DATABASE_FILE_NAME), b"db").unwrap();
        let upload_dir = dir.path().join(UPLOAD_DIR_NAME);
        fs::create_dir_all(&upload_dir).unwrap();
        fs::write(upload_dir.join("a.png"), b"a").unwrap();
        fs::write(upload_dir.join("b.pdf"), b"b").unwrap();

        let bytes = build_backup_archive(dir.path().to_str().unwrap()).unwrap();
        let names: Vec<String> = entries(&bytes).into_iter().map(|(n, _)| n).collect();

        assert_eq!(
            names,
            vec![
                DATABASE_FILE_NAME.to_string(),
                "uploads/a.png".to_string(),
                "uploads/b.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn empty_data_dir_yields_empty_archive() {
        let dir = TempDir::new().unwrap();

        let bytes = build_backup_archive(dir.path().to_str().unwrap()).unwrap();
        assert!(entries(&bytes).is_empty());
    }

    #[test]
    fn backup_file_name_shape() {
        let name = backup_file_name();
        assert!(name.starts_with("wellatlas-backup-"));
        assert!(name.ends_with(".zip"));
    }
}
