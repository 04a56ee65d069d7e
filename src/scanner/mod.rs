use crate::error::{RefMatchError, Result};
use refmatch_common::FileItem;
use std::path::Path;
use url::Url;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// 基点URLにファイル名を1セグメントとして連結する（パーセントエンコード済み）
pub fn build_file_url(base_url: &str, file_name: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| RefMatchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| RefMatchError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(file_name);

    Ok(url.to_string())
}

/// フォルダ直下の画像をファイル一覧にする
pub fn scan_folder(folder: &Path, base_url: &str) -> Result<Vec<FileItem>> {
    if !folder.is_dir() {
        return Err(RefMatchError::FolderNotFound(folder.display().to_string()));
    }

    let mut items = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if !is_image {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let url = build_file_url(base_url, &file_name)?;

        items.push(FileItem::new(file_name, url));
    }

    // ファイル名でソート
    items.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(items)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}
