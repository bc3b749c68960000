//! Pass-through hosting for the dashboard build and camera media.

use std::path::{Component, Path, PathBuf};

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use super::error::ApiError;

/// Joins `relative` onto `root`, refusing anything that could climb out.
pub fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

pub fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

pub async fn serve(root: &Path, relative: &str) -> Result<Response, ApiError> {
    let path = resolve(root, relative)
        .ok_or_else(|| ApiError::NotFound(format!("No asset at {relative}")))?;
    serve_file(&path).await
}

pub async fn serve_file(path: &Path) -> Result<Response, ApiError> {
    let is_file = tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ApiError::NotFound(format!("No asset at {}", path.display())));
    }
    let data = tokio::fs::read(path)
        .await
        .map_err(|_| ApiError::NotFound(format!("No asset at {}", path.display())))?;
    Ok((
        [(header::CONTENT_TYPE, content_type(path))],
        Bytes::from(data),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_traversal() {
        let root = Path::new("/srv/dist");
        assert_eq!(
            resolve(root, "cameras/cam1.jpg"),
            Some(PathBuf::from("/srv/dist/cameras/cam1.jpg"))
        );
        assert_eq!(resolve(root, "../secrets"), None);
        assert_eq!(resolve(root, "cameras/../../etc/passwd"), None);
        assert_eq!(resolve(root, ""), None);
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("a/app.JS")), "application/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("cam.png")), "image/png");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
