//! Whitelisted static files served from the public directory.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::server::handler::ResponseStream;
use crate::server::response::{ResponseData, StatusCode};
use crate::server::Error;

/// Paths that may be served from the public directory.
pub const WHITELIST: &[&str] = &[
    "/index.html",
    "/spring.svg",
    "/spring.png",
    "/resources.html",
    "/styles.css",
    "/app.js",
    "/links.html",
    "/forms.html",
    "/classic.html",
    "/events.html",
    "/events.js",
];

/// The whitelisted path whose `{time}` placeholder is filled in per request.
pub const TEMPLATED_PATH: &str = "/classic.html";

/// Placeholder replaced in [`TEMPLATED_PATH`].
pub const TIME_PLACEHOLDER: &str = "{time}";

/// Serves [`WHITELIST`] paths from a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Serve from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Check if `path` may be served.
    pub fn is_whitelisted(&self, path: &str) -> bool {
        WHITELIST.contains(&path)
    }

    /// The on-disk location of a whitelisted path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Write a 200 response carrying the file behind `path`.
    ///
    /// A missing or unreadable file fails before anything is written.
    pub async fn serve(&self, path: &str, out: &mut ResponseStream<'_>) -> Result<(), Error> {
        let file_path = self.resolve(path);
        let content_type = content_type_for(&file_path);

        if path == TEMPLATED_PATH {
            let template = fs::read_to_string(&file_path).await?;
            let content = render_template(&template, &timestamp());
            debug!("Serving {} ({} bytes, templated)", file_path.display(), content.len());

            ResponseData::with_status(StatusCode::Ok, content_type, content.len() as u64)
                .write_head(out)
                .await?;
            out.write_all(content.as_bytes()).await?;
        } else {
            let mut file = File::open(&file_path).await?;
            let length = file.metadata().await?.len();
            debug!("Serving {} ({length} bytes)", file_path.display());

            ResponseData::with_status(StatusCode::Ok, content_type, length)
                .write_head(out)
                .await?;
            tokio::io::copy(&mut file, out).await?;
        }

        Ok(())
    }
}

/// MIME type guessed from the extension; `None` when it is unknown.
pub fn content_type_for(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|mime| mime.to_string())
}

/// Replace every `{time}` in `template` with `time`.
pub fn render_template(template: &str, time: &str) -> String {
    template.replace(TIME_PLACEHOLDER, time)
}

/// Current local time, e.g. `2024-05-01T13:45:12.123456789`.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string()
}
