use crate::config::Config;
use crate::image_classifier::interface::ClassificationError;
use crate::image_source::core::{ImageRef, ImageSource};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::borrow::Cow;
use std::sync::Arc;

/// Turns an image reference into decoded pixels. Uploads decode from memory,
/// `http(s)` URLs are fetched and anything else is read as a local path.
pub struct ImageLoader {
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageLoader {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.lookup.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            logger: logger.with_namespace("image_loader"),
        })
    }

    pub fn load(&self, image: &ImageRef) -> Result<DynamicImage, ClassificationError> {
        let bytes: Cow<[u8]> = match &image.source {
            ImageSource::Upload(upload) => Cow::Borrowed(&upload.bytes[..]),
            ImageSource::Url(url) if is_remote(url) => Cow::Owned(self.fetch(url)?),
            ImageSource::Url(path) => {
                let path = path.strip_prefix("file://").unwrap_or(path);
                Cow::Owned(std::fs::read(path)?)
            }
        };

        Ok(image::load_from_memory(&bytes)?)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, ClassificationError> {
        let _ = self.logger.info(&format!("Fetching {}", url));

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ClassificationError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassificationError::Fetch(format!(
                "{} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ClassificationError::Fetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
