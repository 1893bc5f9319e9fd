use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageError, ImageReader};
use log::{debug, warn};
use serde_json::Value;

use crate::consts::{
    DOWNLOAD_TIMEOUT, LOOKUP_TIMEOUT, MAX_IMAGE_BYTES, USER_AGENT, WIKIPEDIA_API_URL,
};
use crate::error::FetchError;

use super::ImageSource;

/// Page-image lookups against the Wikipedia action API
pub(crate) struct WikipediaSource {
    api_url: String,
    thumb_width: u32,
    lookup_agent: ureq::Agent,
    download_agent: ureq::Agent,
}

fn agent_with_timeout(timeout: std::time::Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .user_agent(USER_AGENT)
        .build()
        .into()
}

impl WikipediaSource {
    pub(crate) fn new(thumb_width: u32) -> Self {
        Self::with_api_url(WIKIPEDIA_API_URL, thumb_width)
    }

    pub(crate) fn with_api_url(api_url: &str, thumb_width: u32) -> Self {
        Self {
            api_url: api_url.to_string(),
            thumb_width,
            lookup_agent: agent_with_timeout(LOOKUP_TIMEOUT),
            download_agent: agent_with_timeout(DOWNLOAD_TIMEOUT),
        }
    }

    fn query_page_images(&self, title: &str) -> Result<Value, FetchError> {
        let article = title.replace(' ', "_");
        let thumb_width = self.thumb_width.to_string();
        let value = self
            .lookup_agent
            .get(&self.api_url)
            .query("action", "query")
            .query("titles", &article)
            .query("prop", "pageimages")
            .query("format", "json")
            .query("pithumbsize", &thumb_width)
            .query("redirects", "1")
            .call()?
            .body_mut()
            .read_json::<Value>()?;
        Ok(value)
    }

    fn download(&self, url: &str) -> Result<DynamicImage, FetchError> {
        let bytes = self
            .download_agent
            .get(url)
            .call()?
            .body_mut()
            .with_config()
            .limit(MAX_IMAGE_BYTES)
            .read_to_vec()?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        decode_upright(&bytes)
    }
}

/// Decode to RGB with the EXIF orientation applied.
pub(crate) fn decode_upright(bytes: &[u8]) -> Result<DynamicImage, FetchError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut decoded = DynamicImage::from_decoder(decoder)?;
    decoded.apply_orientation(orientation);
    Ok(DynamicImage::ImageRgb8(decoded.to_rgb8()))
}

/// First non-empty `thumbnail.source` among the returned pages
pub(crate) fn thumbnail_from_response(response: &Value) -> Option<String> {
    let pages = response.get("query")?.get("pages")?.as_object()?;
    pages.values().find_map(|page| {
        page.get("thumbnail")
            .and_then(|thumb| thumb.get("source"))
            .and_then(Value::as_str)
            .filter(|source| !source.is_empty())
            .map(str::to_string)
    })
}

impl ImageSource for WikipediaSource {
    fn locate(&self, title: &str) -> Option<String> {
        match self.query_page_images(title) {
            Ok(response) => thumbnail_from_response(&response),
            Err(e) => {
                warn!("Wikipedia API error: {e}");
                None
            }
        }
    }

    fn fetch(&self, url: &str) -> Option<DynamicImage> {
        match self.download(url) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Download error: {e}");
                None
            }
        }
    }
}
