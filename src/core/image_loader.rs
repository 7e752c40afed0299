use std::sync::Arc;

use log::debug;
use tokio::sync::watch;
use url::Url;

use crate::http::fetcher::Fetcher;

/// Raw image bytes, empty until loaded.
pub type Thumbnail = Vec<u8>;

/// Fetches the image of a single row. There is no shared cache: every loader
/// issues its own request.
pub struct ImageLoader<F: Fetcher> {
    fetcher: Arc<F>,
    image_url: String,
    data: watch::Sender<Thumbnail>,
}

impl<F: Fetcher> ImageLoader<F> {
    pub fn new(fetcher: Arc<F>, image_url: impl Into<String>) -> Self {
        let (data, _) = watch::channel(Thumbnail::new());
        ImageLoader {
            fetcher,
            image_url: image_url.into(),
            data,
        }
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn subscribe(&self) -> watch::Receiver<Thumbnail> {
        self.data.subscribe()
    }

    pub fn data(&self) -> Thumbnail {
        self.data.borrow().clone()
    }

    pub async fn load(&self) {
        let Ok(url) = Url::parse(&self.image_url) else {
            debug!("Skipping image with invalid url {}", self.image_url);
            return;
        };

        let fetcher = Arc::clone(&self.fetcher);
        match tokio::spawn(async move { fetcher.get_bytes(url).await }).await {
            Ok(Ok(bytes)) => {
                self.data.send_replace(bytes);
            }
            Ok(Err(err)) => debug!("Failed to load image {}: {}", self.image_url, err),
            Err(err) => debug!("Image task for {} failed: {}", self.image_url, err),
        }
    }
}
