//! Replaying adapter for the `ImageService` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{
    ContentRequest, ContentResponse, ImageService, ImagesRequest, ImagesResponse, ServiceFuture,
};

/// Serves recorded image service results from a cassette.
pub struct ReplayingImageService {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageService {
    /// Create a replaying service backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageService for ReplayingImageService {
    fn generate_images(&self, request: &ImagesRequest) -> ServiceFuture<'_, ImagesResponse> {
        let result = replay(&self.replayer, "generate_images", request);
        Box::pin(async move { result })
    }

    fn generate_content(&self, request: &ContentRequest) -> ServiceFuture<'_, ContentResponse> {
        let result = replay(&self.replayer, "generate_content", request);
        Box::pin(async move { result })
    }
}
