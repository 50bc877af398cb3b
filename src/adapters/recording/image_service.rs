//! Recording adapter for the `ImageService` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{
    ContentRequest, ContentResponse, ImageService, ImagesRequest, ImagesResponse, ServiceFuture,
};

/// Records image service interactions while delegating to an inner implementation.
pub struct RecordingImageService {
    inner: Box<dyn ImageService>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageService {
    /// Creates a new recording service wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageService>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageService for RecordingImageService {
    fn generate_images(&self, request: &ImagesRequest) -> ServiceFuture<'_, ImagesResponse> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate_images(&request).await;
            record_result(&self.recorder, "generate_images", &request, &result);
            result
        })
    }

    fn generate_content(&self, request: &ContentRequest) -> ServiceFuture<'_, ContentResponse> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate_content(&request).await;
            record_result(&self.recorder, "generate_content", &request, &result);
            result
        })
    }
}
