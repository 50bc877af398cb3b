//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the studio core and an
//! external system. Implementations live in `src/adapters/`.

pub mod image_service;

pub use image_service::{
    ContentPart, ContentRequest, ContentResponse, ImagePayload, ImageService, ImagesRequest,
    ImagesResponse, Modality, ServiceFuture,
};
