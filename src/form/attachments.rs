//! Images picked in a form before they are uploaded.

use serde::Serialize;
use uuid::Uuid;

use crate::error::UploadError;

/// A locally selected image shown through a preview (object) URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftImage {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub preview_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    images: Vec<DraftImage>,
}

impl Attachments {
    /// Accepts `image/*` files only.
    pub fn add(
        &mut self,
        file_name: impl Into<String>,
        content_type: &str,
        preview_url: impl Into<String>,
    ) -> Result<Uuid, UploadError> {
        let file_name = file_name.into();
        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(file_name));
        }
        let id = Uuid::new_v4();
        self.images.push(DraftImage {
            id,
            file_name,
            content_type: content_type.to_string(),
            preview_url: preview_url.into(),
        });
        Ok(id)
    }

    /// The removed image, so its preview URL can be released.
    pub fn remove(&mut self, id: Uuid) -> Option<DraftImage> {
        let index = self.images.iter().position(|img| img.id == id)?;
        Some(self.images.remove(index))
    }

    pub fn images(&self) -> &[DraftImage] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn clear(&mut self) -> Vec<DraftImage> {
        std::mem::take(&mut self.images)
    }
}

/// Turns draft images into hosted URLs.
#[async_trait::async_trait(?Send)]
pub trait ImageUploader {
    async fn upload_images(&self, images: &[DraftImage]) -> Result<Vec<String>, UploadError>;
}

/// Used until an upload endpoint exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUploader;

#[async_trait::async_trait(?Send)]
impl ImageUploader for NoUploader {
    async fn upload_images(&self, _images: &[DraftImage]) -> Result<Vec<String>, UploadError> {
        Err(UploadError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_images_are_accepted() {
        let mut attachments = Attachments::default();
        assert!(attachments.add("front.jpg", "image/jpeg", "blob:1").is_ok());
        assert_eq!(
            attachments.add("plan.pdf", "application/pdf", "blob:2"),
            Err(UploadError::NotAnImage("plan.pdf".into()))
        );
        assert_eq!(attachments.len(), 1);
    }

    #[test]
    fn images_are_removed_by_id() {
        let mut attachments = Attachments::default();
        let first = attachments.add("a.png", "image/png", "blob:a").unwrap();
        let second = attachments.add("b.png", "image/png", "blob:b").unwrap();
        assert_ne!(first, second);

        let removed = attachments.remove(first).unwrap();
        assert_eq!(removed.preview_url, "blob:a");
        assert!(attachments.remove(first).is_none());
        assert_eq!(attachments.images()[0].id, second);
    }
}
