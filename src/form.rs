//! Create/edit form workflow
//!
//! Drafts are text-only: every input is a string keyed by field name, parsed
//! into a typed payload at validation time. Field tables ([`FieldSpec`]) let a
//! single dialog component render any resource's form.

use std::fmt::Debug;
use std::str::FromStr;

use fscape_admin_shared::ResourceId;
use serde::Serialize;
use tracing::warn;

use crate::client::ApiClient;
use crate::controller::ListController;
use crate::dialog::DialogState;
use crate::error::{FieldErrors, ResourceError, SubmitError, UploadError};
use crate::request::HttpTransport;

/// Declares a text-only draft struct and its keyed accessors.
macro_rules! text_draft {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: String,)+
        }

        impl $crate::form::TextFields for $name {
            fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $(stringify!($field) => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn set(&mut self, key: &str, value: String) -> bool {
                match key {
                    $(stringify!($field) => {
                        self.$field = value;
                        true
                    })+
                    _ => false,
                }
            }
        }
    };
}

pub mod attachments;
pub mod drafts;

pub use attachments::{Attachments, DraftImage, ImageUploader, NoUploader};
pub use drafts::*;

// =========================================================
// Field metadata
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    /// Fixed `(value, label)` options.
    Choice(&'static [(&'static str, &'static str)]),
    /// Options loaded from another collection, named by its path.
    Reference(&'static str),
    /// `"true"` / `"false"`.
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub create_only: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            create_only: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    pub fn visible_in(&self, mode: &FormMode) -> bool {
        !self.create_only || matches!(mode, FormMode::Create)
    }
}

pub const TOGGLE_OPTIONS: &[(&str, &str)] = &[("true", "Active"), ("false", "Inactive")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ResourceId),
}

// =========================================================
// Drafts
// =========================================================

/// Keyed string access to a draft's inputs.
pub trait TextFields {
    fn get(&self, key: &str) -> Option<&str>;
    /// Returns `false` for unknown keys.
    fn set(&mut self, key: &str, value: String) -> bool;
}

pub trait FormDraft: TextFields + Clone + Debug + 'static {
    type Target: fscape_admin_shared::Resource;
    type Payload: Serialize;

    const FIELDS: &'static [FieldSpec];
    const ACCEPTS_IMAGES: bool = false;

    /// Empty create template.
    fn blank() -> Self;

    /// Copy of an existing record for editing.
    fn from_resource(target: &Self::Target) -> Self;

    fn existing_images(_target: &Self::Target) -> Vec<String> {
        Vec::new()
    }

    fn validate(&self, mode: &FormMode) -> FieldErrors;

    /// Only called after [`FormDraft::validate`] came back empty.
    fn to_payload(&self, images: Vec<String>) -> Self::Payload;
}

// =========================================================
// Parsing helpers shared by drafts
// =========================================================

pub(crate) fn require(errors: &mut FieldErrors, key: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(key, message);
    }
}

/// Trimmed text, `None` when blank.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn optional_id(value: &str) -> Option<ResourceId> {
    optional_text(value).map(ResourceId::from)
}

/// Parses a non-blank value; `Ok(None)` when blank.
pub(crate) fn parse_optional<N: FromStr>(value: &str) -> Result<Option<N>, ()> {
    match value.trim() {
        "" => Ok(None),
        raw => raw.parse().map(Some).map_err(|_| ()),
    }
}

/// Records `message` when a non-blank value doesn't parse or fails `check`.
pub(crate) fn check_optional<N: FromStr>(
    errors: &mut FieldErrors,
    key: &'static str,
    value: &str,
    check: impl Fn(&N) -> bool,
    message: &str,
) {
    match parse_optional::<N>(value) {
        Ok(Some(n)) if !check(&n) => errors.insert(key, message),
        Err(()) => errors.insert(key, message),
        _ => {}
    }
}

/// [`check_optional`] for decimals. `"inf"`, `"NaN"` and overflowing input
/// parse as `f64` but serialize as `null`, so they are rejected too.
pub(crate) fn check_decimal(
    errors: &mut FieldErrors,
    key: &'static str,
    value: &str,
    check: impl Fn(f64) -> bool,
    message: &str,
) {
    check_optional::<f64>(errors, key, value, |n| n.is_finite() && check(*n), message);
}

pub(crate) fn flag(value: &str) -> bool {
    value.trim() != "false"
}

// =========================================================
// Workflow
// =========================================================

#[derive(Debug, Clone)]
pub struct FormWorkflow<D> {
    mode: FormMode,
    draft: D,
    errors: FieldErrors,
    submit_error: Option<String>,
    submitting: bool,
    images: Vec<String>,
    attachments: Attachments,
}

impl<D: FormDraft> FormWorkflow<D> {
    pub fn create() -> Self {
        Self::with(FormMode::Create, D::blank(), Vec::new())
    }

    pub fn edit(target: &D::Target) -> Self {
        use fscape_admin_shared::Resource;
        Self::with(
            FormMode::Edit(target.id().clone()),
            D::from_resource(target),
            D::existing_images(target),
        )
    }

    /// Form matching an open create/edit dialog.
    pub fn for_dialog(dialog: &DialogState<D::Target>) -> Option<Self> {
        match dialog {
            DialogState::Creating => Some(Self::create()),
            DialogState::Editing(target) => Some(Self::edit(target)),
            _ => None,
        }
    }

    fn with(mode: FormMode, draft: D, images: Vec<String>) -> Self {
        Self {
            mode,
            draft,
            errors: FieldErrors::new(),
            submit_error: None,
            submitting: false,
            images,
            attachments: Attachments::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn value(&self, key: &str) -> &str {
        self.draft.get(key).unwrap_or_default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        D::FIELDS.iter().filter(|f| f.visible_in(&self.mode))
    }

    /// Updates one input and clears its error.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> bool {
        let known = self.draft.set(key, value.into());
        if known {
            self.errors.remove(key);
            self.submit_error = None;
        }
        known
    }

    // =========================================================
    // Images
    // =========================================================

    /// URLs already stored on the record plus uploaded ones.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn remove_image(&mut self, url: &str) {
        self.images.retain(|u| u != url);
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }

    /// Uploads pending attachments and keeps their URLs for the payload.
    pub async fn upload_attachments<U: ImageUploader>(&mut self, uploader: &U) -> Result<(), UploadError> {
        if !D::ACCEPTS_IMAGES || self.attachments.is_empty() {
            return Ok(());
        }
        let urls = uploader.upload_images(self.attachments.images()).await?;
        self.images.extend(urls);
        self.attachments.clear();
        Ok(())
    }

    // =========================================================
    // Submission
    // =========================================================

    /// Runs validation and records the field errors.
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate(&self.mode);
        self.errors.is_empty()
    }

    /// Validates and builds the payload. Nothing is sent on failure.
    pub fn prepare(&mut self) -> Result<D::Payload, SubmitError> {
        if !self.validate() {
            return Err(SubmitError::Invalid(self.errors.clone()));
        }
        self.submit_error = None;
        self.submitting = true;
        Ok(self.draft.to_payload(self.images.clone()))
    }

    /// Records the outcome of the write started after [`Self::prepare`].
    pub fn finish(&mut self, outcome: Result<(), ResourceError>) -> Result<(), SubmitError> {
        self.submitting = false;
        outcome.map_err(|e| {
            self.submit_error = Some(e.to_string());
            SubmitError::Remote(e)
        })
    }

    /// Writes through the list controller, which refetches on success.
    pub async fn submit<H: HttpTransport>(
        &mut self,
        controller: &mut ListController<D::Target>,
        client: &ApiClient<H>,
    ) -> Result<(), SubmitError> {
        let payload = self.prepare()?;
        let outcome = match &self.mode {
            FormMode::Create => controller.create(client, &payload).await,
            FormMode::Edit(id) => controller.update(client, id, &payload).await,
        };
        self.finish(outcome)
    }

    /// Writes directly; used by the standalone create pages.
    pub async fn save<H: HttpTransport>(&mut self, client: &ApiClient<H>) -> Result<(), SubmitError> {
        let payload = self.prepare()?;
        let outcome = match &self.mode {
            FormMode::Create => client.create::<D::Target, _>(&payload).await.map(|_| ()),
            FormMode::Edit(id) => client.update::<D::Target, _>(id, &payload).await.map(|_| ()),
        };
        self.finish(outcome)
    }

    /// Validates, uploads attachments, then saves. An uploader that does not
    /// support uploads leaves the record without the new images.
    pub async fn save_with_uploads<H: HttpTransport, U: ImageUploader>(
        &mut self,
        client: &ApiClient<H>,
        uploader: &U,
    ) -> Result<(), SubmitError> {
        if !self.validate() {
            return Err(SubmitError::Invalid(self.errors.clone()));
        }
        match self.upload_attachments(uploader).await {
            Ok(()) => {}
            Err(UploadError::Unsupported) => {
                warn!(pending = self.attachments.len(), "image upload unavailable, saving without new images");
            }
            Err(e) => {
                self.submit_error = Some(e.to_string());
                return Err(e.into());
            }
        }
        self.save(client).await
    }
}

#[cfg(test)]
mod tests;
