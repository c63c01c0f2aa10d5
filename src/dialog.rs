//! Modal dialog state for one list page.
//!
//! Toggle and delete on the controller only accept the confirmation tokens
//! minted here.

use fscape_admin_shared::{Resource, ResourceId};

use crate::error::ResourceError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogState<T> {
    #[default]
    Closed,
    Creating,
    Editing(T),
    ConfirmingDelete(T),
    ConfirmingToggle(T),
}

/// Proof that the user confirmed deleting `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedDelete<T> {
    target: T,
}

impl<T: Resource> ConfirmedDelete<T> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn id(&self) -> &ResourceId {
        self.target.id()
    }
}

/// Proof that the user confirmed flipping `target`'s active flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedToggle<T> {
    target: T,
    next_active: bool,
}

impl<T: Resource> ConfirmedToggle<T> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn id(&self) -> &ResourceId {
        self.target.id()
    }

    /// Value the flag will be set to.
    pub fn next_active(&self) -> bool {
        self.next_active
    }
}

impl<T: Resource> DialogState<T> {
    pub fn open_create(&mut self) {
        *self = DialogState::Creating;
    }

    pub fn open_edit(&mut self, target: T) {
        *self = DialogState::Editing(target);
    }

    pub fn ask_delete(&mut self, target: T) {
        *self = DialogState::ConfirmingDelete(target);
    }

    /// Only resources with a binary active flag can be toggled.
    pub fn ask_toggle(&mut self, target: T) -> Result<(), ResourceError> {
        if target.active_flag().is_none() || !T::is_toggleable() {
            return Err(ResourceError::NotToggleable { resource: T::NAME });
        }
        *self = DialogState::ConfirmingToggle(target);
        Ok(())
    }

    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_form(&self) -> bool {
        matches!(self, DialogState::Creating | DialogState::Editing(_))
    }

    /// Record the dialog is about, if any.
    pub fn target(&self) -> Option<&T> {
        match self {
            DialogState::Editing(t) | DialogState::ConfirmingDelete(t) | DialogState::ConfirmingToggle(t) => {
                Some(t)
            }
            DialogState::Closed | DialogState::Creating => None,
        }
    }

    /// The dialog stays open until the caller closes it, so a failed
    /// request can be reported inside it.
    pub fn confirm_delete(&self) -> Option<ConfirmedDelete<T>> {
        match self {
            DialogState::ConfirmingDelete(target) => Some(ConfirmedDelete {
                target: target.clone(),
            }),
            _ => None,
        }
    }

    pub fn confirm_toggle(&self) -> Option<ConfirmedToggle<T>> {
        match self {
            DialogState::ConfirmingToggle(target) => {
                let current = target.active_flag()?;
                Some(ConfirmedToggle {
                    target: target.clone(),
                    next_active: !current,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fscape_admin_shared::{Building, Room};

    fn building(active: bool) -> Building {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": "FScape FPT", "is_active": active
        }))
        .unwrap()
    }

    #[test]
    fn only_one_dialog_at_a_time() {
        let mut dialog = DialogState::default();
        dialog.open_create();
        dialog.ask_delete(building(true));
        assert!(matches!(dialog, DialogState::ConfirmingDelete(_)));
        assert!(!dialog.is_form());
        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn confirmations_require_the_matching_dialog() {
        let mut dialog = DialogState::default();
        dialog.open_edit(building(true));
        assert!(dialog.confirm_delete().is_none());
        assert!(dialog.confirm_toggle().is_none());

        dialog.ask_delete(building(true));
        let token = dialog.confirm_delete().unwrap();
        assert_eq!(token.id().as_str(), "1");
        assert!(dialog.is_open());
    }

    #[test]
    fn toggle_token_carries_the_flipped_flag() {
        let mut dialog = DialogState::default();
        dialog.ask_toggle(building(true)).unwrap();
        assert!(!dialog.confirm_toggle().unwrap().next_active());

        dialog.ask_toggle(building(false)).unwrap();
        assert!(dialog.confirm_toggle().unwrap().next_active());
    }

    #[test]
    fn status_resources_have_no_toggle_dialog() {
        let room: Room = serde_json::from_value(serde_json::json!({"id": 2})).unwrap();
        let mut dialog = DialogState::default();
        assert!(dialog.ask_toggle(room).is_err());
        assert!(!dialog.is_open());
    }
}
