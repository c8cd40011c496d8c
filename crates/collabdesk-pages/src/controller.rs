use collabdesk_core::{
    Entity, EntityId, EntityService, Searchable, ServiceError, Validate, ValidationErrors,
};

use crate::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Loaded,
    Submitting,
}

/// The dialog currently shown over the list. An open dialog exclusively owns
/// the selected record.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<E> {
    Closed,
    Create,
    Edit(E),
    ConfirmDelete(E),
}

impl<E> Modal<E> {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&E> {
        match self {
            Self::Edit(record) | Self::ConfirmDelete(record) => Some(record),
            Self::Closed | Self::Create => None,
        }
    }
}

/// CRUD screen state for one entity kind over service `S`.
pub struct PageController<E: Entity, S> {
    service: S,
    items: Vec<E>,
    state: PageState,
    modal: Modal<E>,
    search: String,
    field_errors: ValidationErrors,
    banner: Option<String>,
}

impl<E, S> std::fmt::Debug for PageController<E, S>
where
    E: Entity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("kind", &E::KIND)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("modal", &self.modal)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl<E, S> PageController<E, S>
where
    E: Entity,
    S: EntityService<E>,
{
    /// A controller that has not loaded anything yet.
    pub fn new(service: S) -> Self {
        Self {
            service,
            items: Vec::new(),
            state: PageState::Loading,
            modal: Modal::Closed,
            search: String::new(),
            field_errors: ValidationErrors::new(),
            banner: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn modal(&self) -> &Modal<E> {
        &self.modal
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Loads the list. On failure the previous list is kept and the error
    /// is shown in the banner.
    pub async fn mount(&mut self) {
        self.state = PageState::Loading;
        let result = self.service.list().await;
        self.finish_load(result);
    }

    pub(crate) fn begin_load(&mut self) {
        self.state = PageState::Loading;
    }

    pub(crate) fn finish_load(&mut self, result: Result<Vec<E>, ServiceError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.banner = None;
            }
            Err(e) => self.report(&e, "load"),
        }
        self.state = PageState::Loaded;
    }

    /// # Errors
    ///
    /// [`PageError::ModalOpen`] if another dialog is showing.
    pub fn open_create(&mut self) -> Result<(), PageError> {
        self.open(Modal::Create)
    }

    /// Opens the edit dialog for a record in the loaded list.
    ///
    /// # Errors
    ///
    /// [`PageError::ModalOpen`] if another dialog is showing, or
    /// [`PageError::NotLoaded`] if `id` is not in the list.
    pub fn open_edit(&mut self, id: EntityId) -> Result<(), PageError> {
        let record = self.find(id)?;
        self.open(Modal::Edit(record))
    }

    /// # Errors
    ///
    /// Same as [`open_edit`](Self::open_edit).
    pub fn open_delete(&mut self, id: EntityId) -> Result<(), PageError> {
        let record = self.find(id)?;
        self.open(Modal::ConfirmDelete(record))
    }

    /// The edit dialog's pre-filled form.
    pub fn edit_form(&self) -> Option<E::New> {
        match &self.modal {
            Modal::Edit(record) => Some(record.to_new()),
            _ => None,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.field_errors = ValidationErrors::new();
    }

    /// Submits the open create or edit dialog.
    ///
    /// The form is validated first; failures land in [`field_errors`] and no
    /// call is made. On success the list is reloaded and the dialog closes.
    /// On a service failure the dialog stays open and the banner is set.
    ///
    /// [`field_errors`]: Self::field_errors
    ///
    /// # Errors
    ///
    /// [`PageError::NoDialog`] when neither dialog is open,
    /// [`PageError::Invalid`] on validation failure, or
    /// [`PageError::Service`] when the call fails.
    pub async fn submit(&mut self, form: E::New) -> Result<E, PageError> {
        let target = match &self.modal {
            Modal::Create => None,
            Modal::Edit(record) => Some(record.id()),
            Modal::Closed | Modal::ConfirmDelete(_) => return Err(PageError::NoDialog("form")),
        };

        if let Err(errors) = form.validate() {
            self.field_errors = errors.clone();
            return Err(PageError::Invalid(errors));
        }
        self.field_errors = ValidationErrors::new();

        self.state = PageState::Submitting;
        let result = match target {
            None => self.service.add(form).await,
            Some(id) => self.service.update(id, E::Patch::from(form)).await,
        };

        match result {
            Ok(record) => {
                tracing::info!(kind = %E::KIND, id = record.id(), "record saved");
                self.complete().await;
                Ok(record)
            }
            Err(e) => {
                if let ServiceError::Validation(ref errors) = e {
                    self.field_errors = errors.clone();
                }
                self.report(&e, "save");
                self.state = PageState::Loaded;
                Err(e.into())
            }
        }
    }

    /// Deletes the record in the open confirmation dialog.
    ///
    /// # Errors
    ///
    /// [`PageError::NoDialog`] when no confirmation is showing, or
    /// [`PageError::Service`] when the call fails (dialog stays open).
    pub async fn confirm_delete(&mut self) -> Result<(), PageError> {
        let Modal::ConfirmDelete(record) = &self.modal else {
            return Err(PageError::NoDialog("delete"));
        };
        let id = record.id();

        self.state = PageState::Submitting;
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!(kind = %E::KIND, id, "record deleted");
                self.complete().await;
                Ok(())
            }
            Err(e) => {
                self.report(&e, "delete");
                self.state = PageState::Loaded;
                Err(e.into())
            }
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Re-lists after a successful mutation and closes the dialog.
    async fn complete(&mut self) {
        self.close_modal();
        self.banner = None;
        let result = self.service.list().await;
        self.finish_load(result);
    }

    fn open(&mut self, modal: Modal<E>) -> Result<(), PageError> {
        if self.modal.is_open() {
            return Err(PageError::ModalOpen);
        }
        self.modal = modal;
        self.field_errors = ValidationErrors::new();
        Ok(())
    }

    fn find(&self, id: EntityId) -> Result<E, PageError> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or(PageError::NotLoaded { kind: E::KIND, id })
    }

    fn report(&mut self, error: &ServiceError, action: &str) {
        tracing::error!(kind = %E::KIND, action, error = %error, "page operation failed");
        self.banner = Some(format!("Failed to {action} {}: {error}", E::KIND));
    }
}

impl<E, S> PageController<E, S>
where
    E: Entity + Searchable,
    S: EntityService<E>,
{
    /// Loaded records matching the search term, in list order.
    pub fn visible(&self) -> Vec<&E> {
        collabdesk_core::filter(&self.items, &self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_selection() {
        let closed: Modal<u8> = Modal::Closed;
        assert!(!closed.is_open());
        assert!(closed.selected().is_none());
        assert!(Modal::<u8>::Create.is_open());
        assert_eq!(Modal::Edit(3u8).selected(), Some(&3));
        assert_eq!(Modal::ConfirmDelete(4u8).selected(), Some(&4));
    }
}
