use collabdesk_core::{
    resolve_campaigns, Brand, Campaign, EntityId, EntityService, Influencer, NewCampaign,
    ResolvedCampaign, Searchable, ServiceError,
};

use crate::{Modal, PageController, PageError, PageState};

/// Campaign screen: the campaign controller plus the influencer and brand
/// lists its rows and form pickers are resolved against.
pub struct CampaignPage<S> {
    page: PageController<Campaign, S>,
    influencers: Vec<Influencer>,
    brands: Vec<Brand>,
}

impl<S> std::fmt::Debug for CampaignPage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignPage")
            .field("page", &self.page)
            .field("influencers", &self.influencers.len())
            .field("brands", &self.brands.len())
            .finish()
    }
}

impl<S> CampaignPage<S>
where
    S: EntityService<Campaign> + EntityService<Influencer> + EntityService<Brand>,
{
    pub fn new(service: S) -> Self {
        Self {
            page: PageController::new(service),
            influencers: Vec::new(),
            brands: Vec::new(),
        }
    }

    /// The underlying campaign controller, for dialog handling and state.
    pub fn page(&self) -> &PageController<Campaign, S> {
        &self.page
    }

    pub fn influencers(&self) -> &[Influencer] {
        &self.influencers
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Loads campaigns, influencers and brands concurrently. Any failure
    /// leaves all three lists as they were.
    pub async fn mount(&mut self) {
        self.page.begin_load();
        let service = self.page.service();
        let joined = futures::try_join!(
            EntityService::<Campaign>::list(service),
            EntityService::<Influencer>::list(service),
            EntityService::<Brand>::list(service),
        );

        let campaigns = joined.map(|(campaigns, influencers, brands)| {
            self.influencers = influencers;
            self.brands = brands;
            campaigns
        });
        self.page.finish_load(campaigns);
    }

    /// # Errors
    ///
    /// See [`PageController::open_create`].
    pub fn open_create(&mut self) -> Result<(), PageError> {
        self.page.open_create()
    }

    /// # Errors
    ///
    /// See [`PageController::open_edit`].
    pub fn open_edit(&mut self, id: EntityId) -> Result<(), PageError> {
        self.page.open_edit(id)
    }

    /// # Errors
    ///
    /// See [`PageController::open_delete`].
    pub fn open_delete(&mut self, id: EntityId) -> Result<(), PageError> {
        self.page.open_delete(id)
    }

    pub fn close_modal(&mut self) {
        self.page.close_modal();
    }

    pub fn modal(&self) -> &Modal<Campaign> {
        self.page.modal()
    }

    pub fn state(&self) -> PageState {
        self.page.state()
    }

    pub fn banner(&self) -> Option<&str> {
        self.page.banner()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.page.set_search(term);
    }

    /// Submits the open dialog, then reloads everything so new names show.
    ///
    /// # Errors
    ///
    /// See [`PageController::submit`].
    pub async fn submit(&mut self, form: NewCampaign) -> Result<Campaign, PageError> {
        let saved = self.page.submit(form).await?;
        self.reload_lookups().await;
        Ok(saved)
    }

    /// # Errors
    ///
    /// See [`PageController::confirm_delete`].
    pub async fn confirm_delete(&mut self) -> Result<(), PageError> {
        self.page.confirm_delete().await
    }

    /// Every loaded campaign with display names; missing references show as
    /// "Unknown".
    pub fn rows(&self) -> Vec<ResolvedCampaign> {
        resolve_campaigns(self.page.items(), &self.influencers, &self.brands)
    }

    /// Rows whose influencer or brand name matches the search term.
    pub fn visible(&self) -> Vec<ResolvedCampaign> {
        let term = self.page.search();
        self.rows()
            .into_iter()
            .filter(|row| row.matches(term))
            .collect()
    }

    async fn reload_lookups(&mut self) {
        let service = self.page.service();
        let joined: Result<_, ServiceError> = futures::try_join!(
            EntityService::<Influencer>::list(service),
            EntityService::<Brand>::list(service),
        );
        match joined {
            Ok((influencers, brands)) => {
                self.influencers = influencers;
                self.brands = brands;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to refresh campaign lookups");
            }
        }
    }
}
