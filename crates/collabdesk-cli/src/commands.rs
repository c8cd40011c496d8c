//! Command runners. Each one drives a page controller through the same
//! mount / open / submit flow the screens use, and prints the result.

use anyhow::{bail, Context};
use collabdesk_core::{
    Brand, DashboardSummary, EntityId, Influencer, ResolvedCampaign, Searchable,
};
use collabdesk_pages::{CampaignPage, PageController};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::client::{to_pretty_json, ApiClient, Resource};
use crate::RecordAction;

/// Fixed-width table output for list commands.
pub(crate) trait Tabular {
    fn header() -> String;
    fn row(&self) -> String;
}

impl Tabular for Influencer {
    fn header() -> String {
        format!(
            "{:<6}{:<26}{:<12}{:>11}{:>8}  {:<14}STATUS",
            "ID", "NAME", "PLATFORM", "FOLLOWERS", "ENG%", "CATEGORY"
        )
    }

    fn row(&self) -> String {
        format!(
            "{:<6}{:<26}{:<12}{:>11}{:>8.1}  {:<14}{}",
            self.id,
            truncate(&self.name, 24),
            self.platform.as_str(),
            self.followers,
            self.engagement_rate,
            truncate(&self.category, 12),
            self.status
        )
    }
}

impl Tabular for Brand {
    fn header() -> String {
        format!("{:<6}{:<26}{:<22}{:<20}EMAIL", "ID", "NAME", "OWNER", "INDUSTRY")
    }

    fn row(&self) -> String {
        format!(
            "{:<6}{:<26}{:<22}{:<20}{}",
            self.id,
            truncate(&self.name, 24),
            truncate(&self.owner_name, 20),
            truncate(&self.industry, 18),
            self.email
        )
    }
}

impl Tabular for ResolvedCampaign {
    fn header() -> String {
        format!(
            "{:<6}{:<26}{:<20}{:<26}{:>10}  {:<12}{:<11}PAYMENT",
            "ID", "INFLUENCER", "BRAND", "CAMPAIGN", "AMOUNT", "SHOOT DATE", "STATUS"
        )
    }

    fn row(&self) -> String {
        let c = &self.campaign;
        format!(
            "{:<6}{:<26}{:<20}{:<26}{:>10}  {:<12}{:<11}{}",
            c.id,
            truncate(&self.influencer_name, 24),
            truncate(&self.brand_name, 18),
            truncate(&c.name, 24),
            c.amount.to_string(),
            c.shoot_date.to_string(),
            c.status.as_str(),
            c.payment_status
        )
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max - 3).collect::<String>())
    } else {
        value.to_string()
    }
}

fn print_table<T: Tabular>(rows: &[&T]) {
    if rows.is_empty() {
        println!("no records found");
        return;
    }
    println!("{}", T::header());
    for row in rows {
        println!("{}", row.row());
    }
}

fn parse_form<N: DeserializeOwned>(json: &str) -> anyhow::Result<N> {
    serde_json::from_str(json).context("--json is not a valid record")
}

/// Overlays the fields in `patch_json` onto `current`.
fn merged_form<N: Serialize + DeserializeOwned>(current: &N, patch_json: &str) -> anyhow::Result<N> {
    let patch: Value = serde_json::from_str(patch_json).context("--json is not valid JSON")?;
    let Value::Object(fields) = patch else {
        bail!("--json must be a JSON object");
    };
    let mut value = serde_json::to_value(current)?;
    let Value::Object(target) = &mut value else {
        bail!("record does not serialize to a JSON object");
    };
    target.extend(fields);
    serde_json::from_value(value).context("--json produces an invalid record")
}

fn ensure_loaded(banner: Option<&str>) -> anyhow::Result<()> {
    match banner {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

pub(crate) async fn run_records<E>(client: ApiClient, action: RecordAction) -> anyhow::Result<()>
where
    E: Resource + Searchable + Tabular,
{
    let mut page = PageController::<E, _>::new(client);

    match action {
        RecordAction::List { search } => {
            page.mount().await;
            ensure_loaded(page.banner())?;
            if let Some(term) = search {
                page.set_search(term);
            }
            print_table(&page.visible());
        }
        RecordAction::Add { json } => {
            let form = parse_form::<E::New>(&json)?;
            page.open_create()?;
            let saved = page.submit(form).await?;
            println!("created {} {}", E::KIND, saved.id());
            println!("{}", to_pretty_json(&saved));
        }
        RecordAction::Update { id, json } => {
            page.mount().await;
            ensure_loaded(page.banner())?;
            page.open_edit(id)?;
            let current = page
                .edit_form()
                .with_context(|| format!("{} {id} has no edit form", E::KIND))?;
            let form = merged_form(&current, &json)?;
            let saved = page.submit(form).await?;
            println!("updated {} {id}", E::KIND);
            println!("{}", to_pretty_json(&saved));
        }
        RecordAction::Delete { id } => {
            page.mount().await;
            ensure_loaded(page.banner())?;
            page.open_delete(id)?;
            page.confirm_delete().await?;
            println!("deleted {} {id}", E::KIND);
        }
    }
    Ok(())
}

pub(crate) async fn run_campaigns(client: ApiClient, action: RecordAction) -> anyhow::Result<()> {
    let mut page = CampaignPage::new(client);
    page.mount().await;
    ensure_loaded(page.banner())?;

    match action {
        RecordAction::List { search } => {
            if let Some(term) = search {
                page.set_search(term);
            }
            let rows = page.visible();
            print_table(&rows.iter().collect::<Vec<_>>());
        }
        RecordAction::Add { json } => {
            let form = parse_form(&json)?;
            page.open_create()?;
            let saved = page.submit(form).await?;
            print_campaign(&page, saved.id, "created");
        }
        RecordAction::Update { id, json } => {
            page.open_edit(id)?;
            let current = page
                .page()
                .edit_form()
                .with_context(|| format!("campaign {id} has no edit form"))?;
            let form = merged_form(&current, &json)?;
            let saved = page.submit(form).await?;
            print_campaign(&page, saved.id, "updated");
        }
        RecordAction::Delete { id } => {
            page.open_delete(id)?;
            page.confirm_delete().await?;
            println!("deleted campaign {id}");
        }
    }
    Ok(())
}

fn print_campaign(page: &CampaignPage<ApiClient>, id: EntityId, verb: &str) {
    println!("{verb} campaign {id}");
    if let Some(row) = page.rows().into_iter().find(|r| r.campaign.id == id) {
        println!("{}", to_pretty_json(&row));
    }
}

pub(crate) async fn run_dashboard(client: &ApiClient) -> anyhow::Result<()> {
    let summary = client.dashboard().await?;
    print_dashboard(&summary);
    Ok(())
}

fn print_dashboard(summary: &DashboardSummary) {
    let stats = &summary.stats;
    println!("Upcoming campaigns: {}", stats.upcoming_campaigns);
    println!("Live campaigns:     {}", stats.live_campaigns);
    println!("Total spent:        {}", stats.total_amount_spent);

    println!();
    println!("PENDING PAYMENTS");
    if summary.pending_payments.is_empty() {
        println!("  none");
    }
    for p in &summary.pending_payments {
        println!(
            "  {:<10}{:<26}{:<20}{:>10}",
            p.status.as_str(),
            truncate(&p.influencer_name, 24),
            truncate(&p.brand_name, 18),
            p.amount.to_string()
        );
    }

    println!();
    println!("PENDING DRAFTS");
    if summary.pending_drafts.is_empty() {
        println!("  none");
    }
    for d in &summary.pending_drafts {
        println!(
            "  {:<8}{:<26}{:<20}due {}",
            d.priority.as_str(),
            truncate(&d.influencer_name, 24),
            truncate(&d.brand_name, 18),
            d.due_date
        );
    }

    println!();
    println!("RECENT POSTS");
    if summary.recent_posts.is_empty() {
        println!("  none");
    }
    for r in &summary.recent_posts {
        println!(
            "  {:<11}{:<26}{:<20}{}  {}",
            r.status.as_str(),
            truncate(&r.influencer_name, 24),
            truncate(&r.brand_name, 18),
            r.shoot_date,
            r.post_link.as_deref().filter(|l| !l.trim().is_empty()).unwrap_or("-")
        );
    }
}

pub(crate) async fn run_notifications(client: &ApiClient, read_all: bool) -> anyhow::Result<()> {
    if read_all {
        let changed = client.mark_all_notifications_read().await?;
        println!("marked {changed} notification(s) read");
        return Ok(());
    }

    let feed = client.notifications().await?;
    println!("{} unread", feed.unread_count);
    for n in &feed.items {
        let marker = if n.read { ' ' } else { '*' };
        println!(
            "{marker} {:<5}{:<9}{}  {}: {}",
            n.id,
            n.kind.as_str(),
            n.created_at.format("%Y-%m-%d %H:%M"),
            n.title,
            n.message
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabdesk_core::NewBrand;

    fn nike() -> NewBrand {
        NewBrand {
            name: "Nike".to_string(),
            owner_name: "Phil Knight".to_string(),
            email: "phil@nike.com".to_string(),
            phone: "+1 555 0100".to_string(),
            industry: "Sportswear".to_string(),
            logo: "https://nike.com/logo.png".to_string(),
        }
    }

    #[test]
    fn merged_form_overwrites_only_given_fields() {
        let merged = merged_form(&nike(), r#"{"ownerName":"John Donahoe"}"#).expect("merge");
        assert_eq!(merged.owner_name, "John Donahoe");
        assert_eq!(merged.name, "Nike");
        assert_eq!(merged.logo, "https://nike.com/logo.png");
    }

    #[test]
    fn merged_form_rejects_non_objects() {
        assert!(merged_form(&nike(), "[1, 2]").is_err());
        assert!(merged_form(&nike(), "{not json").is_err());
    }

    #[test]
    fn merged_form_rejects_wrong_types() {
        let err = merged_form(&nike(), r#"{"name": 5}"#).unwrap_err();
        assert!(err.to_string().contains("invalid record"));
    }

    #[test]
    fn truncate_long_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long brand name", 10), "a very ...");
    }

    #[test]
    fn parse_form_reports_context() {
        let err = parse_form::<NewBrand>("{}").unwrap_err();
        assert!(err.to_string().contains("--json"));
    }
}
