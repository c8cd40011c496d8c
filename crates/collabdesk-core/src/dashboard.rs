//! Dashboard widgets derived from the loaded collections.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::brands::Brand;
use crate::campaigns::{resolve_campaigns, Campaign, CampaignStatus, PaymentStatus, ResolvedCampaign};
use crate::entity::EntityId;
use crate::influencers::Influencer;

/// Recent posts shown on the dashboard.
pub const RECENT_POSTS_LIMIT: usize = 5;

labelled_enum! {
    pub enum PaymentUrgency {
        Overdue => "overdue",
        Due => "due",
        Upcoming => "upcoming",
    }
}

labelled_enum! {
    pub enum DraftPriority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

labelled_enum! {
    pub enum PostState {
        Live => "live",
        Scheduled => "scheduled",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Draft and scheduled campaigns: not yet live.
    pub upcoming_campaigns: usize,
    pub live_campaigns: usize,
    /// Sum of `paidAmount` over campaigns whose payment status is paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    pub campaign_id: EntityId,
    pub influencer_name: String,
    pub brand_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: PaymentUrgency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDraft {
    pub campaign_id: EntityId,
    pub influencer_name: String,
    pub brand_name: String,
    pub priority: DraftPriority,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPost {
    pub campaign_id: EntityId,
    pub influencer_name: String,
    pub brand_name: String,
    pub status: PostState,
    pub post_link: Option<String>,
    pub shoot_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub pending_payments: Vec<PendingPayment>,
    pub pending_drafts: Vec<PendingDraft>,
    pub recent_posts: Vec<RecentPost>,
}

#[must_use]
pub fn stats(campaigns: &[Campaign]) -> DashboardStats {
    let upcoming_campaigns = campaigns
        .iter()
        .filter(|c| matches!(c.status, CampaignStatus::Draft | CampaignStatus::Scheduled))
        .count();
    let live_campaigns = campaigns
        .iter()
        .filter(|c| c.status == CampaignStatus::Posted)
        .count();
    let total_amount_spent = campaigns
        .iter()
        .filter(|c| c.payment_status == PaymentStatus::Paid)
        .map(|c| c.paid_amount)
        .sum();

    DashboardStats {
        upcoming_campaigns,
        live_campaigns,
        total_amount_spent,
    }
}

/// Unpaid campaigns, most urgent first. Cancelled campaigns are skipped.
#[must_use]
pub fn pending_payments(resolved: &[ResolvedCampaign], today: NaiveDate) -> Vec<PendingPayment> {
    let mut rows: Vec<(NaiveDate, PendingPayment)> = resolved
        .iter()
        .filter(|r| r.campaign.status != CampaignStatus::Cancelled)
        .filter_map(|r| {
            let c = &r.campaign;
            let status = match c.payment_status {
                PaymentStatus::Paid => return None,
                PaymentStatus::Overdue => PaymentUrgency::Overdue,
                PaymentStatus::Pending if c.shoot_date <= today => PaymentUrgency::Due,
                PaymentStatus::Pending => PaymentUrgency::Upcoming,
            };
            Some((
                c.shoot_date,
                PendingPayment {
                    campaign_id: c.id,
                    influencer_name: r.influencer_name.clone(),
                    brand_name: r.brand_name.clone(),
                    amount: c.outstanding(),
                    status,
                },
            ))
        })
        .collect();

    rows.sort_by(|(a_date, a), (b_date, b)| a.status.cmp(&b.status).then(a_date.cmp(b_date)));
    rows.into_iter().map(|(_, p)| p).collect()
}

/// Draft campaigns ordered by due date; priority tightens as the shoot
/// date approaches.
#[must_use]
pub fn pending_drafts(resolved: &[ResolvedCampaign], today: NaiveDate) -> Vec<PendingDraft> {
    let mut drafts: Vec<PendingDraft> = resolved
        .iter()
        .filter(|r| r.campaign.status == CampaignStatus::Draft)
        .map(|r| {
            let days_left = (r.campaign.shoot_date - today).num_days();
            let priority = match days_left {
                ..=3 => DraftPriority::High,
                4..=7 => DraftPriority::Medium,
                _ => DraftPriority::Low,
            };
            PendingDraft {
                campaign_id: r.campaign.id,
                influencer_name: r.influencer_name.clone(),
                brand_name: r.brand_name.clone(),
                priority,
                due_date: r.campaign.shoot_date,
            }
        })
        .collect();

    drafts.sort_by_key(|d| d.due_date);
    drafts
}

/// Posted and scheduled campaigns, latest shoot date first.
#[must_use]
pub fn recent_posts(resolved: &[ResolvedCampaign], limit: usize) -> Vec<RecentPost> {
    let mut posts: Vec<RecentPost> = resolved
        .iter()
        .filter_map(|r| {
            let status = match r.campaign.status {
                CampaignStatus::Posted => PostState::Live,
                CampaignStatus::Scheduled => PostState::Scheduled,
                CampaignStatus::Draft | CampaignStatus::Cancelled => return None,
            };
            Some(RecentPost {
                campaign_id: r.campaign.id,
                influencer_name: r.influencer_name.clone(),
                brand_name: r.brand_name.clone(),
                status,
                post_link: r.campaign.post_link.clone(),
                shoot_date: r.campaign.shoot_date,
            })
        })
        .collect();

    posts.sort_by(|a, b| b.shoot_date.cmp(&a.shoot_date));
    posts.truncate(limit);
    posts
}

#[must_use]
pub fn summarize(
    campaigns: &[Campaign],
    influencers: &[Influencer],
    brands: &[Brand],
    today: NaiveDate,
) -> DashboardSummary {
    let resolved = resolve_campaigns(campaigns, influencers, brands);
    DashboardSummary {
        stats: stats(campaigns),
        pending_payments: pending_payments(&resolved, today),
        pending_drafts: pending_drafts(&resolved, today),
        recent_posts: recent_posts(&resolved, RECENT_POSTS_LIMIT),
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
