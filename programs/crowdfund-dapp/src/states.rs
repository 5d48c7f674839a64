use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{compute_progress, days_remaining, derive_status};

// ---------------------------
// Ledger account layout
// ---------------------------

/// Campaign account as the ledger program stores it.
///
/// Amount fields are strings because deployments disagree on their encoding:
/// base-unit digits, display decimals and `0x` hex all occur in the wild.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCampaign {
    pub id: u64,
    pub owner: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub target: Option<String>,
    pub deadline: i64, // unix seconds
    pub amount_collected: Option<String>,
    pub withdrawn: bool,
    pub donators: Vec<String>, // append-only
    pub donations: Vec<String>, // parallel to `donators`
}

/// Donator list and amounts returned by the ledger for one campaign.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDonations {
    pub donators: Vec<String>,
    pub donations: Vec<String>,
}

// ---------------------------
// Client-side records
// ---------------------------

/// Campaign with every amount rendered as a display decimal string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Campaign {
    pub id: u64,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub target: String,
    pub deadline: i64,
    pub amount_collected: String,
    pub withdrawn: bool,
    pub donators: Vec<String>,
    pub donations: Vec<String>,
}

impl Campaign {
    pub const MAX_TITLE_LEN: usize = 64;

    pub fn status(&self, now: i64) -> CampaignStatus {
        derive_status(
            self.deadline,
            self.withdrawn,
            &self.target,
            &self.amount_collected,
            now,
        )
    }

    pub fn progress(&self) -> Decimal {
        compute_progress(&self.amount_collected, &self.target)
    }

    pub fn days_left(&self, now: i64) -> u64 {
        days_remaining(self.deadline, now)
    }

    /// Pairs `donators[i]` with `donations[i]`, stopping at the shorter list.
    pub fn donation_list(&self) -> Vec<Donation> {
        pair_donations(&self.donators, &self.donations)
    }

    pub fn is_owned_by(&self, account: &Pubkey) -> bool {
        self.owner == account.to_string()
    }

    pub fn view(&self, now: i64) -> CampaignView {
        CampaignView {
            status: self.status(now),
            progress: self.progress(),
            days_left: self.days_left(now),
            campaign: self.clone(),
        }
    }
}

/// Lifecycle status, derived locally and never stored.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Completed,
    Expired,
    Withdrawn,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Expired => "expired",
            CampaignStatus::Withdrawn => "withdrawn",
        }
    }

    /// Donations are only accepted while the campaign is running.
    pub fn accepts_donations(&self) -> bool {
        matches!(self, CampaignStatus::Active | CampaignStatus::Completed)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Donation {
    pub donator: String,
    pub amount: String,
}

/// What a campaign card shows.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CampaignView {
    pub campaign: Campaign,
    pub status: CampaignStatus,
    pub progress: Decimal,
    pub days_left: u64,
}

pub(crate) fn pair_donations(donators: &[String], donations: &[String]) -> Vec<Donation> {
    if donators.len() != donations.len() {
        msg!(
            "donator/donation length mismatch: {} vs {}",
            donators.len(),
            donations.len()
        );
    }
    donators
        .iter()
        .zip(donations.iter())
        .map(|(donator, amount)| Donation {
            donator: donator.clone(),
            amount: amount.clone(),
        })
        .collect()
}
