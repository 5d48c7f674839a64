use anchor_lang::prelude::*;
use chrono::{Local, TimeZone};

use crate::errors::{CrowdfundError, WriteError};
use crate::instructions::{submit, LedgerInstruction, WriteOutcome};
use crate::ledger::Wallet;
use crate::states::Campaign;
use crate::utils::{parse_deadline_input_in, parse_display_amount};

/// The "new campaign" form as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Display units, e.g. `"2.5"`.
    pub target: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM`.
    pub deadline: String,
}

impl CampaignForm {
    pub fn validate(&self, decimals: u8, now: i64) -> Result<LedgerInstruction> {
        self.validate_in(&Local, decimals, now)
    }

    /// Checks every field without touching the network.
    pub fn validate_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
        decimals: u8,
        now: i64,
    ) -> Result<LedgerInstruction> {
        let title = self.title.trim();
        let description = self.description.trim();
        let image_url = self.image_url.trim();

        require!(!title.is_empty(), CrowdfundError::MissingField);
        require!(!description.is_empty(), CrowdfundError::MissingField);
        require!(!image_url.is_empty(), CrowdfundError::MissingField);

        // Enforce a maximum length for the title (in bytes)
        require!(
            title.len() <= Campaign::MAX_TITLE_LEN,
            CrowdfundError::TitleTooLong
        );

        let target = parse_display_amount(&self.target, decimals)?;
        let deadline = parse_deadline_input_in(&self.deadline, tz, now)?;

        Ok(LedgerInstruction::CreateCampaign {
            title: title.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            target,
            deadline,
        })
    }
}

/// Creator opens a new campaign.
///
/// - The form is validated locally first; a bad form never reaches the wallet.
/// - The ledger assigns the campaign id; the client learns it on the next list fetch.
/// - A declined signature yields `WriteOutcome::Rejected`.
pub fn create_campaign<W: Wallet + ?Sized>(
    wallet: &W,
    form: &CampaignForm,
    decimals: u8,
    now: i64,
) -> std::result::Result<WriteOutcome, WriteError> {
    let instruction = form.validate(decimals, now)?;
    submit(wallet, instruction)
}
