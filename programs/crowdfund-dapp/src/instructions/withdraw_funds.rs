use anchor_lang::prelude::*;

use crate::errors::{CrowdfundError, WriteError};
use crate::instructions::{submit, LedgerInstruction, WriteOutcome};
use crate::ledger::Wallet;
use crate::states::Campaign;

fn check_withdrawal(campaign: &Campaign, account: &Pubkey) -> Result<()> {
    // Campaign must belong to the connected account
    require!(campaign.is_owned_by(account), CrowdfundError::NotCampaignOwner);
    require!(!campaign.withdrawn, CrowdfundError::AlreadyWithdrawn);
    Ok(())
}

/// Owner withdraws the collected funds.
///
/// - The ledger transfers `amount_collected` minus the platform fee to the owner
///   and marks the campaign withdrawn for good.
/// - Use `utils::withdrawal_breakdown` with `fetch::fetch_platform_fee` to preview the payout.
pub fn withdraw_funds<W: Wallet + ?Sized>(
    wallet: &W,
    campaign: &Campaign,
) -> std::result::Result<WriteOutcome, WriteError> {
    check_withdrawal(campaign, &wallet.account())?;
    submit(wallet, LedgerInstruction::WithdrawFunds { id: campaign.id })
}
