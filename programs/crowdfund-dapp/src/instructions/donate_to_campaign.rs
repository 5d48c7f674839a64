use crate::errors::WriteError;
use crate::instructions::{submit, LedgerInstruction, WriteOutcome};
use crate::ledger::Wallet;
use crate::utils::parse_display_amount;

/// Donor contributes `amount` (display units) to campaign `id`.
///
/// The ledger appends the donor and amount to the campaign and bumps
/// `amount_collected`; the client only checks the amount is positive.
pub fn donate_to_campaign<W: Wallet + ?Sized>(
    wallet: &W,
    id: u64,
    amount: &str,
    decimals: u8,
) -> std::result::Result<WriteOutcome, WriteError> {
    let amount = parse_display_amount(amount, decimals)?;
    submit(wallet, LedgerInstruction::DonateToCampaign { id, amount })
}
