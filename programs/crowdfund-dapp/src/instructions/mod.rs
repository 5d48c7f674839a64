use anchor_lang::prelude::*;

use crate::errors::{WalletError, WriteError};
use crate::ledger::Wallet;

pub use create_campaign::*;
pub mod create_campaign;

pub use donate_to_campaign::*;
pub mod donate_to_campaign;

pub use withdraw_funds::*;
pub mod withdraw_funds;

/// Instruction data sent to the crowdfunding program. Amounts are base units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum LedgerInstruction {
    CreateCampaign {
        title: String,
        description: String,
        image_url: String,
        target: u128,
        deadline: i64,
    },
    DonateToCampaign {
        id: u64,
        amount: u128,
    },
    WithdrawFunds {
        id: u64,
    },
}

/// Result of handing an instruction to the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Signed and submitted; carries the transaction signature.
    Submitted(String),
    /// The user declined to sign. Not an error, nothing to report.
    Rejected,
}

pub(crate) fn submit<W: Wallet + ?Sized>(
    wallet: &W,
    instruction: LedgerInstruction,
) -> std::result::Result<WriteOutcome, WriteError> {
    match wallet.send(&instruction) {
        Ok(signature) => Ok(WriteOutcome::Submitted(signature)),
        Err(WalletError::UserRejected) => {
            msg!("user rejected {:?}", instruction);
            Ok(WriteOutcome::Rejected)
        }
        Err(err) => Err(WriteError::Wallet(err)),
    }
}
