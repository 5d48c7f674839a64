//! Client core of the crowdfunding DApp.
//!
//! The ledger program owns every campaign, balance and fee. This crate reads
//! campaigns through a wallet or a public endpoint, renders them for display,
//! and hands create/donate/withdraw instructions to the connected wallet.

use anchor_lang::prelude::*;

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod fetch;
pub mod instructions;
pub mod ledger;
pub mod normalize;
pub mod retry;
pub mod sequence;
pub mod states;
pub mod utils;


pub use config::ClientConfig;
pub use errors::{CrowdfundError, ReadError, ReadErrorKind, WalletError, WriteError};
pub use fetch::{fetch_campaigns, fetch_campaigns_with_retry};
pub use instructions::{LedgerInstruction, WriteOutcome};
pub use ledger::{Connector, LedgerReader, Wallet};
pub use states::{Campaign, CampaignStatus, CampaignView, Donation, RawCampaign};

declare_id!("2gnAooBs6B8YG4HDq2WSVLzGGvuqd3PmDR14xjnHQahe");
