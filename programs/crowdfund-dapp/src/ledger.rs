//! Capabilities the client is handed instead of reaching for a global wallet.

use anchor_lang::prelude::*;

use crate::errors::{ReadResult, WalletError};
use crate::instructions::LedgerInstruction;

/// Read surface of the crowdfunding program.
///
/// Record payloads are borsh-encoded account data; decoding happens on the
/// client so layout mismatches show up as decode failures rather than transport ones.
pub trait LedgerReader {
    /// Identifier of the network this reader is connected to.
    fn network_id(&self) -> ReadResult<String>;

    /// Cheap liveness probe.
    fn head_slot(&self) -> ReadResult<u64>;

    fn campaign_count(&self) -> ReadResult<u64>;

    /// One encoded `RawCampaign`.
    fn campaign(&self, id: u64) -> ReadResult<Vec<u8>>;

    /// Encoded `Vec<RawCampaign>`.
    fn all_campaigns(&self) -> ReadResult<Vec<u8>>;

    /// Encoded `RawDonations` for one campaign.
    fn donators(&self, id: u64) -> ReadResult<Vec<u8>>;

    fn platform_fee_percent(&self) -> ReadResult<u8>;
}

impl<T: LedgerReader + ?Sized> LedgerReader for &T {
    fn network_id(&self) -> ReadResult<String> {
        (**self).network_id()
    }

    fn head_slot(&self) -> ReadResult<u64> {
        (**self).head_slot()
    }

    fn campaign_count(&self) -> ReadResult<u64> {
        (**self).campaign_count()
    }

    fn campaign(&self, id: u64) -> ReadResult<Vec<u8>> {
        (**self).campaign(id)
    }

    fn all_campaigns(&self) -> ReadResult<Vec<u8>> {
        (**self).all_campaigns()
    }

    fn donators(&self, id: u64) -> ReadResult<Vec<u8>> {
        (**self).donators(id)
    }

    fn platform_fee_percent(&self) -> ReadResult<u8> {
        (**self).platform_fee_percent()
    }
}

impl<T: LedgerReader + ?Sized> LedgerReader for Box<T> {
    fn network_id(&self) -> ReadResult<String> {
        (**self).network_id()
    }

    fn head_slot(&self) -> ReadResult<u64> {
        (**self).head_slot()
    }

    fn campaign_count(&self) -> ReadResult<u64> {
        (**self).campaign_count()
    }

    fn campaign(&self, id: u64) -> ReadResult<Vec<u8>> {
        (**self).campaign(id)
    }

    fn all_campaigns(&self) -> ReadResult<Vec<u8>> {
        (**self).all_campaigns()
    }

    fn donators(&self, id: u64) -> ReadResult<Vec<u8>> {
        (**self).donators(id)
    }

    fn platform_fee_percent(&self) -> ReadResult<u8> {
        (**self).platform_fee_percent()
    }
}

/// Opens a reader for a public endpoint URI.
pub trait Connector {
    type Reader: LedgerReader;

    fn connect(&self, endpoint: &str) -> ReadResult<Self::Reader>;
}

/// A connected wallet: reads through its own provider and signs writes.
pub trait Wallet: LedgerReader {
    /// Account currently selected in the wallet.
    fn account(&self) -> Pubkey;

    /// Sign and submit, returning the transaction signature.
    fn send(&self, instruction: &LedgerInstruction) -> std::result::Result<String, WalletError>;
}
