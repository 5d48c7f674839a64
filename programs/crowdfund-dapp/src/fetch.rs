use anchor_lang::prelude::*;

use crate::config::ClientConfig;
use crate::endpoint::select_provider;
use crate::errors::{CrowdfundError, ReadError, ReadResult};
use crate::ledger::{Connector, LedgerReader};
use crate::normalize::{normalize_amount, normalize_campaign};
use crate::retry::{with_retry, Sleeper};
use crate::states::{pair_donations, Campaign, Donation, RawCampaign, RawDonations};

/// Upper bound on ids visited by the per-record path.
pub const MAX_CAMPAIGN_SCAN: u64 = 10_000;

pub fn decode_campaigns(data: &[u8]) -> ReadResult<Vec<RawCampaign>> {
    Vec::<RawCampaign>::try_from_slice(data).map_err(|err| ReadError::decode(err.to_string()))
}

pub fn decode_campaign(data: &[u8]) -> ReadResult<RawCampaign> {
    RawCampaign::try_from_slice(data).map_err(|err| ReadError::decode(err.to_string()))
}

fn read_all<R: LedgerReader + ?Sized>(reader: &R) -> ReadResult<Vec<RawCampaign>> {
    let data = reader.all_campaigns()?;
    decode_campaigns(&data)
}

/// Degraded path: read the count, then each record on its own.
fn read_one_by_one<R: LedgerReader + ?Sized>(reader: &R) -> Result<Vec<RawCampaign>> {
    let count = reader.campaign_count().map_err(|err| {
        msg!("campaign count read failed: {}", err);
        CrowdfundError::FetchFailed
    })?;
    if count > MAX_CAMPAIGN_SCAN {
        msg!(
            "ledger reports {} campaigns, reading the first {}",
            count,
            MAX_CAMPAIGN_SCAN
        );
    }

    let mut campaigns = Vec::new();
    for id in 0..count.min(MAX_CAMPAIGN_SCAN) {
        match reader.campaign(id).and_then(|data| decode_campaign(&data)) {
            Ok(raw) => campaigns.push(raw),
            Err(err) => msg!("skipping campaign {}: {}", id, err),
        }
    }
    Ok(campaigns)
}

fn normalize_all(raws: &[RawCampaign], decimals: u8) -> Vec<Campaign> {
    raws.iter()
        .filter_map(|raw| match normalize_campaign(raw, decimals) {
            Ok(campaign) => Some(campaign),
            Err(err) => {
                msg!("dropping campaign {}: {}", raw.id, err);
                None
            }
        })
        .collect()
}

/// Read and normalize every campaign through an already selected reader.
///
/// Any bulk-read failure switches to per-record reads; records that fail
/// there, or during normalization, are left out.
pub fn load_campaigns<R: LedgerReader + ?Sized>(reader: &R, decimals: u8) -> Result<Vec<Campaign>> {
    let raws = match read_all(reader) {
        Ok(raws) => raws,
        Err(err) => {
            msg!(
                "bulk campaign read failed ({:?}): {}; reading one by one",
                err.kind,
                err.message
            );
            read_one_by_one(reader)?
        }
    };
    Ok(normalize_all(&raws, decimals))
}

/// Resolve a provider, then load every campaign. An empty list is a valid result.
pub fn fetch_campaigns<'a, C>(
    wallet: Option<&'a dyn LedgerReader>,
    config: &ClientConfig,
    connector: &C,
) -> Result<Vec<Campaign>>
where
    C: Connector,
    C::Reader: 'a,
{
    let reader = select_provider(wallet, &config.network_id, &config.rpc_endpoints, connector)
        .map_err(|err| {
            msg!("campaign fetch aborted: {}", err);
            CrowdfundError::FetchFailed
        })?;
    load_campaigns(&*reader, config.decimals)
}

/// [`fetch_campaigns`] with the configured linear-backoff retry.
pub fn fetch_campaigns_with_retry<'a, C, S>(
    wallet: Option<&'a dyn LedgerReader>,
    config: &ClientConfig,
    connector: &C,
    sleeper: &S,
) -> Result<Vec<Campaign>>
where
    C: Connector,
    C::Reader: 'a,
    S: Sleeper + ?Sized,
{
    with_retry(config.max_attempts, config.base_delay(), sleeper, |_attempt| {
        fetch_campaigns(wallet, config, connector)
    })
}

pub fn fetch_campaign<R: LedgerReader + ?Sized>(
    reader: &R,
    id: u64,
    decimals: u8,
) -> Result<Campaign> {
    let raw = reader
        .campaign(id)
        .and_then(|data| decode_campaign(&data))
        .map_err(|err| {
            msg!("campaign {} read failed: {}", id, err);
            CrowdfundError::FetchFailed
        })?;
    normalize_campaign(&raw, decimals)
}

/// Donators paired with their display amounts, oldest first.
pub fn fetch_donations<R: LedgerReader + ?Sized>(
    reader: &R,
    id: u64,
    decimals: u8,
) -> Result<Vec<Donation>> {
    let raw = reader
        .donators(id)
        .and_then(|data| {
            RawDonations::try_from_slice(&data).map_err(|err| ReadError::decode(err.to_string()))
        })
        .map_err(|err| {
            msg!("donations for campaign {} read failed: {}", id, err);
            CrowdfundError::FetchFailed
        })?;

    let amounts: Vec<String> = raw
        .donations
        .iter()
        .map(|amount| normalize_amount(Some(amount), decimals))
        .collect();
    Ok(pair_donations(&raw.donators, &amounts))
}

/// Platform fee the ledger deducts on withdrawal, in percent.
pub fn fetch_platform_fee<R: LedgerReader + ?Sized>(reader: &R) -> Result<u8> {
    let fee = reader.platform_fee_percent().map_err(|err| {
        msg!("platform fee read failed: {}", err);
        CrowdfundError::FetchFailed
    })?;
    require!(fee <= 100, CrowdfundError::InvalidFeePercent);
    Ok(fee)
}

pub fn campaigns_by_owner(campaigns: &[Campaign], owner: &Pubkey) -> Vec<Campaign> {
    campaigns
        .iter()
        .filter(|campaign| campaign.is_owned_by(owner))
        .cloned()
        .collect()
}

/// Case-insensitive match on title and description.
pub fn search_campaigns(campaigns: &[Campaign], query: &str) -> Vec<Campaign> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return campaigns.to_vec();
    }
    campaigns
        .iter()
        .filter(|campaign| {
            campaign.title.to_lowercase().contains(&query)
                || campaign.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
