use anchor_lang::prelude::*;

use crate::errors::CrowdfundError;
use crate::ledger::{Connector, LedgerReader};

/// Pick the reader to use for one fetch.
///
/// A wallet connected to `expected_network` wins without probing. Otherwise every
/// endpoint is connected and probed in order, and the first live one is returned.
pub fn select_provider<'a, C>(
    wallet: Option<&'a dyn LedgerReader>,
    expected_network: &str,
    endpoints: &[String],
    connector: &C,
) -> Result<Box<dyn LedgerReader + 'a>>
where
    C: Connector,
    C::Reader: 'a,
{
    if let Some(wallet) = wallet {
        match wallet.network_id() {
            Ok(network) if network == expected_network => return Ok(Box::new(wallet)),
            Ok(network) => msg!(
                "wallet is on {}, expected {}; using public endpoints",
                network,
                expected_network
            ),
            Err(err) => msg!("wallet network check failed: {}", err),
        }
    }

    for endpoint in endpoints {
        let reader = match connector.connect(endpoint) {
            Ok(reader) => reader,
            Err(err) => {
                msg!("endpoint {} connect failed: {}", endpoint, err);
                continue;
            }
        };
        match reader.head_slot() {
            Ok(_) => return Ok(Box::new(reader)),
            Err(err) => msg!("endpoint {} probe failed: {}", endpoint, err),
        }
    }

    err!(CrowdfundError::NoEndpointAvailable)
}
