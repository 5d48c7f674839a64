use std::str::FromStr;
use std::time::Duration;

use anchor_lang::prelude::*;
use serde::Deserialize;

use crate::errors::CrowdfundError;

pub const DEFAULT_DECIMALS: u8 = 18;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;

/// Largest scale a `u128` base-unit amount can carry.
pub const MAX_DECIMALS: u8 = 38;

/// Deployment settings supplied by the environment.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Network the ledger lives on; a wallet reporting anything else is ignored for reads.
    pub network_id: String,
    /// Address of the crowdfunding program.
    #[serde(default = "crate::id", deserialize_with = "deserialize_pubkey")]
    pub program_id: Pubkey,
    /// Public read endpoints, tried in order.
    pub rpc_endpoints: Vec<String>,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

fn deserialize_pubkey<'de, D>(deserializer: D) -> std::result::Result<Pubkey, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = <String as Deserialize>::deserialize(deserializer)?;
    Pubkey::from_str(text.trim()).map_err(serde::de::Error::custom)
}

impl ClientConfig {
    pub fn new(
        network_id: impl Into<String>,
        program_id: Pubkey,
        rpc_endpoints: Vec<String>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            program_id,
            rpc_endpoints,
            decimals: DEFAULT_DECIMALS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json).map_err(|err| {
            msg!("invalid client config: {}", err);
            CrowdfundError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `CROWDFUND_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_id = lookup("CROWDFUND_NETWORK").ok_or(CrowdfundError::InvalidConfig)?;
        let program_id = match lookup("CROWDFUND_PROGRAM_ID") {
            Some(text) => Pubkey::from_str(text.trim()).map_err(|_| CrowdfundError::InvalidConfig)?,
            None => crate::ID,
        };
        let rpc_endpoints = lookup("CROWDFUND_RPC_ENDPOINTS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|endpoint| !endpoint.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let mut config = Self::new(network_id, program_id, rpc_endpoints);
        if let Some(decimals) = lookup("CROWDFUND_DECIMALS") {
            config.decimals = parse_setting(&decimals)?;
        }
        if let Some(attempts) = lookup("CROWDFUND_MAX_ATTEMPTS") {
            config.max_attempts = parse_setting(&attempts)?;
        }
        if let Some(delay) = lookup("CROWDFUND_BASE_DELAY_MS") {
            config.base_delay_ms = parse_setting(&delay)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require!(!self.network_id.trim().is_empty(), CrowdfundError::InvalidConfig);
        require!(!self.rpc_endpoints.is_empty(), CrowdfundError::InvalidConfig);
        require!(self.decimals <= MAX_DECIMALS, CrowdfundError::InvalidConfig);
        Ok(())
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

fn parse_setting<T: FromStr>(text: &str) -> Result<T> {
    let value = text
        .trim()
        .parse::<T>()
        .map_err(|_| CrowdfundError::InvalidConfig)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::is_error;

    const PROGRAM: &str = "SysvarC1ock11111111111111111111111111111111";

    #[test]
    fn json_applies_defaults() {
        let json = format!(
            r#"{{"network_id":"devnet","program_id":"{PROGRAM}","rpc_endpoints":["https://a","https://b"]}}"#
        );
        let config = ClientConfig::from_json(&json).unwrap();
        assert_eq!(config.network_id, "devnet");
        assert_eq!(config.program_id.to_string(), PROGRAM);
        assert_eq!(config.rpc_endpoints, vec!["https://a", "https://b"]);
        assert_eq!(config.decimals, DEFAULT_DECIMALS);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.base_delay(), Duration::from_millis(DEFAULT_BASE_DELAY_MS));
    }

    #[test]
    fn json_rejects_bad_program_id() {
        let json = r#"{"network_id":"devnet","program_id":"nope","rpc_endpoints":["https://a"]}"#;
        let err = ClientConfig::from_json(json).unwrap_err();
        assert!(is_error(&err, CrowdfundError::InvalidConfig));
    }

    #[test]
    fn lookup_reads_every_setting() {
        let vars: HashMap<&str, String> = HashMap::from([
            ("CROWDFUND_NETWORK", "mainnet".to_string()),
            ("CROWDFUND_PROGRAM_ID", PROGRAM.to_string()),
            ("CROWDFUND_RPC_ENDPOINTS", " https://a , ,https://b ".to_string()),
            ("CROWDFUND_DECIMALS", "9".to_string()),
            ("CROWDFUND_MAX_ATTEMPTS", "5".to_string()),
            ("CROWDFUND_BASE_DELAY_MS", "250".to_string()),
        ]);
        let config = ClientConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.rpc_endpoints, vec!["https://a", "https://b"]);
        assert_eq!(config.decimals, 9);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.base_delay_ms, 250);
    }

    #[test]
    fn program_id_defaults_to_declared_id() {
        let json = r#"{"network_id":"devnet","rpc_endpoints":["https://a"]}"#;
        assert_eq!(ClientConfig::from_json(json).unwrap().program_id, crate::ID);
    }

    #[test]
    fn lookup_requires_endpoints() {
        let vars: HashMap<&str, String> = HashMap::from([
            ("CROWDFUND_NETWORK", "mainnet".to_string()),
            ("CROWDFUND_PROGRAM_ID", PROGRAM.to_string()),
        ]);
        let err = ClientConfig::from_lookup(|key| vars.get(key).cloned()).unwrap_err();
        assert!(is_error(&err, CrowdfundError::InvalidConfig));
    }

    #[test]
    fn validate_caps_decimals() {
        let mut config = ClientConfig::new("devnet", Pubkey::default(), vec!["https://a".into()]);
        assert!(config.validate().is_ok());
        config.decimals = MAX_DECIMALS + 1;
        assert!(config.validate().is_err());
    }
}
