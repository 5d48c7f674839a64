use anchor_lang::prelude::*;
use rust_decimal::Decimal;

use crate::errors::CrowdfundError;
use crate::states::{Campaign, RawCampaign};
use crate::utils::{parse_decimal, to_display_amount, to_display_units};

pub const ZERO_AMOUNT: &str = "0";
pub const PLACEHOLDER_TITLE: &str = "Untitled campaign";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description provided";
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/campaign-placeholder.png";

/// Coerce one ledger amount into a display decimal.
///
/// - pure digits: base units, scaled down by `decimals`
/// - contains `.`: already a display value, kept as is
/// - `0x` prefix: hex base units, scaled down by `decimals`
/// - anything else: `"0"`
pub fn normalize_amount(raw: Option<&str>, decimals: u8) -> String {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return ZERO_AMOUNT.to_string(),
    };

    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            if let Ok(value) = u128::from_str_radix(hex, 16) {
                return to_display_units(value, decimals);
            }
        }
        msg!("unreadable hex amount {}, using 0", raw);
        return ZERO_AMOUNT.to_string();
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return to_display_amount(raw, decimals).unwrap_or_else(|_| {
            msg!("amount {} out of range, using 0", raw);
            ZERO_AMOUNT.to_string()
        });
    }

    if raw.contains('.') {
        if let Some(value) = parse_decimal(raw) {
            if value >= Decimal::ZERO {
                return raw.to_string();
            }
        }
    }

    msg!("unrecognised amount {}, using 0", raw);
    ZERO_AMOUNT.to_string()
}

fn text_or(value: &Option<String>, placeholder: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Build a display record from a raw ledger record.
///
/// Field problems degrade to defaults. Only a record that was never
/// initialised (no owner, no deadline) is rejected as a whole.
pub fn normalize_campaign(raw: &RawCampaign, decimals: u8) -> Result<Campaign> {
    let owner_missing = raw
        .owner
        .as_deref()
        .map_or(true, |owner| owner.trim().is_empty());
    require!(
        !(owner_missing && raw.deadline == 0),
        CrowdfundError::FormatError
    );

    Ok(Campaign {
        id: raw.id,
        owner: text_or(&raw.owner, &Pubkey::default().to_string()),
        title: text_or(&raw.title, PLACEHOLDER_TITLE),
        description: text_or(&raw.description, PLACEHOLDER_DESCRIPTION),
        image_url: text_or(&raw.image_url, PLACEHOLDER_IMAGE_URL),
        target: normalize_amount(raw.target.as_deref(), decimals),
        deadline: raw.deadline,
        amount_collected: normalize_amount(raw.amount_collected.as_deref(), decimals),
        withdrawn: raw.withdrawn,
        donators: raw.donators.clone(),
        donations: raw
            .donations
            .iter()
            .map(|amount| normalize_amount(Some(amount), decimals))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::is_error;

    fn raw_campaign() -> RawCampaign {
        RawCampaign {
            id: 7,
            owner: Some(Pubkey::new_from_array([7; 32]).to_string()),
            title: Some("Clean water".to_string()),
            description: Some("Wells for the valley".to_string()),
            image_url: Some("https://img/well.png".to_string()),
            target: Some("5000000000000000000".to_string()),
            deadline: 1_800_000_000,
            amount_collected: Some("0x1bc16d674ec80000".to_string()),
            withdrawn: false,
            donators: vec!["alice".to_string(), "bob".to_string()],
            donations: vec!["1000000000000000000".to_string(), "1.0".to_string()],
        }
    }

    #[test]
    fn amount_shapes() {
        assert_eq!(normalize_amount(Some("5000000000000000000"), 18), "5");
        assert_eq!(normalize_amount(Some("2.5"), 18), "2.5");
        assert_eq!(normalize_amount(Some("0x1bc16d674ec80000"), 18), "2");
        assert_eq!(normalize_amount(Some("0XFF"), 0), "255");
        assert_eq!(normalize_amount(None, 18), "0");
    }

    #[test]
    fn malformed_amounts_become_zero() {
        for bad in ["", "   ", "abc", "0x", "0xzz", "0x+5", "-2.5", "1.2.3", "-7"] {
            assert_eq!(normalize_amount(Some(bad), 18), "0", "{bad}");
        }
        let overflow = "9".repeat(45);
        assert_eq!(normalize_amount(Some(&overflow), 18), "0");
    }

    #[test]
    fn campaign_amounts_are_display_values() {
        let campaign = normalize_campaign(&raw_campaign(), 18).unwrap();
        assert_eq!(campaign.id, 7);
        assert_eq!(campaign.target, "5");
        assert_eq!(campaign.amount_collected, "2");
        assert_eq!(campaign.donations, vec!["1", "1.0"]);
        assert_eq!(campaign.title, "Clean water");
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let raw = RawCampaign {
            owner: None,
            title: None,
            description: Some("  ".to_string()),
            image_url: None,
            target: None,
            amount_collected: Some("garbage".to_string()),
            ..raw_campaign()
        };
        let campaign = normalize_campaign(&raw, 18).unwrap();

        assert_eq!(campaign.owner, Pubkey::default().to_string());
        assert_eq!(campaign.title, PLACEHOLDER_TITLE);
        assert_eq!(campaign.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(campaign.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(campaign.target, "0");
        assert_eq!(campaign.amount_collected, "0");
    }

    #[test]
    fn uninitialised_record_is_rejected() {
        let err = normalize_campaign(&RawCampaign::default(), 18).unwrap_err();
        assert!(is_error(&err, CrowdfundError::FormatError));
    }
}
