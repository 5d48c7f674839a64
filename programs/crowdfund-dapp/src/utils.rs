use std::str::FromStr;

use anchor_lang::prelude::*;
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::errors::CrowdfundError;
use crate::states::CampaignStatus;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Accepted shapes for a `datetime-local` style deadline input.
const DEADLINE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Render a base-unit amount as a display decimal, trimming trailing zeros.
pub fn to_display_units(value: u128, decimals: u8) -> String {
    let digits = value.to_string();
    let scale = decimals as usize;
    if scale == 0 {
        return digits;
    }

    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, frac) = padded.split_at(padded.len() - scale);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}

/// Convert a base-unit digit string into its display decimal.
///
/// Callers that cannot surface the failure substitute `"0"`.
pub fn to_display_amount(raw: &str, decimals: u8) -> Result<String> {
    let raw = raw.trim();
    require!(
        !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()),
        CrowdfundError::FormatError
    );
    let value = raw
        .parse::<u128>()
        .map_err(|_| CrowdfundError::FormatError)?;
    Ok(to_display_units(value, decimals))
}

/// Parse a user-entered display amount (e.g. `"0.25"`) into base units.
pub fn parse_display_amount(text: &str, decimals: u8) -> Result<u128> {
    let text = text.trim();
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

    require!(
        !(whole.is_empty() && frac.is_empty()),
        CrowdfundError::InvalidAmount
    );
    require!(
        whole.bytes().all(|b| b.is_ascii_digit()) && frac.bytes().all(|b| b.is_ascii_digit()),
        CrowdfundError::InvalidAmount
    );
    require!(
        frac.len() <= decimals as usize,
        CrowdfundError::InvalidAmount
    );

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(CrowdfundError::InvalidAmount)?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| CrowdfundError::InvalidAmount)?
    };
    let frac_units = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<width$}", width = decimals as usize)
            .parse::<u128>()
            .map_err(|_| CrowdfundError::InvalidAmount)?
    };

    let amount = whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or(CrowdfundError::InvalidAmount)?;
    require!(amount > 0, CrowdfundError::InvalidAmount);

    Ok(amount)
}

pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Funding percentage in `[0, 100]`. Zero when the target is zero or unreadable.
pub fn compute_progress(collected: &str, target: &str) -> Decimal {
    let target = match parse_decimal(target) {
        Some(target) if target > Decimal::ZERO => target,
        _ => return Decimal::ZERO,
    };
    let collected = parse_decimal(collected).unwrap_or(Decimal::ZERO);

    let percent = collected
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED);

    percent.min(Decimal::ONE_HUNDRED).max(Decimal::ZERO)
}

/// Status precedence: withdrawn, expired, completed, active.
pub fn derive_status(
    deadline: i64,
    withdrawn: bool,
    target: &str,
    collected: &str,
    now: i64,
) -> CampaignStatus {
    if withdrawn {
        return CampaignStatus::Withdrawn;
    }
    if now >= deadline {
        return CampaignStatus::Expired;
    }

    let target = parse_decimal(target).unwrap_or(Decimal::ZERO);
    let collected = parse_decimal(collected).unwrap_or(Decimal::ZERO);
    if collected >= target {
        CampaignStatus::Completed
    } else {
        CampaignStatus::Active
    }
}

/// Whole days left before `deadline`, rounded up. Never negative.
pub fn days_remaining(deadline: i64, now: i64) -> u64 {
    let left = deadline.saturating_sub(now);
    if left <= 0 {
        return 0;
    }
    (left as u64).div_ceil(SECONDS_PER_DAY as u64)
}

/// Read a form deadline as local wall-clock time.
pub fn parse_deadline_input(text: &str, now: i64) -> Result<i64> {
    parse_deadline_input_in(text, &Local, now)
}

/// Same as [`parse_deadline_input`], in an explicit time zone.
pub fn parse_deadline_input_in<Tz: TimeZone>(text: &str, tz: &Tz, now: i64) -> Result<i64> {
    let text = text.trim();
    let naive = DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or(CrowdfundError::InvalidDeadlineFormat)?;

    // Skipped local times (DST gaps) have no instant.
    let deadline = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or(CrowdfundError::InvalidDeadlineFormat)?
        .timestamp();

    require!(deadline > now, CrowdfundError::DeadlineNotInFuture);
    Ok(deadline)
}

/// Split a withdrawal into the platform fee and the owner payout, both in base units.
pub fn withdrawal_breakdown(collected: u128, fee_percent: u8) -> Result<(u128, u128)> {
    require!(fee_percent <= 100, CrowdfundError::InvalidFeePercent);

    let percent = fee_percent as u128;
    let fee = (collected / 100) * percent + (collected % 100) * percent / 100;
    let payout = collected
        .checked_sub(fee)
        .ok_or(CrowdfundError::InvalidFeePercent)?;

    Ok((fee, payout))
}
