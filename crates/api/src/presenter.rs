use reqwest::Url;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::{config::SiteConfig, RentReport, TokenMetadata, LAMPORTS_PER_SOL};

use crate::actions::{ActionGetResponse, ActionKind, ActionLinks, LinkedAction};
use crate::profiles::BlinkProfile;

/// Decimals shown for wallet scans, which usually find small amounts
pub const WALLET_SOL_DECIMALS: u32 = 4;
pub const TOKEN_SOL_DECIMALS: u32 = 2;

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Turns rent reports into the cards and messages shown after signing
#[derive(Debug, Clone)]
pub struct ResponsePresenter {
    site: SiteConfig,
}

impl ResponsePresenter {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    /// Message and next card for a wallet scan
    pub fn wallet_report(
        &self,
        profile: &BlinkProfile,
        address: &str,
        report: &RentReport,
        sol_price_usd: Option<Decimal>,
    ) -> (String, ActionGetResponse) {
        let sol = format_sol(report.reclaimable_lamports, WALLET_SOL_DECIMALS);
        let usd = usd_suffix(report, sol_price_usd);
        let message = format!("Analysis complete for wallet {}", short_address(address));

        let share_text = format!(
            "🐉 My wallet audit found {} SOL{} locked in {} junk accounts.\n\nScan yours 👇\n{}",
            sol, usd, report.junk_account_count, self.site.share_handle
        );

        let mut actions = Vec::new();
        let (title, description) = if report.has_reclaimable_rent() {
            actions.push(LinkedAction::external(
                self.dashboard_link(profile, address),
                format!("💰 Reclaim {} SOL (Go to App)", sol),
            ));
            (
                "⚠️ INEFFICIENCY DETECTED".to_string(),
                format!(
                    "• 💤 Dormant SOL: **{} SOL{}**\n• 🧟 Junk Accounts: **{}**\n\n\
                     Closing these empty token accounts returns their rent deposit to your wallet.",
                    sol, usd, report.junk_account_count
                ),
            )
        } else {
            (
                "✅ WALLET OPTIMIZED".to_string(),
                "No empty token accounts holding rent were found. Nothing to reclaim.".to_string(),
            )
        };

        actions.push(LinkedAction::external(self.share_link(&share_text), "🐦 Share Result"));
        actions.push(LinkedAction::external(
            format!("{}/presale", self.site.main_site_url),
            "🐉 Buy $SHEN (Presale)",
        ));

        let card = ActionGetResponse {
            kind: ActionKind::Action,
            icon: profile.icon.clone(),
            title,
            description,
            label: "Actions".to_string(),
            disabled: false,
            links: Some(ActionLinks { actions }),
        };

        (message, card)
    }

    /// Message and next card for a token audit
    pub fn token_report(
        &self,
        profile: &BlinkProfile,
        mint: &str,
        metadata: &TokenMetadata,
        report: &RentReport,
        sol_price_usd: Option<Decimal>,
    ) -> (String, ActionGetResponse) {
        let sol = format_sol(report.reclaimable_lamports, TOKEN_SOL_DECIMALS);
        let usd = usd_suffix(report, sol_price_usd);
        let message = format!("Analysis complete for {}", metadata.symbol);

        let share_text = format!(
            "🐉 SHENLONG AUDIT REPORT for ${}\n\n🔍 Project: {}\n💰 Locked Rent: {} SOL{}\n\
             🧟 Zombie Accounts: {}\n\nCheck if you have old accounts here 👇\n{}",
            metadata.symbol, metadata.name, sol, usd, report.junk_account_count, self.site.share_handle
        );

        let card = ActionGetResponse {
            kind: ActionKind::Action,
            icon: metadata.image.clone(),
            title: format!("💸 {} SOL{} DETECTED", sol, usd),
            description: format!(
                "⚠️ AUDIT REPORT ({}):\n• 🏢 Project: **{}**\n• 🧟 Zombie Accounts: **{}**\n\
                 • 📉 Locked Capital: **{} SOL**\n\n\
                 This value is trapped on the blockchain. Help the community reclaim it.",
                metadata.symbol, metadata.name, report.junk_account_count, sol
            ),
            label: "Actions".to_string(),
            disabled: false,
            links: Some(ActionLinks {
                actions: vec![
                    LinkedAction::external(self.share_link(&share_text), "🐦 Share Report & Earn"),
                    LinkedAction::external(
                        self.dashboard_link(profile, mint),
                        "🔥 Reclaim Now (App)",
                    ),
                ],
            }),
        };

        (message, card)
    }

    /// X (Twitter) intent link posting `text` with the main site attached
    pub fn share_link(&self, text: &str) -> String {
        with_query(
            TWEET_INTENT_URL,
            &[("text", text), ("url", self.site.main_site_url.as_str())],
        )
    }

    pub fn dashboard_link(&self, profile: &BlinkProfile, address: &str) -> String {
        with_query(
            &format!("{}/dashboard", self.site.main_site_url),
            &[(profile.dashboard_param, address)],
        )
    }
}

/// `lamports` as SOL with exactly `decimals` fractional digits
pub fn format_sol(lamports: u64, decimals: u32) -> String {
    let sol = Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL);
    let rounded = sol.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// Whole dollars with thousands separators, e.g. `12,345`
pub fn format_usd(value: Decimal) -> String {
    let whole = value
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc()
        .to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value.is_sign_negative() && grouped != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn usd_suffix(report: &RentReport, sol_price_usd: Option<Decimal>) -> String {
    match sol_price_usd {
        Some(price) => format!(" (${})", format_usd(report.reclaimable_sol() * price)),
        None => String::new(),
    }
}

fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..4], &address[address.len() - 4..])
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    Url::parse_with_params(base, params)
        .map(String::from)
        .unwrap_or_else(|_| base.to_string())
}
