//! Display configuration of each Blink.
//!
//! Every Blink shares one handler pair; what differs between them is the
//! copy, icon and query parameter kept here.

use shared::config::SiteConfig;

use crate::actions::{ActionGetResponse, ActionKind, ActionLinks, ActionParameter, LinkedAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkKind {
    /// Scan a wallet for junk token accounts
    WalletScan,
    /// Audit a token mint for the signing wallet
    TokenAudit,
}

#[derive(Debug, Clone)]
pub struct BlinkProfile {
    pub kind: BlinkKind,
    /// Route of the action endpoint
    pub path: &'static str,
    /// Query parameter carrying the address to audit
    pub param_name: &'static str,
    pub param_label: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub button_label: String,
    /// Query parameter the dashboard uses to pick up the audited address
    pub dashboard_param: &'static str,
}

impl BlinkProfile {
    pub fn wallet_scan(site: &SiteConfig) -> Self {
        Self {
            kind: BlinkKind::WalletScan,
            path: "/api/scan",
            param_name: "address",
            param_label: "Solana wallet address".to_string(),
            icon: format!("{}/favicon.png", site.main_site_url),
            title: "Shenlong Wallet Audit".to_string(),
            description: "Check whether you have SOL stuck in junk token accounts. \
                          Enter the wallet address below."
                .to_string(),
            label: "Scan Wallet".to_string(),
            button_label: "Check Now".to_string(),
            dashboard_param: "autoScan",
        }
    }

    pub fn token_audit(site: &SiteConfig) -> Self {
        Self {
            kind: BlinkKind::TokenAudit,
            path: "/api/token",
            param_name: "ca",
            param_label: "Paste Token Address...".to_string(),
            icon: site.default_icon_url.clone(),
            title: "Shenlong Token Auditor".to_string(),
            description: "Paste the Contract Address (CA) of any token. We check your wallet \
                          for dead liquidity (rent) trapped in zombie accounts of that token."
                .to_string(),
            label: "Audit Token".to_string(),
            button_label: "🔍 Run Analysis".to_string(),
            dashboard_param: "tokenScan",
        }
    }

    /// Templated href of the action button, e.g. `https://host/api/scan?address={address}`
    pub fn action_href(&self, base_url: &str) -> String {
        format!("{}{}?{}={{{}}}", base_url, self.path, self.param_name, self.param_name)
    }

    /// Card returned by `GET` on the profile's endpoint
    pub fn metadata(&self, base_url: &str) -> ActionGetResponse {
        ActionGetResponse {
            kind: ActionKind::Action,
            icon: self.icon.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            label: self.label.clone(),
            disabled: false,
            links: Some(ActionLinks {
                actions: vec![LinkedAction::transaction(
                    self.action_href(base_url),
                    self.button_label.clone(),
                    vec![ActionParameter {
                        name: self.param_name.to_string(),
                        label: self.param_label.clone(),
                        required: true,
                    }],
                )],
            }),
        }
    }
}

/// The table of Blinks served by this process
#[derive(Debug, Clone)]
pub struct BlinkProfiles {
    pub wallet_scan: BlinkProfile,
    pub token_audit: BlinkProfile,
}

impl BlinkProfiles {
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            wallet_scan: BlinkProfile::wallet_scan(site),
            token_audit: BlinkProfile::token_audit(site),
        }
    }

    pub fn get(&self, kind: BlinkKind) -> &BlinkProfile {
        match kind {
            BlinkKind::WalletScan => &self.wallet_scan,
            BlinkKind::TokenAudit => &self.token_audit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::Config;

    #[test]
    fn test_action_href_template() {
        let site = Config::default().site;
        let profile = BlinkProfile::wallet_scan(&site);
        assert_eq!(
            profile.action_href("https://blinks.example"),
            "https://blinks.example/api/scan?address={address}"
        );
    }

    #[test]
    fn test_metadata_has_one_required_parameter() {
        let site = Config::default().site;
        let metadata = BlinkProfile::token_audit(&site).metadata("https://blinks.example");
        let links = metadata.links.unwrap();

        assert_eq!(links.actions.len(), 1);
        assert_eq!(links.actions[0].href, "https://blinks.example/api/token?ca={ca}");
        assert_eq!(links.actions[0].parameters.len(), 1);
        assert_eq!(links.actions[0].parameters[0].name, "ca");
        assert!(links.actions[0].parameters[0].required);
    }

    #[test]
    fn test_wallet_icon_uses_main_site() {
        let mut site = Config::default().site;
        site.main_site_url = "https://app.example".to_string();
        assert_eq!(BlinkProfile::wallet_scan(&site).icon, "https://app.example/favicon.png");
    }

    #[test]
    fn test_profile_lookup() {
        let profiles = BlinkProfiles::from_site(&Config::default().site);
        assert_eq!(profiles.get(BlinkKind::TokenAudit).path, "/api/token");
        assert_eq!(profiles.get(BlinkKind::WalletScan).path, "/api/scan");
    }
}
