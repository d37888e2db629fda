use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use blockchain::{SnapshotFilter, SolanaClient};
use rust_decimal::Decimal;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    actions::{ActionGetResponse, ActionPostRequest, ActionPostResponse, ActionsJson},
    error::{ApiError, ApiResult},
    profiles::BlinkKind,
    AppState,
};

/// Body of `GET /api/audit/:address`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub address: String,
    pub reclaimable_lamports: u64,
    pub reclaimable_sol: Decimal,
    pub junk_account_count: u64,
    pub scanned_account_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sol_price_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reclaimable_usd: Option<Decimal>,
    /// Main-site dashboard that closes the junk accounts of `address`
    pub dashboard_url: String,
}

pub async fn actions_json() -> Json<ActionsJson> {
    Json(ActionsJson::default())
}

pub async fn scan_metadata(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ActionGetResponse> {
    action_metadata(&state, &headers, BlinkKind::WalletScan)
}

pub async fn token_metadata(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ActionGetResponse> {
    action_metadata(&state, &headers, BlinkKind::TokenAudit)
}

pub async fn scan_action(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    body: Option<Json<ActionPostRequest>>,
) -> ApiResult<Json<ActionPostResponse>> {
    run_action(&state, BlinkKind::WalletScan, &params, body.map(|Json(b)| b)).await
}

pub async fn token_action(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    body: Option<Json<ActionPostRequest>>,
) -> ApiResult<Json<ActionPostResponse>> {
    run_action(&state, BlinkKind::TokenAudit, &params, body.map(|Json(b)| b)).await
}

fn action_metadata(state: &AppState, headers: &HeaderMap, kind: BlinkKind) -> Json<ActionGetResponse> {
    let base_url = public_base_url(state, headers);
    Json(state.profiles.get(kind).metadata(&base_url))
}

async fn run_action(
    state: &AppState,
    kind: BlinkKind,
    params: &HashMap<String, String>,
    body: Option<ActionPostRequest>,
) -> ApiResult<Json<ActionPostResponse>> {
    let profile = state.profiles.get(kind);

    let account = body
        .and_then(|b| b.account)
        .filter(|a| !a.trim().is_empty())
        .ok_or(ApiError::WalletRequired)?;
    let signer = SolanaClient::validate_address(&account)?;

    let target = params
        .get(profile.param_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput(format!("Missing '{}' parameter", profile.param_name)))?;
    let target = SolanaClient::validate_address(target)?;

    info!(kind = ?kind, signer = %signer, target = %target, "Running blink action");

    let (transaction, message, next) = match kind {
        BlinkKind::WalletScan => {
            let (audit, price) = tokio::join!(
                state
                    .audits
                    .audit_with_transaction(&target, SnapshotFilter::AllTokenAccounts, &signer),
                state.prices.sol_price_usd(),
            );
            let (audit, transaction) = audit?;
            let (message, card) =
                state
                    .presenter
                    .wallet_report(profile, &target.to_string(), &audit.report, price);
            (transaction, message, card)
        }
        BlinkKind::TokenAudit => {
            let mint = target.to_string();
            let (audit, price, metadata) = tokio::join!(
                state
                    .audits
                    .audit_with_transaction(&signer, SnapshotFilter::Mint(target), &signer),
                state.prices.sol_price_usd(),
                state.metadata.token_metadata_or_default(&mint),
            );
            let (audit, transaction) = audit?;
            let (message, card) =
                state
                    .presenter
                    .token_report(profile, &mint, &metadata, &audit.report, price);
            (transaction, message, card)
        }
    };

    Ok(Json(ActionPostResponse::with_inline_next(transaction, message, next)))
}

/// JSON wallet audit for the single-page front-end
pub async fn audit_wallet(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<AuditSummary>> {
    let owner: Pubkey = SolanaClient::validate_address(&address)?;

    let (audit, price) = tokio::join!(
        state.audits.audit(&owner, SnapshotFilter::AllTokenAccounts),
        state.prices.sol_price_usd(),
    );
    let audit = audit?;
    let reclaimable_sol = audit.report.reclaimable_sol();
    let address = owner.to_string();
    let dashboard_url = state
        .presenter
        .dashboard_link(&state.profiles.wallet_scan, &address);

    Ok(Json(AuditSummary {
        address,
        reclaimable_lamports: audit.report.reclaimable_lamports,
        reclaimable_sol,
        junk_account_count: audit.report.junk_account_count,
        scanned_account_count: audit.scanned_account_count,
        sol_price_usd: price,
        reclaimable_usd: price.map(|p| (reclaimable_sol * p).round_dp(2)),
        dashboard_url,
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rpc_reachable = state.audits.is_chain_reachable().await;

    let status = if rpc_reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(serde_json::json!({
        "status": if rpc_reachable { "healthy" } else { "unhealthy" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "rpc": if rpc_reachable { "reachable" } else { "unreachable" },
    })))
}

/// Absolute origin used in action hrefs
///
/// The configured public URL wins; otherwise the request's `Host` is assumed
/// to be served over HTTPS.
pub fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = &state.config.server.public_base_url {
        return url.trim_end_matches('/').to_string();
    }

    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) if !host.is_empty() => format!("https://{}", host),
        _ => {
            let fallback = format!("http://{}:{}", state.config.server.host, state.config.server.port);
            warn!(
                "No Host header and PUBLIC_BASE_URL unset; action links point at {}",
                fallback
            );
            fallback
        }
    }
}
