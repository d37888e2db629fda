//! Wire types of the Solana Actions protocol (Blinks).

use serde::{Deserialize, Serialize};

/// Body of `GET` on an action endpoint, and of inline next actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGetResponse {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ActionLinks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedAction {
    #[serde(rename = "type")]
    pub kind: LinkedActionKind,
    pub href: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

impl LinkedAction {
    pub fn transaction(href: String, label: impl Into<String>, parameters: Vec<ActionParameter>) -> Self {
        Self {
            kind: LinkedActionKind::Transaction,
            href,
            label: label.into(),
            parameters,
        }
    }

    pub fn external(href: String, label: impl Into<String>) -> Self {
        Self {
            kind: LinkedActionKind::ExternalLink,
            href,
            label: label.into(),
            parameters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkedActionKind {
    Transaction,
    ExternalLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParameter {
    pub name: String,
    pub label: String,
    pub required: bool,
}

/// Body of `POST` on an action endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionPostRequest {
    /// Base58 address of the wallet that will sign
    pub account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    #[serde(rename = "type")]
    pub kind: PostResponseKind,
    /// Base64 wire-format transaction for the wallet to sign
    pub transaction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PostResponseLinks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostResponseKind {
    Transaction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponseLinks {
    pub next: NextActionLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NextActionLink {
    Inline { action: ActionGetResponse },
}

impl ActionPostResponse {
    /// Transaction response whose next card is shown inline after signing
    pub fn with_inline_next(transaction: String, message: String, next: ActionGetResponse) -> Self {
        Self {
            kind: PostResponseKind::Transaction,
            transaction,
            message: Some(message),
            links: Some(PostResponseLinks {
                next: NextActionLink::Inline { action: next },
            }),
        }
    }
}

/// `actions.json` mapping website paths to action API paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

impl Default for ActionsJson {
    fn default() -> Self {
        Self {
            rules: vec![ActionRule {
                path_pattern: "/api/**".to_string(),
                api_path: "/api/**".to_string(),
            }],
        }
    }
}
