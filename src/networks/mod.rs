//! Chain registry and custom network requests.

use crate::provider::{self, ProviderError, RpcMethod, WalletProvider};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
    /// Single letter shown in the network badge.
    pub icon: char,
    pub testnet: bool,
    pub local: bool,
}

impl NetworkInfo {
    fn known(chain_id: u64, name: &str, icon: char, testnet: bool) -> Self {
        Self {
            chain_id,
            name: name.to_string(),
            icon,
            testnet,
            local: false,
        }
    }

    /// Fallback for ids missing from the registry.
    pub fn unknown(chain_id: u64) -> Self {
        Self {
            chain_id,
            name: format!("Unknown Network ({})", chain_id),
            icon: '?',
            testnet: false,
            local: false,
        }
    }

    pub fn type_label(&self) -> &'static str {
        network_type_label(self.testnet, self.local)
    }
}

pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Mainnets first, then testnets, then the local devnet.
const REGISTRY_ORDER: [u64; 13] = [
    1, 137, 56, 43114, 10, 42161, 11155111, 5, 80001, 43113, 84531, 97, LOCAL_CHAIN_ID,
];

fn registry() -> &'static HashMap<u64, NetworkInfo> {
    static REGISTRY: OnceLock<HashMap<u64, NetworkInfo>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut local = NetworkInfo::known(LOCAL_CHAIN_ID, "Localhost Hardhat", 'H', true);
        local.local = true;
        [
            NetworkInfo::known(1, "Ethereum", 'E', false),
            NetworkInfo::known(137, "Polygon", 'P', false),
            NetworkInfo::known(56, "BNB Smart Chain", 'B', false),
            NetworkInfo::known(43114, "Avalanche", 'A', false),
            NetworkInfo::known(10, "OP Mainnet", 'O', false),
            NetworkInfo::known(42161, "Arbitrum One", 'A', false),
            NetworkInfo::known(11155111, "Sepolia", 'S', true),
            NetworkInfo::known(5, "Goerli", 'G', true),
            NetworkInfo::known(80001, "Polygon Mumbai", 'M', true),
            NetworkInfo::known(43113, "Avalanche Fuji", 'F', true),
            NetworkInfo::known(84531, "Base Goerli", 'B', true),
            NetworkInfo::known(97, "BNB Chain Testnet", 'B', true),
            local,
        ]
        .into_iter()
        .map(|n| (n.chain_id, n))
        .collect()
    })
}

/// Registry entry for `chain_id`, or the computed unknown-network default.
pub fn lookup(chain_id: u64) -> NetworkInfo {
    registry()
        .get(&chain_id)
        .cloned()
        .unwrap_or_else(|| NetworkInfo::unknown(chain_id))
}

pub fn is_known(chain_id: u64) -> bool {
    registry().contains_key(&chain_id)
}

/// All registered networks in menu order.
pub fn all() -> Vec<NetworkInfo> {
    REGISTRY_ORDER.iter().map(|id| lookup(*id)).collect()
}

pub fn network_type_label(testnet: bool, local: bool) -> &'static str {
    if local {
        "Local"
    } else if testnet {
        "Testnet"
    } else {
        "Mainnet"
    }
}

/// `0x1234...abcd`: first 6 and last 4 characters. Empty stays empty.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Network the wallet is currently on.
pub async fn current_network<P: WalletProvider>(provider: &P) -> Result<NetworkInfo, ProviderError> {
    Ok(lookup(provider::chain_id(provider).await?))
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkFormError {
    #[error("chain ID must be a number")]
    InvalidChainId,
    #[error("network name is required")]
    MissingName,
    #[error("RPC URL must start with http:// or https://")]
    InvalidRpcUrl,
}

/// Raw input of the custom network modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomNetworkForm {
    pub chain_id: String,
    pub name: String,
    pub rpc_url: String,
    pub currency_symbol: String,
    pub currency_name: String,
    pub explorer_url: String,
}

impl Default for CustomNetworkForm {
    fn default() -> Self {
        Self {
            chain_id: String::new(),
            name: String::new(),
            rpc_url: String::new(),
            currency_symbol: "ETH".to_string(),
            currency_name: "Ether".to_string(),
            explorer_url: String::new(),
        }
    }
}

impl CustomNetworkForm {
    pub fn validate(&self) -> Result<AddChainParams, NetworkFormError> {
        let chain_id: u64 = self
            .chain_id
            .trim()
            .parse()
            .map_err(|_| NetworkFormError::InvalidChainId)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NetworkFormError::MissingName);
        }
        let rpc_url = self.rpc_url.trim();
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            return Err(NetworkFormError::InvalidRpcUrl);
        }
        let explorer = self.explorer_url.trim();

        Ok(AddChainParams {
            chain_id: format!("0x{:x}", chain_id),
            chain_name: name.to_string(),
            native_currency: NativeCurrency {
                name: non_empty_or(&self.currency_name, "Ether"),
                symbol: non_empty_or(&self.currency_symbol, "ETH"),
                decimals: 18,
            },
            rpc_urls: vec![rpc_url.to_string()],
            block_explorer_urls: (!explorer.is_empty()).then(|| vec![explorer.to_string()]),
        })
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    /// 0x-prefixed hex.
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_explorer_urls: Option<Vec<String>>,
}

/// Ask the wallet to add a chain. The caller reloads the page on success.
pub async fn add_custom_network<P: WalletProvider>(
    provider: &P,
    params: &AddChainParams,
) -> Result<(), ProviderError> {
    let payload = serde_json::to_value(params).map_err(|e| ProviderError::Decode(e.to_string()))?;
    provider
        .request(RpcMethod::AddEthereumChain, Value::Array(vec![payload]))
        .await?;
    info!(chain_id = %params.chain_id, name = %params.chain_name, "custom network added");
    Ok(())
}

/// Ask the wallet to move to `chain_id`. The wallet answers with
/// `chainChanged`, which the bridge turns into a page reload.
pub async fn switch_network<P: WalletProvider>(provider: &P, chain_id: u64) -> Result<(), ProviderError> {
    let params = json!([{ "chainId": format!("0x{:x}", chain_id) }]);
    provider.request(RpcMethod::SwitchEthereumChain, params).await?;
    info!(chain_id, "network switched");
    Ok(())
}
