//! Wallet / account provider seam
//!
//! The game table only asks whether a wallet is connected. Address and balance
//! belong to the provider and are passed through for display.

use parking_lot::RwLock;

/// Source of chain-account state
pub trait AccountProvider: Send + Sync {
    /// Whether a wallet is currently connected
    fn is_connected(&self) -> bool;

    /// Connected account address, if any
    fn address(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct WalletState {
    address: Option<String>,
    balance: String,
}

/// Stand-in wallet for local play and tests
#[derive(Debug, Default)]
pub struct MockWallet {
    state: RwLock<WalletState>,
}

impl MockWallet {
    /// Disconnected wallet
    pub fn new() -> Self {
        Self::default()
    }

    /// Wallet already connected to `address`
    pub fn connected(address: impl Into<String>) -> Self {
        let wallet = Self::new();
        wallet.connect(address);
        wallet
    }

    pub fn connect(&self, address: impl Into<String>) {
        let address = address.into();
        tracing::info!("Wallet connected: {}", address);
        let mut state = self.state.write();
        state.address = Some(address);
        state.balance = "0".to_string();
    }

    pub fn disconnect(&self) {
        let mut state = self.state.write();
        if let Some(address) = state.address.take() {
            tracing::info!("Wallet disconnected: {}", address);
        }
        state.balance.clear();
    }

    /// Balance as reported by the provider, for display only
    pub fn balance(&self) -> String {
        self.state.read().balance.clone()
    }
}

impl AccountProvider for MockWallet {
    fn is_connected(&self) -> bool {
        self.state.read().address.is_some()
    }

    fn address(&self) -> Option<String> {
        self.state.read().address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_disconnect() {
        let wallet = MockWallet::new();
        assert!(!wallet.is_connected());
        assert_eq!(wallet.address(), None);

        wallet.connect("0xabc");
        assert!(wallet.is_connected());
        assert_eq!(wallet.address().as_deref(), Some("0xabc"));
        assert_eq!(wallet.balance(), "0");

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert!(wallet.balance().is_empty());
    }
}
