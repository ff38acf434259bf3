//! View identifiers and the data each view renders.

use sim_analytics::{AnalyticsSnapshot, Balances, Block, NetworkParams, Transaction};

/// One tab of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
    Analytics,
    Parameters,
    Mempool,
    Decentralization,
    Explorer,
    History,
    Wallet,
}

impl ViewId {
    /// All views in tab-bar order.
    pub const ALL: [ViewId; 8] = [
        ViewId::Dashboard,
        ViewId::Analytics,
        ViewId::Parameters,
        ViewId::Mempool,
        ViewId::Decentralization,
        ViewId::Explorer,
        ViewId::History,
        ViewId::Wallet,
    ];

    /// The view entered at startup and the only one auto-refreshed.
    pub const DEFAULT: ViewId = ViewId::Dashboard;

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::Analytics => "Analytics",
            ViewId::Parameters => "Parameters",
            ViewId::Mempool => "Mempool",
            ViewId::Decentralization => "Decentralization",
            ViewId::Explorer => "Explorer",
            ViewId::History => "History",
            ViewId::Wallet => "Wallet",
        }
    }

    /// Lower-case name used in placeholders ("Failed to load mempool.").
    pub fn noun(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::Analytics => "analytics",
            ViewId::Parameters => "parameters",
            ViewId::Mempool => "mempool",
            ViewId::Decentralization => "decentralization metrics",
            ViewId::Explorer => "blockchain",
            ViewId::History => "transaction history",
            ViewId::Wallet => "wallet",
        }
    }

    /// Tab-bar hotkey.
    pub fn hotkey(&self) -> char {
        match self {
            ViewId::Dashboard => '1',
            ViewId::Analytics => '2',
            ViewId::Parameters => '3',
            ViewId::Mempool => '4',
            ViewId::Decentralization => '5',
            ViewId::Explorer => '6',
            ViewId::History => '7',
            ViewId::Wallet => '8',
        }
    }

    /// Resolve a key press to a view. Digits and mnemonic letters both work.
    pub fn from_hotkey(key: char) -> Option<ViewId> {
        match key {
            '1' | 'd' => Some(ViewId::Dashboard),
            '2' | 'a' => Some(ViewId::Analytics),
            '3' | 'p' => Some(ViewId::Parameters),
            '4' | 'm' => Some(ViewId::Mempool),
            '5' | 'c' => Some(ViewId::Decentralization),
            '6' | 'e' => Some(ViewId::Explorer),
            '7' | 'h' => Some(ViewId::History),
            '8' | 'w' => Some(ViewId::Wallet),
            _ => None,
        }
    }

    /// Position in the tab bar.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// A fetched snapshot, tagged with the view it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Dashboard {
        analytics: AnalyticsSnapshot,
        balances: Balances,
    },
    Analytics(AnalyticsSnapshot),
    Parameters(NetworkParams),
    Mempool(Vec<Transaction>),
    Decentralization(AnalyticsSnapshot),
    Explorer(Vec<Block>),
    History(Vec<Transaction>),
    Wallet(Balances),
}

impl ViewData {
    pub fn view(&self) -> ViewId {
        match self {
            ViewData::Dashboard { .. } => ViewId::Dashboard,
            ViewData::Analytics(_) => ViewId::Analytics,
            ViewData::Parameters(_) => ViewId::Parameters,
            ViewData::Mempool(_) => ViewId::Mempool,
            ViewData::Decentralization(_) => ViewId::Decentralization,
            ViewData::Explorer(_) => ViewId::Explorer,
            ViewData::History(_) => ViewId::History,
            ViewData::Wallet(_) => ViewId::Wallet,
        }
    }
}

/// Contents of a view's body area.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    /// Selected but no cycle has completed yet.
    Loading,
    Ready(ViewData),
    /// The latest cycle failed; earlier data is gone.
    Failed,
}

/// Request for exactly one run of a view's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub view: ViewId,
    pub generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_round_trip() {
        for view in ViewId::ALL {
            assert_eq!(ViewId::from_hotkey(view.hotkey()), Some(view));
        }
        assert_eq!(ViewId::from_hotkey('w'), Some(ViewId::Wallet));
        assert_eq!(ViewId::from_hotkey('z'), None);
    }

    #[test]
    fn test_default_view_is_first_tab() {
        assert_eq!(ViewId::DEFAULT, ViewId::ALL[0]);
        assert_eq!(ViewId::Wallet.index(), 7);
    }

    #[test]
    fn test_view_data_tags() {
        assert_eq!(ViewData::Mempool(vec![]).view(), ViewId::Mempool);
        assert_eq!(
            ViewData::Wallet(Balances::new()).view(),
            ViewId::Wallet
        );
    }
}
