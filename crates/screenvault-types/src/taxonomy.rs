//! Closed vocabularies used to tag apps and screens.
//!
//! Every value serializes by its display name, which is also the form
//! used in catalog JSON and pattern library YAML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $display:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $display)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display name as used in data files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }

            /// URL slug derived from the display name
            pub fn slug(&self) -> String {
                crate::slugify(self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            /// Accepts either the display name or its slug, case-insensitively
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = crate::slugify(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.slug() == wanted)
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), s))
            }
        }
    };
}

taxonomy! {
    /// App category
    Category {
        Wallet => "Wallet",
        Exchange => "Exchange",
        DeFi => "DeFi",
        Bridge => "Bridge",
        Nft => "NFT",
        Analytics => "Analytics",
    }
}

taxonomy! {
    /// A named user journey grouping screens within an app
    FlowType {
        Onboarding => "Onboarding",
        Home => "Home",
        Swap => "Swap",
        Send => "Send",
        Receive => "Receive",
        Buy => "Buy",
        Staking => "Staking",
        Bridge => "Bridge",
        Portfolio => "Portfolio",
        Trading => "Trading",
        Lending => "Lending",
        Nft => "NFT",
        Settings => "Settings",
        Security => "Security",
    }
}

taxonomy! {
    /// UI element a screen exhibits
    ElementTag {
        WalletConnectButton => "Wallet Connect Button",
        NetworkSelector => "Network Selector",
        ModalDialog => "Modal / Dialog",
        BottomSheet => "Bottom Sheet",
        TokenSelector => "Token Selector",
        AmountInput => "Amount Input",
        BalanceDisplay => "Balance Display",
        TransactionList => "Transaction List",
        PriceChart => "Price Chart",
        QrCode => "QR Code",
        SeedPhrase => "Seed Phrase",
        BiometricPrompt => "Biometric Prompt",
        ToastNotification => "Toast / Notification",
        TabBar => "Tab Bar",
        SearchBar => "Search Bar",
        EmptyState => "Empty State",
        LoadingSkeleton => "Loading Skeleton",
        ConfirmationSummary => "Confirmation Summary",
        GasFeeDisplay => "Gas Fee Display",
        SlippageControl => "Slippage Control",
        AddressInput => "Address Input",
        AssetCard => "Asset Card",
        ProgressStepper => "Progress Stepper",
        SecurityWarning => "Security Warning",
        SettingsList => "Settings List",
        NftGrid => "NFT Grid",
    }
}

taxonomy! {
    /// Blockchain an app supports
    ChainType {
        Ethereum => "Ethereum",
        Solana => "Solana",
        Bitcoin => "Bitcoin",
        Polygon => "Polygon",
        Arbitrum => "Arbitrum",
        Optimism => "Optimism",
        Base => "Base",
        BnbChain => "BNB Chain",
        Avalanche => "Avalanche",
        Cosmos => "Cosmos",
        MultiChain => "Multi-chain",
    }
}

taxonomy! {
    /// Visual style an app is filed under
    StyleType {
        Dark => "Dark",
        Light => "Light",
        Minimal => "Minimal",
        Gradient => "Gradient",
        Glassmorphism => "Glassmorphism",
        Playful => "Playful",
        Professional => "Professional",
    }
}
