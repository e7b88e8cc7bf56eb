//! Compiled-in registry of feed sources.
//!
//! The registry is ordered: aggregation visits sources in the order they are
//! listed here, English sources first, then Turkish ones.
//!
//! | Source | Language | Format |
//! |--------|----------|--------|
//! | CoinDesk, Cointelegraph EN, Decrypt, TokenPost, CryptoNews, Bitcoinist, NewsBTC, Blockchain.News, CryptoPotato | `en` | RSS |
//! | CoolWallet | `en` | Atom |
//! | Cointelegraph TR, Coin-Turk, Uzmancoin, CoinOtag, Coinkolik, BitcoinSistemi, Kriptofoni, Ekoturk, BeInCrypto TR | `tr` | RSS |

use crate::models::{Language, LanguageFilter, Source};

const fn source(name: &'static str, feed_url: &'static str, language: Language) -> Source {
    Source {
        name,
        feed_url,
        language,
    }
}

/// Every source the aggregator knows about.
pub const SOURCES: &[Source] = &[
    source("CoinDesk", "https://www.coindesk.com/arc/outboundfeeds/rss/", Language::En),
    source("Cointelegraph EN", "https://cointelegraph.com/rss", Language::En),
    source("Decrypt", "https://decrypt.co/feed", Language::En),
    source("TokenPost", "https://www.tokenpost.com/rss", Language::En),
    source("CryptoNews", "https://cryptonews.com/feed/", Language::En),
    source("Bitcoinist", "https://bitcoinist.com/feed/", Language::En),
    source("NewsBTC", "https://www.newsbtc.com/feed/", Language::En),
    source("Blockchain.News", "https://blockchain.news/rss", Language::En),
    source("CryptoPotato", "https://cryptopotato.com/feed/", Language::En),
    source("CoolWallet", "https://www.coolwallet.io/blogs/blog.atom", Language::En),
    source("Cointelegraph TR", "https://tr.cointelegraph.com/rss", Language::Tr),
    source("Coin-Turk", "https://coin-turk.com/feed/", Language::Tr),
    source("Uzmancoin", "https://uzmancoin.com/feed/", Language::Tr),
    source("CoinOtag", "https://coinotag.com/feed/", Language::Tr),
    source("Coinkolik", "https://www.coinkolik.com/feed/", Language::Tr),
    source("BitcoinSistemi", "https://www.bitcoinsistemi.com/feed/", Language::Tr),
    source("Kriptofoni", "https://www.kriptofoni.com/feed/", Language::Tr),
    source("Ekoturk", "https://www.ekoturk.com/feed/", Language::Tr),
    source("BeInCrypto TR", "https://tr.beincrypto.com/feed/", Language::Tr),
];

/// Select the sources a filter applies to, keeping registry order.
pub fn select(sources: &[Source], filter: LanguageFilter) -> Vec<&Source> {
    sources
        .iter()
        .filter(|source| filter.matches(source.language))
        .collect()
}
