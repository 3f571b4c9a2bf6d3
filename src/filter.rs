//! Listing filter
//!
//! Pure, deterministic narrowing of a listing by search term and bookmark
//! membership. An empty term matches everything; matching is a
//! case-insensitive substring test against name and symbol.

use crate::types::CoinSnapshot;

/// Filters a listing by search term and, when `bookmarked_only` is set, by
/// bookmark membership
///
/// Returns a subsequence of `coins` in their original order.
pub fn filter_listing<'a>(
    coins: &'a [CoinSnapshot],
    term: &str,
    bookmarks: &[String],
    bookmarked_only: bool,
) -> Vec<&'a CoinSnapshot> {
    let needle = term.to_lowercase();
    coins
        .iter()
        .filter(|coin| {
            let matches_search = coin.name.to_lowercase().contains(&needle)
                || coin.symbol.to_lowercase().contains(&needle);
            if bookmarked_only {
                matches_search && bookmarks.iter().any(|id| *id == coin.id)
            } else {
                matches_search
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    fn listing() -> Vec<CoinSnapshot> {
        vec![
            MockProvider::snapshot("bitcoin", "Bitcoin", "btc", 64_000.0),
            MockProvider::snapshot("ethereum", "Ethereum", "eth", 3_000.0),
            MockProvider::snapshot("bitcoin-cash", "Bitcoin Cash", "bch", 400.0),
            MockProvider::snapshot("solana", "Solana", "sol", 150.0),
        ]
    }

    fn ids<'a>(filtered: &'a [&'a CoinSnapshot]) -> Vec<&'a str> {
        filtered.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn empty_term_matches_everything() {
        let coins = listing();
        let filtered = filter_listing(&coins, "", &[], false);
        assert_eq!(filtered.len(), coins.len());
    }

    #[test]
    fn term_matches_name_or_symbol_case_insensitively() {
        let coins = listing();
        assert_eq!(
            ids(&filter_listing(&coins, "BIT", &[], false)),
            ["bitcoin", "bitcoin-cash"]
        );
        assert_eq!(ids(&filter_listing(&coins, "eTh", &[], false)), ["ethereum"]);
        assert_eq!(ids(&filter_listing(&coins, "SOL", &[], false)), ["solana"]);
        assert!(filter_listing(&coins, "dogecoin", &[], false).is_empty());
    }

    #[test]
    fn bookmarked_only_intersects_with_the_bookmark_set() {
        let coins = listing();
        let bookmarks = vec!["bitcoin".to_string(), "solana".to_string()];

        assert_eq!(
            ids(&filter_listing(&coins, "", &bookmarks, true)),
            ["bitcoin", "solana"]
        );
        assert_eq!(
            ids(&filter_listing(&coins, "bit", &bookmarks, true)),
            ["bitcoin"]
        );
    }

    #[test]
    fn bookmarked_only_with_no_bookmarks_is_empty() {
        let coins = listing();
        assert!(filter_listing(&coins, "", &[], true).is_empty());
        assert!(filter_listing(&coins, "bit", &[], true).is_empty());
    }
}
