//! Derived presentation data
//!
//! The core computes these view-models; a frontend just renders them. Each
//! builder takes the active currency explicitly so every formatted amount in
//! one view is denominated consistently.

use crate::{
    constants::DESCRIPTION_SENTENCES,
    format::{format_change, format_currency},
    types::{AlertDirection, CoinDetail, CoinSnapshot, Currency, PriceAlert, PriceSeries},
};

/// Chart-ready arrays derived from a price series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    /// One localized date label per sample
    pub labels: Vec<String>,
    /// One price per sample, same order as `labels`
    pub prices: Vec<f64>,
}

/// Maps a price series into chart-ready label/price arrays
pub fn chart_data(series: &PriceSeries) -> ChartData {
    ChartData {
        labels: series
            .points
            .iter()
            .map(|point| point.timestamp.format("%-m/%-d/%Y").to_string())
            .collect(),
        prices: series.points.iter().map(|point| point.price).collect(),
    }
}

/// First sentences of a coin description, the way the modal excerpts it
pub fn description_excerpt(description: &str) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    let leading: Vec<&str> = description
        .split(". ")
        .take(DESCRIPTION_SENTENCES)
        .collect();
    Some(format!("{}.", leading.join(". ").trim_end_matches('.')))
}

/// One coin card in the listing grid
#[derive(Debug, Clone, PartialEq)]
pub struct CoinCard {
    pub coin_id: String,
    pub name: String,
    /// Ticker rendered uppercase
    pub symbol: String,
    pub image: String,
    pub price_label: String,
    pub change_label: String,
    /// Drives the up/down trend coloring; flat counts as up
    pub change_positive: bool,
    pub sparkline: Vec<f64>,
    pub bookmarked: bool,
}

impl CoinCard {
    /// Builds a card from a listing snapshot
    pub fn from_snapshot(snapshot: &CoinSnapshot, currency: Currency, bookmarked: bool) -> Self {
        let change = snapshot.price_change_24h.unwrap_or(0.0);
        Self {
            coin_id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            symbol: snapshot.symbol.to_uppercase(),
            image: snapshot.image.clone(),
            price_label: format_currency(snapshot.current_price, currency),
            change_label: format_change(change),
            change_positive: change >= 0.0,
            sparkline: snapshot.sparkline_7d.clone().unwrap_or_default(),
            bookmarked,
        }
    }
}

/// The coin detail modal: header figures, 7-day chart, description excerpt
#[derive(Debug, Clone, PartialEq)]
pub struct CoinModal {
    pub coin_id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub price_label: String,
    pub change_label: String,
    pub change_positive: bool,
    pub market_cap_label: String,
    pub volume_label: String,
    pub chart: ChartData,
    /// First sentences of the description; `None` hides the about section
    pub about: Option<String>,
}

impl CoinModal {
    /// Builds the modal from the selected snapshot, its fetched detail, and
    /// its fetched history
    pub fn new(
        snapshot: &CoinSnapshot,
        detail: &CoinDetail,
        series: &PriceSeries,
        currency: Currency,
    ) -> Self {
        let change = snapshot.price_change_24h.unwrap_or(0.0);
        Self {
            coin_id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            symbol: snapshot.symbol.to_uppercase(),
            image: snapshot.image.clone(),
            price_label: format_currency(snapshot.current_price, currency),
            change_label: format_change(change),
            change_positive: change >= 0.0,
            market_cap_label: format_currency(snapshot.market_cap, currency),
            volume_label: format_currency(snapshot.total_volume, currency),
            chart: chart_data(series),
            about: description_excerpt(&detail.description),
        }
    }
}

/// One row of the active-alerts panel
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    pub alert_id: uuid::Uuid,
    pub coin_name: String,
    pub image: String,
    pub direction: AlertDirection,
    /// Arrow plus formatted target, e.g. `↑ $50,000.00`
    pub label: String,
}

/// Builds panel rows for every alert whose coin appears in the listing
///
/// Alerts targeting coins absent from the current listing produce no row;
/// they stay stored and reappear when their coin does.
pub fn alert_rows(
    alerts: &[PriceAlert],
    listing: &[CoinSnapshot],
    currency: Currency,
) -> Vec<AlertRow> {
    alerts
        .iter()
        .filter_map(|alert| {
            let coin = listing.iter().find(|coin| coin.id == alert.coin_id)?;
            Some(AlertRow {
                alert_id: alert.id,
                coin_name: coin.name.clone(),
                image: coin.image.clone(),
                direction: alert.direction,
                label: format!(
                    "{} {}",
                    alert.direction.arrow(),
                    format_currency(alert.target_price, currency)
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use crate::types::PricePoint;
    use chrono::{TimeZone, Utc};

    #[test]
    fn chart_labels_are_localized_dates() {
        let series = PriceSeries {
            coin_id: "bitcoin".to_string(),
            currency: Currency::USD,
            points: vec![
                PricePoint {
                    timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
                    price: 64_000.0,
                },
                PricePoint {
                    timestamp: Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap(),
                    price: 65_500.0,
                },
            ],
        };

        let chart = chart_data(&series);
        assert_eq!(chart.labels, ["3/5/2024", "3/6/2024"]);
        assert_eq!(chart.prices, [64_000.0, 65_500.0]);
    }

    #[test]
    fn excerpt_takes_the_first_three_sentences() {
        let text = "One. Two. Three. Four. Five.";
        assert_eq!(description_excerpt(text).unwrap(), "One. Two. Three.");

        assert_eq!(description_excerpt("Short one.").unwrap(), "Short one.");
        assert_eq!(description_excerpt("No trailing period").unwrap(), "No trailing period.");
        assert!(description_excerpt("").is_none());
    }

    #[test]
    fn card_formats_in_the_active_currency() {
        let snapshot = MockProvider::snapshot("bitcoin", "Bitcoin", "btc", 50_000.0);
        let card = CoinCard::from_snapshot(&snapshot, Currency::USD, true);

        assert_eq!(card.symbol, "BTC");
        assert_eq!(card.price_label, "$50,000.00");
        assert_eq!(card.change_label, "+1.00%");
        assert!(card.change_positive);
        assert!(card.bookmarked);
    }

    #[test]
    fn negative_change_marks_the_card_down() {
        let mut snapshot = MockProvider::snapshot("bitcoin", "Bitcoin", "btc", 50_000.0);
        snapshot.price_change_24h = Some(-2.5);
        let card = CoinCard::from_snapshot(&snapshot, Currency::USD, false);
        assert_eq!(card.change_label, "-2.50%");
        assert!(!card.change_positive);
    }

    #[test]
    fn alert_rows_only_cover_coins_present_in_the_listing() {
        let listing = vec![MockProvider::snapshot("bitcoin", "Bitcoin", "btc", 64_000.0)];
        let alerts = vec![
            PriceAlert::new("bitcoin", 50_000.0, AlertDirection::Above),
            PriceAlert::new("dogecoin", 1.0, AlertDirection::Below),
        ];

        let rows = alert_rows(&alerts, &listing, Currency::USD);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].coin_name, "Bitcoin");
        assert_eq!(rows[0].label, "↑ $50,000.00");
    }
}
