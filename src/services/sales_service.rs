// src/services/sales_service.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::SalesRepository,
    models::sales::{
        DailyTotal, DateRange, SaleRecord, SalesPeriod, SalesSummary, SalesSummaryResult,
        TopCityEntry, TopDayEntry,
    },
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MOVING_AVERAGE_WINDOW: usize = 3;
pub const TOP_DAYS_LIMIT: usize = 5;

const NO_DATA_MESSAGE: &str = "Nenhuma venda encontrada para o período informado";

// =========================================================================
//  O pipeline de agregação (funções puras, síncronas)
// =========================================================================

// 1. Validação do intervalo.
// `today` vem de fora para a função continuar determinística nos testes.
pub fn validate_date_range(
    start_str: &str,
    end_str: &str,
    today: NaiveDate,
) -> Result<DateRange, AppError> {
    let start = NaiveDate::parse_from_str(start_str, DATE_FORMAT)
        .map_err(|_| AppError::InvalidDateFormat)?;
    let end = NaiveDate::parse_from_str(end_str, DATE_FORMAT)
        .map_err(|_| AppError::InvalidDateFormat)?;

    if start > end {
        return Err(AppError::InvalidRangeOrder);
    }
    if start > today || end > today {
        return Err(AppError::FutureDateNotAllowed);
    }

    Ok(DateRange { start, end })
}

// 2. Redução das linhas cruas para um total por dia.
// O BTreeMap garante as duas invariantes de uma vez: datas únicas e ordem
// cronológica crescente. Dias sem venda alguma não entram na série.
pub fn aggregate_daily(records: &[SaleRecord]) -> Vec<DailyTotal> {
    let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for record in records {
        // amount NULL vale zero para o dia; o dia continua na série
        let amount = record.amount.unwrap_or(Decimal::ZERO);
        *per_day.entry(record.sale_date).or_insert(Decimal::ZERO) += amount;
    }

    per_day
        .into_iter()
        .map(|(date, sales)| DailyTotal {
            date,
            sales,
            moving_average: None,
        })
        .collect()
}

// 3. Média móvel com janela deslizante sobre a série já ordenada.
// No início a janela é expansiva (mínimo 1 elemento), nunca null.
// Só anota: não reordena nem descarta entradas.
pub fn with_moving_average(mut series: Vec<DailyTotal>, window: usize) -> Vec<DailyTotal> {
    let window = window.max(1);

    for i in 0..series.len() {
        let from = i.saturating_sub(window - 1);
        let slice = &series[from..=i];
        let sum: Decimal = slice.iter().map(|d| d.sales).sum();
        let mean = (sum / Decimal::from(slice.len() as u64)).round_dp(2);
        series[i].moving_average = Some(mean);
    }

    series
}

// 4. Os n dias de maior faturamento, em ordem decrescente.
// O sort é estável: empates preservam a ordem cronológica da série.
pub fn select_top_days(series: &[DailyTotal], n: usize) -> Vec<TopDayEntry> {
    let mut ranked: Vec<&DailyTotal> = series.iter().collect();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));

    ranked
        .into_iter()
        .take(n)
        .map(|day| TopDayEntry {
            date: day.date,
            sales: day.sales,
        })
        .collect()
}

// 5. Montagem do payload final.
// Série vazia vira a resposta canônica de "sem dados": summary zerado,
// campo `error` preenchido e coleções vazias. Sucesso, não falha.
pub fn assemble_summary(
    range: &DateRange,
    series: Vec<DailyTotal>,
    top_days: Vec<TopDayEntry>,
) -> SalesSummaryResult {
    let total_sales: Decimal = series.iter().map(|d| d.sales).sum();
    let error = if series.is_empty() {
        Some(NO_DATA_MESSAGE.to_string())
    } else {
        None
    };

    SalesSummaryResult {
        summary: SalesSummary {
            total_days: series.len(),
            total_sales,
            period: SalesPeriod {
                start_date: range.start,
                end_date: range.end,
            },
        },
        error,
        moving_average: series,
        top_days,
    }
}

// =========================================================================
//  O serviço (amarra o repositório ao pipeline)
// =========================================================================

#[derive(Clone)]
pub struct SalesService {
    repo: SalesRepository,
}

impl SalesService {
    pub fn new(repo: SalesRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, range: &DateRange) -> Result<SalesSummaryResult, AppError> {
        let records = self
            .repo
            .fetch_sales_by_date(range.start, range.end)
            .await?;

        // Período sem vendas é um ramo de primeira classe, não uma exceção.
        if records.is_empty() {
            return Ok(assemble_summary(range, Vec::new(), Vec::new()));
        }

        let daily = aggregate_daily(&records);
        let daily = with_moving_average(daily, MOVING_AVERAGE_WINDOW);
        let top_days = select_top_days(&daily, TOP_DAYS_LIMIT);

        Ok(assemble_summary(range, daily, top_days))
    }

    pub async fn get_top_cities(&self, range: &DateRange) -> Result<Vec<TopCityEntry>, AppError> {
        self.repo
            .fetch_top_cities_by_monthly_sales(range.start, range.end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(date: &str, amount: Decimal) -> SaleRecord {
        SaleRecord {
            sale_date: d(date),
            amount: Some(amount),
        }
    }

    fn series_of(days: &[(&str, Decimal)]) -> Vec<DailyTotal> {
        days.iter()
            .map(|(date, sales)| DailyTotal {
                date: d(date),
                sales: *sales,
                moving_average: None,
            })
            .collect()
    }

    const TODAY: &str = "2024-06-15";

    // --- validação ---

    #[test]
    fn validate_accepts_well_ordered_past_range() {
        let range = validate_date_range("2024-01-01", "2024-02-01", d(TODAY)).unwrap();
        assert_eq!(range.start, d("2024-01-01"));
        assert_eq!(range.end, d("2024-02-01"));
    }

    #[test]
    fn validate_accepts_single_day_range_up_to_today() {
        let range = validate_date_range(TODAY, TODAY, d(TODAY)).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn validate_rejects_malformed_dates() {
        for input in ["2024/01/01", "01-02-2024", "2024-13-01", "hoje", ""] {
            let result = validate_date_range(input, "2024-02-01", d(TODAY));
            assert!(
                matches!(result, Err(AppError::InvalidDateFormat)),
                "aceitou entrada inválida: {input:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let result = validate_date_range("2024-02-01", "2024-01-01", d(TODAY));
        assert!(matches!(result, Err(AppError::InvalidRangeOrder)));
    }

    #[test]
    fn validate_rejects_future_dates() {
        let result = validate_date_range("2024-06-10", "2024-06-16", d(TODAY));
        assert!(matches!(result, Err(AppError::FutureDateNotAllowed)));
    }

    // --- agregação ---

    #[test]
    fn aggregate_groups_by_day_and_sums() {
        let records = vec![
            record("2024-01-01", dec!(100)),
            record("2024-01-01", dec!(50)),
            record("2024-01-02", dec!(200)),
        ];
        let daily = aggregate_daily(&records);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, d("2024-01-01"));
        assert_eq!(daily[0].sales, dec!(150));
        assert_eq!(daily[1].date, d("2024-01-02"));
        assert_eq!(daily[1].sales, dec!(200));
    }

    #[test]
    fn aggregate_sorts_unordered_input_chronologically() {
        let records = vec![
            record("2024-01-03", dec!(30)),
            record("2024-01-01", dec!(10)),
            record("2024-01-02", dec!(20)),
        ];
        let dates: Vec<NaiveDate> = aggregate_daily(&records).iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
    }

    #[test]
    fn aggregate_counts_null_amount_as_zero_for_the_day() {
        let records = vec![
            SaleRecord {
                sale_date: d("2024-01-01"),
                amount: None,
            },
            record("2024-01-01", dec!(40)),
            SaleRecord {
                sale_date: d("2024-01-02"),
                amount: None,
            },
        ];
        let daily = aggregate_daily(&records);
        // o dia só com NULL continua presente, com total zero
        assert_eq!(daily[0].sales, dec!(40));
        assert_eq!(daily[1].date, d("2024-01-02"));
        assert_eq!(daily[1].sales, Decimal::ZERO);
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    // --- média móvel ---

    #[test]
    fn moving_average_expands_window_at_series_start() {
        let series = series_of(&[("2024-01-01", dec!(150)), ("2024-01-02", dec!(200))]);
        let annotated = with_moving_average(series, 3);
        assert_eq!(annotated[0].moving_average, Some(dec!(150.00)));
        assert_eq!(annotated[1].moving_average, Some(dec!(175.00)));
    }

    #[test]
    fn moving_average_uses_trailing_window_of_three() {
        let series = series_of(&[
            ("2024-01-01", dec!(10)),
            ("2024-01-02", dec!(20)),
            ("2024-01-03", dec!(30)),
            ("2024-01-04", dec!(40)),
        ]);
        let annotated = with_moving_average(series, 3);
        let averages: Vec<Decimal> = annotated
            .iter()
            .map(|t| t.moving_average.unwrap())
            .collect();
        assert_eq!(averages, vec![dec!(10), dec!(15), dec!(20), dec!(30)]);
    }

    #[test]
    fn moving_average_rounds_to_two_decimal_places() {
        let series = series_of(&[
            ("2024-01-01", dec!(10)),
            ("2024-01-02", dec!(20)),
            ("2024-01-03", dec!(25)),
        ]);
        let annotated = with_moving_average(series, 3);
        // 55 / 3 = 18.333...
        assert_eq!(annotated[2].moving_average, Some(dec!(18.33)));
    }

    #[test]
    fn moving_average_preserves_order_and_length() {
        let series = series_of(&[
            ("2024-01-01", dec!(5)),
            ("2024-01-02", dec!(15)),
            ("2024-01-03", dec!(25)),
        ]);
        let annotated = with_moving_average(series.clone(), 3);
        assert_eq!(annotated.len(), series.len());
        for (before, after) in series.iter().zip(&annotated) {
            assert_eq!(before.date, after.date);
            assert_eq!(before.sales, after.sales);
        }
    }

    #[test]
    fn moving_average_with_window_one_echoes_the_series() {
        let series = series_of(&[("2024-01-01", dec!(7.5)), ("2024-01-02", dec!(2.25))]);
        let annotated = with_moving_average(series, 1);
        assert_eq!(annotated[0].moving_average, Some(dec!(7.5)));
        assert_eq!(annotated[1].moving_average, Some(dec!(2.25)));
    }

    // --- top dias ---

    #[test]
    fn top_days_returns_five_highest_in_descending_order() {
        let series = series_of(&[
            ("2024-01-01", dec!(10)),
            ("2024-01-02", dec!(50)),
            ("2024-01-03", dec!(5)),
            ("2024-01-04", dec!(90)),
            ("2024-01-05", dec!(20)),
            ("2024-01-06", dec!(80)),
            ("2024-01-07", dec!(30)),
        ]);
        let top = select_top_days(&series, 5);
        let sales: Vec<Decimal> = top.iter().map(|t| t.sales).collect();
        assert_eq!(sales, vec![dec!(90), dec!(80), dec!(50), dec!(30), dec!(20)]);
    }

    #[test]
    fn top_days_breaks_ties_by_earliest_date() {
        let series = series_of(&[
            ("2024-01-01", dec!(50)),
            ("2024-01-02", dec!(80)),
            ("2024-01-03", dec!(50)),
        ]);
        let top = select_top_days(&series, 3);
        assert_eq!(top[0].date, d("2024-01-02"));
        // os dois empatados em 50 saem em ordem cronológica
        assert_eq!(top[1].date, d("2024-01-01"));
        assert_eq!(top[2].date, d("2024-01-03"));
    }

    #[test]
    fn top_days_returns_everything_when_series_is_short() {
        let series = series_of(&[("2024-01-01", dec!(10)), ("2024-01-02", dec!(20))]);
        assert_eq!(select_top_days(&series, 5).len(), 2);
    }

    #[test]
    fn top_days_with_zero_limit_is_empty() {
        let series = series_of(&[("2024-01-01", dec!(10))]);
        assert!(select_top_days(&series, 0).is_empty());
    }

    // --- montagem ---

    fn sample_range() -> DateRange {
        DateRange {
            start: d("2024-01-01"),
            end: d("2024-01-31"),
        }
    }

    #[test]
    fn assemble_on_empty_series_signals_no_data_without_failing() {
        let result = assemble_summary(&sample_range(), Vec::new(), Vec::new());
        assert_eq!(result.summary.total_days, 0);
        assert_eq!(result.summary.total_sales, Decimal::ZERO);
        assert!(!result.error.as_deref().unwrap().is_empty());
        assert!(result.moving_average.is_empty());
        assert!(result.top_days.is_empty());
    }

    #[test]
    fn assemble_totals_match_the_series() {
        let series = with_moving_average(
            series_of(&[("2024-01-01", dec!(150)), ("2024-01-02", dec!(200))]),
            MOVING_AVERAGE_WINDOW,
        );
        let top = select_top_days(&series, TOP_DAYS_LIMIT);
        let result = assemble_summary(&sample_range(), series, top);

        assert_eq!(result.summary.total_days, 2);
        assert_eq!(result.summary.total_sales, dec!(350));
        assert!(result.error.is_none());

        // invariante: total_sales é a soma das entradas de moving_average
        let recomputed: Decimal = result.moving_average.iter().map(|t| t.sales).sum();
        assert_eq!(result.summary.total_sales, recomputed);
    }

    #[test]
    fn pipeline_output_is_deterministic() {
        let records = vec![
            record("2024-01-02", dec!(200)),
            record("2024-01-01", dec!(100)),
            record("2024-01-01", dec!(50)),
        ];

        let run = || {
            let daily = with_moving_average(aggregate_daily(&records), MOVING_AVERAGE_WINDOW);
            let top = select_top_days(&daily, TOP_DAYS_LIMIT);
            let result = assemble_summary(&sample_range(), daily, top);
            serde_json::to_string(&result).unwrap()
        };

        assert_eq!(run(), run());
    }
}
