//! Output formatting for comparison reports (annotation, table, JSON, markdown, CSV).

use crate::config::{AnnotationLayout, OutputFormat};
use crate::pricing::cache::RegionalPrice;
use crate::pricing::compare::CheaperSide;
use crate::pricing::money::Money;
use crate::pricing::pipeline::{ComparisonReport, Outcome};
use crate::steam::models::ProductRef;
use crate::steam::regions::Region;
use serde::Serialize;

/// One row of a raw regional price listing.
#[derive(Debug, Serialize)]
struct RegionalPriceRow<'a> {
    product: &'a ProductRef,
    region: Region,
    #[serde(flatten)]
    price: &'a RegionalPrice,
}

/// Formats comparison reports for output.
pub struct Formatter {
    format: OutputFormat,
    layout: AnnotationLayout,
}

impl Formatter {
    /// Creates a new formatter with the inline annotation layout.
    pub fn new(format: OutputFormat) -> Self {
        Self { format, layout: AnnotationLayout::default() }
    }

    /// Sets how annotation parts are joined.
    pub fn with_layout(mut self, layout: AnnotationLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Formats a single report.
    pub fn format_report(&self, report: &ComparisonReport) -> String {
        match self.format {
            OutputFormat::Annotation => self.annotation(report),
            OutputFormat::Json => self.json_single(report),
            OutputFormat::Table => self.table_single(report),
            OutputFormat::Markdown => self.markdown_single(report),
            OutputFormat::Csv => self.csv_reports(std::slice::from_ref(report)),
        }
    }

    /// Formats multiple reports.
    pub fn format_reports(&self, reports: &[ComparisonReport]) -> String {
        if reports.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products compared.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Annotation => reports
                .iter()
                .map(|report| format!("{}: {}", report.product, self.annotation(report)))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json => self.json_reports(reports),
            OutputFormat::Table => self.table_reports(reports),
            OutputFormat::Markdown => self.markdown_reports(reports),
            OutputFormat::Csv => self.csv_reports(reports),
        }
    }

    /// Formats the raw prices of one product across regions.
    pub fn format_regional_prices(
        &self,
        product: &ProductRef,
        prices: &[(Region, RegionalPrice)],
    ) -> String {
        match self.format {
            OutputFormat::Annotation => prices
                .iter()
                .map(|(region, price)| format!("{}: {}", region.label(), short_price(price)))
                .collect::<Vec<_>>()
                .join(self.layout.separator()),
            OutputFormat::Json => {
                let rows: Vec<_> = prices
                    .iter()
                    .map(|(region, price)| RegionalPriceRow { product, region: *region, price })
                    .collect();
                serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("Product: {}", product), String::new()];
                lines.push(format!("{:<8}  {:<16}  {}", "Region", "Price", "Country"));
                lines.push(format!("{:-<8}  {:-<16}  {:-<16}", "", "", ""));
                for (region, price) in prices {
                    lines.push(format!(
                        "{:<8}  {:<16}  {}",
                        region.label(),
                        long_price(price),
                        region.name()
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("## {}", product), String::new()];
                lines.push("| Region | Price |".to_string());
                lines.push("|--------|-------|".to_string());
                for (region, price) in prices {
                    lines.push(format!("| {} | {} |", region.label(), long_price(price)));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec!["product,region,status,amount,currency".to_string()];
                for (region, price) in prices {
                    let (status, amount, currency) = csv_price(price);
                    lines.push(format!(
                        "{},{},{},{},{}",
                        product,
                        region.code(),
                        status,
                        amount,
                        currency
                    ));
                }
                lines.join("\n")
            }
        }
    }

    // Annotation formatting

    /// Renders the storefront annotation for a report, e.g. `KZ: 800₽ (-20%)`.
    ///
    /// When the reference price was converted, its estimate comes first and the
    /// difference is spelled out.
    pub fn annotation(&self, report: &ComparisonReport) -> String {
        let mut parts = Vec::new();
        let label = report.compared_region.label();

        if let Outcome::ReferenceFree { compared } = &report.outcome {
            parts.push(format!("{}: free", report.reference_region.label()));
            parts.push(match compared {
                Some(price) => format!("{}: {}", label, price.rounded()),
                None => match report.compared_native {
                    RegionalPrice::Free => format!("{}: free", label),
                    _ => format!("({} price unavailable)", label),
                },
            });
            return parts.join(self.layout.separator());
        }

        let converted = report.reference_native.currency != report.display_currency;

        if converted {
            parts.push(format!("≈ {}", report.reference_display.rounded()));
        }

        match &report.outcome {
            Outcome::Compared(result) if converted => {
                let diff = if result.percent_diff == 0 {
                    "same price".to_string()
                } else {
                    format!("{} by {}%", result.verdict(), result.percent_diff)
                };
                parts.push(format!("{}: {} ({})", label, result.compared_price.rounded(), diff));
            }
            Outcome::Compared(result) => {
                parts.push(format!(
                    "{}: {} ({:+}%)",
                    label,
                    result.compared_price.rounded(),
                    result.signed_percent()
                ));
            }
            Outcome::Free => parts.push(format!("{}: free", label)),
            Outcome::Unavailable | Outcome::ReferenceFree { .. } => {
                parts.push(format!("({} price unavailable)", label))
            }
        }

        parts.join(self.layout.separator())
    }

    // JSON formatting

    fn json_single(&self, report: &ComparisonReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_reports(&self, reports: &[ComparisonReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, report: &ComparisonReport) -> String {
        let mut lines = Vec::new();
        let reference_label = report.reference_region.label();
        let compared_label = report.compared_region.label();

        lines.push(format!("Product:   {}", report.product));
        if let Outcome::ReferenceFree { .. } = report.outcome {
            lines.push(format!("{:<10} Free", format!("{}:", reference_label)));
        } else {
            lines.push(format!(
                "{:<10} {} (≈ {})",
                format!("{}:", reference_label),
                report.reference_native,
                report.reference_display.rounded()
            ));
        }

        match &report.outcome {
            Outcome::Compared(result) => {
                lines.push(format!(
                    "{:<10} {} (≈ {})",
                    format!("{}:", compared_label),
                    long_price(&report.compared_native),
                    result.compared_price.rounded()
                ));
                let verdict = if result.percent_diff == 0 {
                    format!("{} has the same price", compared_label)
                } else {
                    format!("{} is {} by {}%", compared_label, result.verdict(), result.percent_diff)
                };
                lines.push(format!("Verdict:   {}", verdict));
            }
            Outcome::Free => {
                lines.push(format!("{:<10} Free", format!("{}:", compared_label)));
            }
            Outcome::Unavailable => {
                lines.push(format!("{:<10} N/A", format!("{}:", compared_label)));
            }
            Outcome::ReferenceFree { compared } => {
                let estimate =
                    compared.map(|price| format!(" (≈ {})", price.rounded())).unwrap_or_default();
                lines.push(format!(
                    "{:<10} {}{}",
                    format!("{}:", compared_label),
                    long_price(&report.compared_native),
                    estimate
                ));
                lines.push(format!("Verdict:   free in {}", reference_label));
            }
        }

        for rate in &report.rates {
            lines.push(format!("Rate:      {}", rate));
        }

        lines.join("\n")
    }

    fn table_reports(&self, reports: &[ComparisonReport]) -> String {
        let product_width = 14;
        let price_width = 12;
        let diff_width = 6;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<product_width$}  {:<price_width$}  {:<price_width$}  {:<diff_width$}  {}",
            "Product", "Reference", "Compared", "Diff", "Verdict"
        ));
        lines.push(format!(
            "{:-<product_width$}  {:-<price_width$}  {:-<price_width$}  {:-<diff_width$}  {:-<16}",
            "", "", "", "", ""
        ));

        for report in reports {
            let reference = reference_cell(report);
            let compared_label = report.compared_region.label();
            let (compared, diff, verdict) = match &report.outcome {
                Outcome::Compared(result) => (
                    format!("{} {}", compared_label, result.compared_price.rounded()),
                    format!("{:+}%", result.signed_percent()),
                    result.verdict().to_string(),
                ),
                Outcome::Free => (format!("{} free", compared_label), String::new(), "free".into()),
                Outcome::Unavailable => {
                    (format!("{} N/A", compared_label), String::new(), "unavailable".into())
                }
                Outcome::ReferenceFree { compared } => (
                    compared_cell(report, compared),
                    String::new(),
                    "reference free".into(),
                ),
            };

            lines.push(format!(
                "{:<product_width$}  {:>price_width$}  {:>price_width$}  {:>diff_width$}  {}",
                report.product.to_string(),
                reference,
                compared,
                diff,
                verdict
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", reports.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, report: &ComparisonReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", report.product));
        lines.push(String::new());
        if let Outcome::ReferenceFree { .. } = report.outcome {
            lines.push(format!("- **{}:** Free", report.reference_region.label()));
        } else {
            lines.push(format!(
                "- **{}:** {} (≈ {})",
                report.reference_region.label(),
                report.reference_native,
                report.reference_display.rounded()
            ));
        }

        let compared_label = report.compared_region.label();
        match &report.outcome {
            Outcome::Compared(result) => {
                lines.push(format!(
                    "- **{}:** {} (≈ {})",
                    compared_label,
                    long_price(&report.compared_native),
                    result.compared_price.rounded()
                ));
                lines.push(format!("- **Difference:** {:+}%", result.signed_percent()));
            }
            Outcome::Free => lines.push(format!("- **{}:** Free", compared_label)),
            Outcome::Unavailable => {
                lines.push(format!("- **{}:** price unavailable", compared_label))
            }
            Outcome::ReferenceFree { .. } => lines.push(format!(
                "- **{}:** {}",
                compared_label,
                long_price(&report.compared_native)
            )),
        }

        lines.join("\n")
    }

    fn markdown_reports(&self, reports: &[ComparisonReport]) -> String {
        let mut lines = Vec::new();

        lines.push("| Product | Reference | Compared | Difference |".to_string());
        lines.push("|---------|-----------|----------|------------|".to_string());

        for report in reports {
            let compared_label = report.compared_region.label();
            let (compared, diff) = match &report.outcome {
                Outcome::Compared(result) => (
                    format!("{} {}", compared_label, result.compared_price.rounded()),
                    format!("{:+}%", result.signed_percent()),
                ),
                Outcome::Free => (format!("{} free", compared_label), String::new()),
                Outcome::Unavailable => (format!("{} N/A", compared_label), String::new()),
                Outcome::ReferenceFree { compared } => {
                    (compared_cell(report, compared), String::new())
                }
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                report.product,
                reference_cell(report),
                compared,
                diff
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products compared*", reports.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "product,reference_region,reference_price,reference_currency,reference_display,compared_region,compared_status,compared_price,compared_currency,compared_display,display_currency,percent_diff,cheaper_side"
            .to_string()
    }

    fn csv_reports(&self, reports: &[ComparisonReport]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for report in reports {
            let (status, compared_price, compared_currency) = csv_price(&report.compared_native);
            let (compared_display, percent, side) = match report.result() {
                Some(result) => (
                    result.compared_price.amount.to_string(),
                    result.percent_diff.to_string(),
                    match result.cheaper_side {
                        CheaperSide::Reference => "reference",
                        CheaperSide::Compared => "compared",
                    }
                    .to_string(),
                ),
                None => match report.outcome {
                    Outcome::ReferenceFree { compared: Some(price) } => {
                        (price.amount.to_string(), String::new(), String::new())
                    }
                    _ => Default::default(),
                },
            };

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                report.product,
                report.reference_region.code(),
                report.reference_native.amount,
                report.reference_native.currency,
                report.reference_display.amount,
                report.compared_region.code(),
                status,
                compared_price,
                compared_currency,
                compared_display,
                report.display_currency,
                percent,
                side
            ));
        }

        lines.join("\n")
    }
}

/// Reference column for list formats, e.g. `RU 1000₽` or `RU free`.
fn reference_cell(report: &ComparisonReport) -> String {
    let label = report.reference_region.label();
    match report.outcome {
        Outcome::ReferenceFree { .. } => format!("{} free", label),
        _ => format!("{} {}", label, report.reference_display.rounded()),
    }
}

/// Compared column when the reference side is free.
fn compared_cell(report: &ComparisonReport, compared: &Option<Money>) -> String {
    let label = report.compared_region.label();
    match compared {
        Some(price) => format!("{} {}", label, price.rounded()),
        None => format!("{} {}", label, short_price(&report.compared_native)),
    }
}

fn short_price(price: &RegionalPrice) -> String {
    match price {
        RegionalPrice::Priced(money) => money.rounded(),
        RegionalPrice::Free => "free".to_string(),
        RegionalPrice::Unavailable => "unavailable".to_string(),
    }
}

fn long_price(price: &RegionalPrice) -> String {
    match price {
        RegionalPrice::Priced(money) => money.to_string(),
        RegionalPrice::Free => "Free".to_string(),
        RegionalPrice::Unavailable => "N/A".to_string(),
    }
}

fn csv_price(price: &RegionalPrice) -> (&'static str, String, String) {
    match price {
        RegionalPrice::Priced(money) => {
            ("priced", money.amount.to_string(), money.currency.to_string())
        }
        RegionalPrice::Free => ("free", String::new(), String::new()),
        RegionalPrice::Unavailable => ("unavailable", String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compare::compare;
    use crate::pricing::money::{CurrencyCode, ExchangeRate};

    fn rub(amount: f64) -> Money {
        Money::new(amount, CurrencyCode::Rub)
    }

    fn kzt_rub() -> ExchangeRate {
        ExchangeRate::new(CurrencyCode::Kzt, CurrencyCode::Rub, 0.2).unwrap()
    }

    /// A ruble page price of 1000 against 4000 KZT (800 RUB).
    fn make_ruble_report() -> ComparisonReport {
        ComparisonReport {
            product: ProductRef::app("570"),
            reference_region: Region::Ru,
            compared_region: Region::Kz,
            reference_native: rub(1000.0),
            reference_display: rub(1000.0),
            compared_native: RegionalPrice::Priced(Money::new(4000.0, CurrencyCode::Kzt)),
            display_currency: CurrencyCode::Rub,
            rates: vec![kzt_rub()],
            outcome: Outcome::Compared(compare(rub(1000.0), rub(800.0)).unwrap()),
        }
    }

    /// A tenge page price worth 1500 RUB against a 1200 RUB Russian price.
    fn make_tenge_report() -> ComparisonReport {
        ComparisonReport {
            product: ProductRef::package("469"),
            reference_region: Region::Kz,
            compared_region: Region::Ru,
            reference_native: Money::new(7500.0, CurrencyCode::Kzt),
            reference_display: rub(1500.0),
            compared_native: RegionalPrice::Priced(rub(1200.0)),
            display_currency: CurrencyCode::Rub,
            rates: vec![kzt_rub()],
            outcome: Outcome::Compared(compare(rub(1500.0), rub(1200.0)).unwrap()),
        }
    }

    fn make_unavailable_report() -> ComparisonReport {
        ComparisonReport {
            compared_native: RegionalPrice::Unavailable,
            outcome: Outcome::Unavailable,
            ..make_tenge_report()
        }
    }

    fn make_free_report() -> ComparisonReport {
        ComparisonReport {
            compared_native: RegionalPrice::Free,
            outcome: Outcome::Free,
            ..make_ruble_report()
        }
    }

    /// Free in Russia, 5000 KZT (1000 RUB) in Kazakhstan.
    fn make_reference_free_report() -> ComparisonReport {
        ComparisonReport {
            reference_native: rub(0.0),
            reference_display: rub(0.0),
            compared_native: RegionalPrice::Priced(Money::new(5000.0, CurrencyCode::Kzt)),
            outcome: Outcome::ReferenceFree { compared: Some(rub(1000.0)) },
            ..make_ruble_report()
        }
    }

    // Annotation tests

    #[test]
    fn test_annotation_same_currency() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(formatter.annotation(&make_ruble_report()), "KZ: 800₽ (-20%)");
    }

    #[test]
    fn test_annotation_more_expensive() {
        let mut report = make_ruble_report();
        report.outcome = Outcome::Compared(compare(rub(1000.0), rub(1100.0)).unwrap());

        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(formatter.annotation(&report), "KZ: 1100₽ (+10%)");
    }

    #[test]
    fn test_annotation_converted_reference() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(
            formatter.annotation(&make_tenge_report()),
            "≈ 1500₽ | RU: 1200₽ (cheaper by 20%)"
        );
    }

    #[test]
    fn test_annotation_below_layout() {
        let formatter =
            Formatter::new(OutputFormat::Annotation).with_layout(AnnotationLayout::Below);
        assert_eq!(
            formatter.annotation(&make_tenge_report()),
            "≈ 1500₽\nRU: 1200₽ (cheaper by 20%)"
        );
    }

    #[test]
    fn test_annotation_unavailable() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(
            formatter.annotation(&make_unavailable_report()),
            "≈ 1500₽ | (RU price unavailable)"
        );
    }

    #[test]
    fn test_annotation_free() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(formatter.annotation(&make_free_report()), "KZ: free");
    }

    #[test]
    fn test_annotation_reference_free_shows_compared_price() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        let output = formatter.annotation(&make_reference_free_report());

        assert_eq!(output, "RU: free | KZ: 1000₽");
        assert!(!output.contains("KZ: free"));
    }

    #[test]
    fn test_annotation_reference_free_compared_unavailable() {
        let mut report = make_reference_free_report();
        report.compared_native = RegionalPrice::Unavailable;
        report.outcome = Outcome::ReferenceFree { compared: None };

        let formatter = Formatter::new(OutputFormat::Annotation);
        assert_eq!(formatter.annotation(&report), "RU: free | (KZ price unavailable)");
    }

    #[test]
    fn test_table_reference_free() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_report(&make_reference_free_report());

        assert!(output.contains("RU:        Free"));
        assert!(output.contains("KZ:        5000.00 KZT (≈ 1000₽)"));
        assert!(output.contains("Verdict:   free in RU"));

        let list = formatter.format_reports(&[make_reference_free_report()]);
        assert!(list.contains("RU free"));
        assert!(list.contains("KZ 1000₽"));
        assert!(list.contains("reference free"));
    }

    #[test]
    fn test_json_reference_free_status() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_report(&make_reference_free_report());
        assert!(output.contains(r#""status": "reference_free""#));
    }

    #[test]
    fn test_annotation_multiple_prefixed() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        let output = formatter.format_reports(&[make_ruble_report(), make_tenge_report()]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "app/570: KZ: 800₽ (-20%)");
        assert!(lines[1].starts_with("sub/469: ≈ 1500₽"));
    }

    // JSON tests

    #[test]
    fn test_json_single_report() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_report(&make_ruble_report());

        assert!(output.contains(r#""status": "compared""#));
        assert!(output.contains(r#""percent_diff": 20"#));
        assert!(output.contains(r#""cheaper_side": "compared""#));
        assert!(output.contains(r#""compared_region": "kz""#));
    }

    #[test]
    fn test_json_round_trip() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_reports(&[make_tenge_report(), make_free_report()]);
        let parsed: Vec<ComparisonReport> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec![make_tenge_report(), make_free_report()]);
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_reports(&[]), "[]");
    }

    // Table tests

    #[test]
    fn test_table_single_report() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_report(&make_ruble_report());

        assert!(output.contains("Product:   app/570"));
        assert!(output.contains("RU:        1000.00 RUB (≈ 1000₽)"));
        assert!(output.contains("KZ:        4000.00 KZT (≈ 800₽)"));
        assert!(output.contains("Verdict:   KZ is cheaper by 20%"));
        assert!(output.contains("Rate:      1 KZT = 0.20000 RUB"));
    }

    #[test]
    fn test_table_single_unavailable() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_report(&make_unavailable_report());
        assert!(output.contains("RU:        N/A"));
        assert!(!output.contains("Verdict"));
    }

    #[test]
    fn test_table_multiple_reports() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_reports(&[
            make_ruble_report(),
            make_tenge_report(),
            make_unavailable_report(),
        ]);

        assert!(output.contains("Product"));
        assert!(output.contains("Reference"));
        assert!(output.contains("----------"));
        assert!(output.contains("app/570"));
        assert!(output.contains("KZ 800₽"));
        assert!(output.contains("-20%"));
        assert!(output.contains("unavailable"));
        assert!(output.contains("Total: 3 products"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_reports(&[]), "No products compared.");
    }

    // Markdown tests

    #[test]
    fn test_markdown_single_report() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_report(&make_tenge_report());

        assert!(output.contains("## sub/469"));
        assert!(output.contains("- **KZ:** 7500.00 KZT (≈ 1500₽)"));
        assert!(output.contains("- **RU:** 1200.00 RUB (≈ 1200₽)"));
        assert!(output.contains("- **Difference:** -20%"));
    }

    #[test]
    fn test_markdown_multiple_reports() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_reports(&[make_ruble_report(), make_free_report()]);

        assert!(output.contains("| Product | Reference | Compared | Difference |"));
        assert!(output.contains("| app/570 | RU 1000₽ | KZ 800₽ | -20% |"));
        assert!(output.contains("KZ free"));
        assert!(output.contains("*2 products compared*"));
    }

    // CSV tests

    #[test]
    fn test_csv_reports() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_reports(&[make_ruble_report(), make_unavailable_report()]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("product,reference_region"));
        assert_eq!(lines[1], "app/570,ru,1000,RUB,1000,kz,priced,4000,KZT,800,RUB,20,compared");
        assert_eq!(lines[2], "sub/469,kz,7500,KZT,1500,ru,unavailable,,,,RUB,,");
    }

    #[test]
    fn test_csv_empty() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_reports(&[]), formatter.csv_header());
    }

    // Regional price listing tests

    fn regional_prices() -> Vec<(Region, RegionalPrice)> {
        vec![
            (Region::Ru, RegionalPrice::Priced(rub(1000.0))),
            (Region::Kz, RegionalPrice::Priced(Money::new(4000.0, CurrencyCode::Kzt))),
            (Region::Us, RegionalPrice::Unavailable),
        ]
    }

    #[test]
    fn test_regional_prices_annotation() {
        let formatter = Formatter::new(OutputFormat::Annotation);
        let output = formatter.format_regional_prices(&ProductRef::app("570"), &regional_prices());
        assert_eq!(output, "RU: 1000₽ | KZ: 4000₸ | US: unavailable");
    }

    #[test]
    fn test_regional_prices_table() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_regional_prices(&ProductRef::app("570"), &regional_prices());
        assert!(output.contains("Product: app/570"));
        assert!(output.contains("4000.00 KZT"));
        assert!(output.contains("Kazakhstan"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_regional_prices_json() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_regional_prices(&ProductRef::app("570"), &regional_prices());
        let rows: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["region"], "kz");
        assert_eq!(rows[1]["status"], "priced");
        assert_eq!(rows[1]["amount"], 4000.0);
        assert_eq!(rows[2]["status"], "unavailable");
    }

    #[test]
    fn test_regional_prices_csv() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_regional_prices(&ProductRef::app("570"), &regional_prices());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "product,region,status,amount,currency");
        assert_eq!(lines[2], "app/570,kz,priced,4000,KZT");
        assert_eq!(lines[3], "app/570,us,unavailable,,");
    }
}
