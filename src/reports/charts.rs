//! Chart generation for the reports page.
//!
//! Charts are generated as ECharts JSON configuration and rendered client
//! side into HTML containers with a small initialization script.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{category_totals, month_label, monthly_totals},
    html::HeadElement,
    transaction::Transaction,
};

/// A report chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the report charts.
pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the report charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Pie chart of total spending per category. Income is not included.
pub(super) fn category_breakdown_chart(transactions: &[Transaction]) -> Chart {
    let data: Vec<(f64, &str)> = category_totals(transactions)
        .into_iter()
        .map(|(category, total)| (total, category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext("All transactions"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("55%")
                .data(data),
        )
}

/// Bar chart of income and expense totals per calendar month.
pub(super) fn monthly_totals_chart(transactions: &[Transaction]) -> Chart {
    let totals = monthly_totals(transactions);
    let months = totals.months();

    let labels: Vec<String> = months
        .iter()
        .map(|month| format!("{} {}", month_label(*month), month.year()))
        .collect();
    let income: Vec<f64> = months
        .iter()
        .map(|month| totals.income.get(month).copied().unwrap_or(0.0))
        .collect();
    let expenses: Vec<f64> = months
        .iter()
        .map(|month| totals.expenses.get(month).copied().unwrap_or(0.0))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Totals")
                .subtext("Income and expenses per month"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('fr-DZ', {
              style: 'currency',
              currency: 'DZD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
