use fundscope_core::LookupResult;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    result: &LookupResult,
    format: OutputFormat,
    pretty: bool,
    limit: usize,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(result, limit),
    }

    Ok(())
}

fn render_table(result: &LookupResult, limit: usize) {
    if !result.fund_name.is_empty() {
        println!("{} (as of {})", result.fund_name, result.as_of);
    } else {
        println!("as of {}", result.as_of);
    }

    let Some(holdings) = result.holdings.as_ref() else {
        return;
    };

    let shown = if limit == 0 {
        holdings.len()
    } else {
        holdings.len().min(limit)
    };

    println!(
        "{:<12} {:<48} {:>18} {:>18}",
        "CUSIP", "TITLE", "BALANCE", "VALUE (USD)"
    );
    for holding in &holdings[..shown] {
        println!(
            "{:<12} {:<48} {:>18.2} {:>18.2}",
            truncate(&holding.cusip, 12),
            truncate(&holding.title, 48),
            holding.balance,
            holding.value_usd
        );
    }

    if shown < holdings.len() {
        println!("... {} more (raise --limit to see all)", holdings.len() - shown);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
