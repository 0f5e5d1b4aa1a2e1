//! Output formatting for the CLI.

use catalog_core::catalog::Product;
use catalog_core::search::Pagination;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// One listing row per product. `marker` flags rows such as "in cart".
    pub fn product_rows<'a>(
        &self,
        products: impl IntoIterator<Item = (usize, &'a Product)>,
        marker: impl Fn(&Product) -> Option<&'static str>,
    ) {
        const WIDTHS: [usize; 6] = [4, 6, 28, 16, 16, 9];
        self.table_row(&["#", "ID", "NAME", "LABEL", "PRICE", "WEIGHT"], &WIDTHS);
        for (position, product) in products {
            let weight = format!("{} g", product.weight);
            let name = truncate(&product.name, WIDTHS[2]);
            let row = [
                position.to_string(),
                product.id.to_string(),
                name,
                truncate(&product.label(), WIDTHS[3]),
                product.display_price(),
                weight,
            ];
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &WIDTHS);

            let mut flags = Vec::new();
            if !product.in_stock {
                flags.push(style("out of stock").red().to_string());
            }
            if let Some(mark) = marker(product) {
                flags.push(style(mark).cyan().to_string());
            }
            if !flags.is_empty() && !self.json {
                println!("        {}", flags.join(" "));
            }
        }
    }

    /// Print a product's QR code under its row.
    ///
    /// A value the encoder rejects is reported and skipped so the rest of
    /// the listing still prints.
    pub fn product_qr(&self, product: &Product) {
        if self.json {
            return;
        }
        let value = product.qr_value();
        match render_qr(&value) {
            Ok(code) => {
                for line in code.lines() {
                    println!("      {}", line);
                }
                println!("      {}", style(value).dim());
            }
            Err(e) => self.warn(&format!("No QR code for {}: {}", value, e)),
        }
    }

    /// "Page X of Y" footer with nearby page numbers.
    pub fn pagination(&self, info: &Pagination) {
        if self.json {
            return;
        }
        if info.total_pages == 0 {
            println!("\n  {}", style("No pages").dim());
            return;
        }
        let pages: Vec<String> = info
            .page_numbers(5)
            .into_iter()
            .map(|n| {
                if n == info.page {
                    style(format!("[{}]", n)).bold().to_string()
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!(
            "\n  {} {}  {}  {}",
            if info.has_prev { "‹" } else { " " },
            pages.join(" "),
            if info.has_next { "›" } else { " " },
            style(format!("Page {} of {}", info.page, info.total_pages)).dim()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Render `value` as a QR code drawn with half-block characters.
pub fn render_qr(value: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(value.as_bytes())?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// Cut `text` to at most `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
