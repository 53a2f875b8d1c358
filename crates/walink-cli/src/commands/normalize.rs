use crate::commands::print_json;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use walink_core::domain::{normalize_phone_str, whatsapp_link, NormalizedPhone};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw phone values, quoted as they appear in the export
    #[arg(required = true)]
    pub values: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NormalizeReport {
    raw: String,
    #[serde(flatten)]
    phone: NormalizedPhone,
    link: String,
}

pub fn normalize(json: bool, args: NormalizeArgs) -> Result<()> {
    let reports: Vec<NormalizeReport> = args
        .values
        .into_iter()
        .map(|raw| {
            let phone = normalize_phone_str(&raw);
            let link = whatsapp_link(&phone.digits);
            NormalizeReport { raw, phone, link }
        })
        .collect();

    if json {
        return print_json(&reports);
    }

    for report in reports {
        println!("{}", format_report(&report));
    }
    Ok(())
}

fn format_report(report: &NormalizeReport) -> String {
    let mut line = format!("{:?} ->", report.raw);
    if report.phone.is_empty() {
        line.push_str(" (no digits)");
    } else {
        line.push(' ');
        line.push_str(&report.phone.digits);
        line.push(' ');
        line.push_str(&report.link);
    }
    if let Some(note) = report.phone.note {
        line.push_str(&format!(" [{note}]"));
    }
    line
}
