//! Plaintext checkout and return vouchers.
//!
//! Mirrors the printed voucher handed over at the counter: operation
//! details, responsible parties, the tool table and a closing line. PDF
//! rendering is a presentation concern left to the caller; this module
//! only produces the structured content.

use chrono::{DateTime, Utc};
use serde::Serialize;
use zagfer_storage::models::{HistoryRecord, Tool};

const FOOTER: &str = "Documento gerado automaticamente pelo sistema ZAGFER.";

/// One row of the voucher's tool table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptRow {
    /// Tool name, with the size appended in parentheses when present
    pub name: String,
    pub bmp: String,
    pub category: String,
    pub sector: String,
}

/// Structured voucher content for one history record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub action_label: String,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub responsible_name: String,
    pub responsible_matricula: String,
    pub dispatcher_name: String,
    pub rows: Vec<ReceiptRow>,
    /// Declaration or acknowledgement line under the table
    pub closing: String,
}

fn fmt_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// Build the voucher for `record`, with `tools` the catalog entries for
/// its tool ids. Tools missing from the slice are simply absent from the
/// table; the record itself stays authoritative for the summary.
pub fn render_receipt(record: &HistoryRecord, tools: &[Tool]) -> Receipt {
    let is_return = !record.is_checkout();

    let rows = record
        .tool_ids
        .iter()
        .filter_map(|id| tools.iter().find(|t| &t.id == id))
        .map(|tool| ReceiptRow {
            name: match &tool.size {
                Some(size) => format!("{} ({})", tool.name, size),
                None => tool.name.clone(),
            },
            bmp: tool.bmp.clone().unwrap_or_else(|| "-".to_string()),
            category: tool.category.clone(),
            sector: tool.sector.clone(),
        })
        .collect();

    let closing = if is_return {
        format!("Recebido pelo {}", record.dispatcher_name)
    } else {
        "O militar declara ter recebido as ferramentas em perfeito estado \
         e compromete-se a devolvê-las."
            .to_string()
    };

    Receipt {
        title: if is_return {
            "COMPROVANTE DE DEVOLUÇÃO".to_string()
        } else {
            "COMPROVANTE DE RETIRADA".to_string()
        },
        timestamp: record.timestamp,
        action_label: record.action_type.display_name().to_string(),
        expected_return_date: if is_return {
            None
        } else {
            record.expected_return_date
        },
        responsible_name: record.responsible_name.clone(),
        responsible_matricula: record.responsible_matricula.clone(),
        dispatcher_name: record.dispatcher_name.clone(),
        rows,
        closing,
    }
}

impl Receipt {
    /// The voucher as printable plaintext.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            self.title.clone(),
            String::new(),
            "Detalhes da Operação:".to_string(),
            format!("Data: {}", fmt_datetime(&self.timestamp)),
            format!("Tipo: {}", self.action_label),
        ];
        if let Some(deadline) = &self.expected_return_date {
            lines.push(format!("Previsão Devolução: {}", fmt_datetime(deadline)));
        }
        lines.push(String::new());
        lines.push("Responsáveis:".to_string());
        lines.push(format!("MILITAR: {}", self.responsible_name));
        lines.push(format!("OM/Seção: {}", self.responsible_matricula));
        lines.push(format!("Despachante: {}", self.dispatcher_name));
        lines.push(String::new());
        lines.push("Ferramenta | BMP | Categoria | Setor".to_string());
        for row in &self.rows {
            lines.push(format!(
                "{} | {} | {} | {}",
                row.name, row.bmp, row.category, row.sector
            ));
        }
        lines.push(String::new());
        lines.push(self.closing.clone());
        lines.push(String::new());
        lines.push(FOOTER.to_string());
        lines.join("\n")
    }
}
