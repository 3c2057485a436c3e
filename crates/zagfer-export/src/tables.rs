//! Ready-made column sets for the standard CSV reports.

use zagfer_storage::models::{HistoryRecord, Tool, User};

use crate::csv::Column;

/// Suggested filename for the history report.
pub const HISTORY_FILENAME: &str = "ZAGFER_Historico_Cautelas.csv";

/// Suggested filename for the tool catalog report.
pub const TOOLS_FILENAME: &str = "ZAGFER_Ferramentas.csv";

/// Suggested filename for the user roster report.
pub const USERS_FILENAME: &str = "ZAGFER_Usuarios.csv";

/// Columns for the transaction history report.
pub fn history_columns() -> Vec<Column<HistoryRecord>> {
    vec![
        Column::new("ID", |h: &HistoryRecord| Some(h.id.clone())),
        Column::new("Data/Hora", |h: &HistoryRecord| {
            Some(h.timestamp.format("%d/%m/%Y %H:%M:%S").to_string())
        }),
        Column::new("Tipo", |h: &HistoryRecord| {
            Some(h.action_type.display_name().to_string())
        }),
        Column::new("Responsável", |h: &HistoryRecord| {
            Some(h.responsible_name.clone())
        }),
        Column::new("Matrícula Resp.", |h: &HistoryRecord| {
            Some(h.responsible_matricula.clone())
        }),
        Column::new("Despachante", |h: &HistoryRecord| {
            Some(h.dispatcher_name.clone())
        }),
        Column::new("Ferramentas", |h: &HistoryRecord| {
            Some(h.tools_summary.clone())
        }),
        Column::new("Previsão Devolução", |h: &HistoryRecord| {
            h.expected_return_date
                .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        }),
    ]
}

/// Columns for the tool catalog report.
pub fn tool_columns() -> Vec<Column<Tool>> {
    vec![
        Column::new("ID", |t: &Tool| Some(t.id.clone())),
        Column::new("Nome", |t: &Tool| Some(t.name.clone())),
        Column::new("Categoria", |t: &Tool| Some(t.category.clone())),
        Column::new("Tamanho", |t: &Tool| t.size.clone()),
        Column::new("Setor", |t: &Tool| Some(t.sector.clone())),
        Column::new("BMP", |t: &Tool| t.bmp.clone()),
        Column::new("Status", |t: &Tool| {
            Some(t.status.display_name().to_string())
        }),
    ]
}

/// Columns for the user roster report.
pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("ID", |u: &User| Some(u.id.clone())),
        Column::new("Nome", |u: &User| Some(u.name.clone())),
        Column::new("Matrícula", |u: &User| Some(u.matricula.clone())),
        Column::new("Status", |u: &User| {
            Some(if u.active { "Ativo" } else { "Inativo" }.to_string())
        }),
        Column::new("Permissão", |u: &User| {
            Some(u.role.display_name().to_string())
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::export_table;
    use zagfer_storage::models::Role;

    #[test]
    fn user_report_renders_roster_labels() {
        let mut user = User::new("u1", "Ana Lima", "1001", Role::Admin);
        user.active = false;

        let out = String::from_utf8(export_table(&[user], &user_columns())).unwrap();
        assert!(out.contains("\"Inativo\""));
        assert!(out.contains("\"Administrador\""));
    }

    #[test]
    fn tool_report_includes_status_label() {
        let tool = Tool::new("t1", "Serra", "Manual", "Almoxarifado A");
        let out = String::from_utf8(export_table(&[tool], &tool_columns())).unwrap();
        assert!(out.contains("\"Disponível\""));
        // Absent size and BMP render as empty fields.
        assert!(out.contains("\"Serra\",\"Manual\",\"\",\"Almoxarifado A\",\"\""));
    }
}
