//! Terminal rendering of patient records.

use std::io::{self, BufRead, Write};

use pacientes_persistence::types::PatientRecord;

const HEADERS: [&str; 8] = [
    "ID",
    "NOMBRE",
    "APELLIDO",
    "PESO (kg)",
    "TALLA (m)",
    "IMC",
    "DIAGNOSTICO",
    "FECHA",
];

/// Longest diagnosis shown in a table cell before truncation.
const DIAGNOSTICO_WIDTH: usize = 40;

/// Body mass index: weight over height squared.
pub fn bmi(record: &PatientRecord) -> f64 {
    record.peso / (record.talla * record.talla)
}

fn cells(record: &PatientRecord) -> [String; 8] {
    [
        record.id.to_string(),
        record.nombre.clone(),
        record.apellido.clone(),
        format!("{}", record.peso),
        format!("{}", record.talla),
        format!("{:.2}", bmi(record)),
        truncate(&record.diagnostico, DIAGNOSTICO_WIDTH),
        record.fecha_registro.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

/// Renders `records` as an aligned table followed by the total.
pub fn render_table(records: &[PatientRecord]) -> String {
    if records.is_empty() {
        return "No patients registered.\n".to_string();
    }

    let rows: Vec<[String; 8]> = records.iter().map(cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    push_row(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in rows {
        push_row(&mut out, row.into_iter(), &widths);
    }
    out.push_str(&format!("\nTotal: {}\n", records.len()));
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Renders one record as labelled lines.
pub fn render_record(record: &PatientRecord) -> String {
    format!(
        "ID:          {}\n\
         Nombre:      {}\n\
         Apellido:    {}\n\
         Peso:        {} kg\n\
         Talla:       {} m\n\
         IMC:         {:.2}\n\
         Diagnostico: {}\n\
         Registrado:  {}\n",
        record.id,
        record.nombre,
        record.apellido,
        record.peso,
        record.talla,
        bmi(record),
        record.diagnostico,
        record.fecha_registro.to_rfc3339(),
    )
}

/// Asks a yes/no question; anything but `y` or `yes` means no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// The confirmation question asked before deleting `record`.
pub fn delete_prompt(record: &PatientRecord) -> String {
    format!(
        "Delete patient \"{}\"? This cannot be undone.",
        record.full_name()
    )
}
