//! Excel export functionality.

use crate::models::attendance::AttendanceRecord;
use crate::models::department::Department;
use crate::models::stats::EmployeeStatsSummary;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::Path;

/// One employee's line in a summary report.
#[derive(Debug, Clone)]
pub struct EmployeeSummaryRow {
    pub employee_no: String,
    pub employee_name: String,
    pub department: Department,
    pub stats: EmployeeStatsSummary,
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Export one date's attendance records to an Excel day sheet.
pub fn export_day_sheet(records: &[AttendanceRecord], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Attendance")?;

    let header_format = header_format();
    let hours_format = Format::new().set_num_format("0.00");

    let headers = [
        "Employee No",
        "Name",
        "Department",
        "Date",
        "Entry",
        "Exit",
        "Hours",
        "Status",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_column_width(0, 12)?; // Employee No
    worksheet.set_column_width(1, 30)?; // Name
    worksheet.set_column_width(2, 20)?; // Department
    worksheet.set_column_width(3, 12)?; // Date
    worksheet.set_column_width(4, 10)?; // Entry
    worksheet.set_column_width(5, 10)?; // Exit
    worksheet.set_column_width(6, 10)?; // Hours
    worksheet.set_column_width(7, 18)?; // Status

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.employee_no)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, record.department.to_string())?;
        worksheet.write_string(row, 3, record.date.to_string())?;
        worksheet.write_string(row, 4, record.entry.map(|t| t.format_12h()).unwrap_or_default())?;
        worksheet.write_string(row, 5, record.exit.map(|t| t.format_12h()).unwrap_or_default())?;
        worksheet.write_number_with_format(row, 6, record.total_hours, &hours_format)?;
        worksheet.write_string(row, 7, record.status.label())?;
    }

    if !records.is_empty() {
        let last_row = records.len() as u32;
        worksheet.autofilter(0, 0, last_row, 7)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export per-employee summaries plus an overall statistics sheet.
pub fn export_summary_report(
    rows: &[EmployeeSummaryRow],
    from: NaiveDate,
    to: NaiveDate,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    write_summaries_sheet(&mut workbook, rows)?;
    write_overall_sheet(&mut workbook, rows, from, to)?;

    workbook.save(path)?;
    Ok(())
}

fn write_summaries_sheet(workbook: &mut Workbook, rows: &[EmployeeSummaryRow]) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Employee Summaries")?;

    let header_format = header_format();
    let hours_format = Format::new().set_num_format("0.0");

    let headers = [
        "Employee Name",
        "Employee No",
        "Department",
        "Present Days",
        "Total Working Hours",
        "Average Daily Hours",
        "Late Entries",
        "Early Exits",
        "Shortfall Hours",
        "Overtime Hours",
        "Sunday Overtime",
        "Regular Overtime",
        "Sundays Worked",
        "Perfect Attendance Days",
        "Longest Overtime Day",
        "Most Frequent Status",
        "First Attendance",
        "Last Attendance",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_column_width(0, 30)?; // Employee Name
    worksheet.set_column_width(2, 20)?; // Department
    worksheet.set_column_width(14, 20)?; // Longest Overtime Day
    worksheet.set_column_width(15, 18)?; // Most Frequent Status

    for (idx, row_data) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        let stats = &row_data.stats;

        worksheet.write_string(row, 0, &row_data.employee_name)?;
        worksheet.write_string(row, 1, &row_data.employee_no)?;
        worksheet.write_string(row, 2, row_data.department.to_string())?;
        worksheet.write_number(row, 3, stats.total_present as f64)?;
        worksheet.write_number_with_format(row, 4, stats.total_working_hours, &hours_format)?;
        worksheet.write_number_with_format(row, 5, stats.average_daily_hours, &hours_format)?;
        worksheet.write_number(row, 6, stats.late_entries as f64)?;
        worksheet.write_number(row, 7, stats.early_exits as f64)?;
        worksheet.write_number_with_format(row, 8, stats.shortfall_hours, &hours_format)?;
        worksheet.write_number_with_format(row, 9, stats.overtime_hours, &hours_format)?;
        worksheet.write_number_with_format(row, 10, stats.sunday_overtime_hours, &hours_format)?;
        worksheet.write_number_with_format(row, 11, stats.regular_overtime_hours, &hours_format)?;
        worksheet.write_number(row, 12, stats.sundays_worked as f64)?;
        worksheet.write_number(row, 13, stats.perfect_attendance_days as f64)?;

        let longest = stats
            .longest_overtime_day
            .map(|day| format!("{} ({:.1} h)", day.date, day.hours))
            .unwrap_or_else(|| "N/A".to_string());
        worksheet.write_string(row, 14, longest)?;

        let frequent = stats
            .most_frequent_status
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        worksheet.write_string(row, 15, frequent)?;

        worksheet.write_string(
            row,
            16,
            stats
                .first_attendance_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        )?;
        worksheet.write_string(
            row,
            17,
            stats
                .last_attendance_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        )?;
    }

    if !rows.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, 17)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_overall_sheet(
    workbook: &mut Workbook,
    rows: &[EmployeeSummaryRow],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Overall Statistics")?;

    let header_format = header_format();
    worksheet.write_string_with_format(0, 0, "Metric", &header_format)?;
    worksheet.write_string_with_format(0, 1, "Value", &header_format)?;
    worksheet.set_column_width(0, 34)?;
    worksheet.set_column_width(1, 24)?;

    let employees = rows.len();
    let total_hours: f64 = rows.iter().map(|r| r.stats.total_working_hours).sum();
    let total_overtime: f64 = rows.iter().map(|r| r.stats.overtime_hours).sum();
    let total_shortfall: f64 = rows.iter().map(|r| r.stats.shortfall_hours).sum();
    let late_entries: usize = rows.iter().map(|r| r.stats.late_entries).sum();
    let early_exits: usize = rows.iter().map(|r| r.stats.early_exits).sum();

    let metrics: [(&str, String); 7] = [
        ("Date Range", format!("{from} to {to}")),
        ("Total Employees", employees.to_string()),
        ("Total Working Hours", format!("{total_hours:.1}")),
        ("Total Overtime Hours", format!("{total_overtime:.1}")),
        ("Total Shortfall Hours", format!("{total_shortfall:.1}")),
        ("Total Late Entries", late_entries.to_string()),
        ("Total Early Exits", early_exits.to_string()),
    ];

    for (idx, (metric, value)) in metrics.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, *metric)?;
        worksheet.write_string(row, 1, value)?;
    }

    Ok(())
}
