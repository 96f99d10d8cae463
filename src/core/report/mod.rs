//! Tabular reports
//!
//! Produces the control sheet data; turning it into a spreadsheet file is
//! left to the caller.

pub mod sheet;

pub use sheet::{
    build_control_sheet, exam_cell, last_completed_date, ControlSheet, SheetRow, SheetSummary,
    FIXED_HEADERS,
};

use chrono::{DateTime, Utc};

/// `dd/mm/yyyy`, the date format of every report
pub fn format_date_br(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{at, employee, exam, patient};
    use crate::domain::{ExamStatus, ExamType, Sector};

    #[test]
    fn test_format_date_br() {
        assert_eq!(format_date_br(at(2024, 3, 5)), "05/03/2024");
    }

    #[test]
    fn test_cells_follow_status() {
        let ok = exam("e1", ExamType::Ecg, ExamStatus::Completed, at(2024, 2, 10));
        let expired = exam("e1", ExamType::Ecg, ExamStatus::Expired, at(2022, 1, 31));
        let scheduled = exam("e1", ExamType::Ecg, ExamStatus::Scheduled, at(2024, 7, 1));
        let pending = exam("e1", ExamType::Ecg, ExamStatus::Pending, at(2024, 7, 1));
        let cancelled = exam("e1", ExamType::Ecg, ExamStatus::Cancelled, at(2024, 7, 1));

        assert_eq!(exam_cell(Some(&ok)), "Ok - 10/02/2024");
        assert_eq!(exam_cell(Some(&expired)), "Vencido - 31/01/2023");
        assert_eq!(exam_cell(Some(&scheduled)), "Agendado - 01/07/2024");
        assert_eq!(exam_cell(Some(&pending)), "Pendente");
        assert_eq!(exam_cell(Some(&cancelled)), "Pendente");
        assert_eq!(exam_cell(None), "-");
    }

    #[test]
    fn test_sheet_rows_and_summary() {
        let ana = employee("e1", "ANA PAULA COSTA", Sector::Smt);
        let bruno = employee("e2", "BRUNO ALVES", Sector::Mod);
        let exams = vec![
            exam("e1", ExamType::Audiometria, ExamStatus::Completed, at(2024, 1, 10)),
            exam("e1", ExamType::Audiometria, ExamStatus::Pending, at(2024, 5, 1)),
            exam("e1", ExamType::Hemograma, ExamStatus::Completed, at(2024, 4, 2)),
            exam("e2", ExamType::Ecg, ExamStatus::Expired, at(2022, 6, 1)),
            exam("other", ExamType::Ecg, ExamStatus::Completed, at(2024, 1, 1)),
        ];

        let sheet = build_control_sheet(&[&ana, &bruno], &exams);

        assert_eq!(sheet.rows.len(), 2);
        let row = &sheet.rows[0];
        assert_eq!(row.sector, "SMT");
        assert_eq!(row.admission_date, "01/03/2019");
        assert_eq!(row.last_exam_date, "02/04/2024");
        assert_eq!(row.cells.len(), ExamType::ALL.len());
        assert_eq!(row.cells[0], "Ok - 10/01/2024");
        assert_eq!(row.cells[5], "Ok - 02/04/2024");
        assert_eq!(row.cells[1], "-");
        assert_eq!(row.to_record().len(), ControlSheet::headers().len());

        assert_eq!(sheet.rows[1].last_exam_date, "-");
        assert_eq!(sheet.rows[1].cells[9], "Vencido - 01/06/2023");

        assert_eq!(
            sheet.summary,
            SheetSummary {
                total_subjects: 2,
                total_exams: 4,
                ok: 2,
                expired: 1,
                pending: 1,
                scheduled: 0,
            }
        );
    }

    #[test]
    fn test_patient_rows_leave_employee_columns_blank() {
        let maria = patient("p1", "MARIA SOUZA");
        let sheet = build_control_sheet(&[&maria], &[]);
        assert_eq!(sheet.rows[0].registration, "");
        assert_eq!(sheet.rows[0].sector, "");
        assert!(sheet.rows[0].cells.iter().all(|c| c == "-"));
    }
}
