//! Direct-contact links for an employee.

use retention_transform::EmployeeRecord;

/// `mailto:` link with a meeting-request subject.
pub fn mailto_link(email: &str, employee: &str) -> String {
    format!("mailto:{email}?subject={}%20면담%20요청", employee.replace(' ', "%20"))
}

pub fn tel_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// Contact links available for a record; `None` where the field is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactLinks {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactLinks {
    pub fn for_record(record: &EmployeeRecord, employee: &str) -> Self {
        Self {
            email: record
                .email
                .as_deref()
                .map(|email| mailto_link(email, employee)),
            phone: record.phone.as_deref().map(tel_link),
        }
    }
}
