use std::path::Path;

use crate::records::{read_records, ReadError, Record};

/// CSV export served by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Agencies,
    Contacts,
}

impl Resource {
    pub const ALL: [Self; 2] = [Self::Agencies, Self::Contacts];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Agencies => "agencies",
            Self::Contacts => "contacts",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Agencies => "Agencies",
            Self::Contacts => "Contacts",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Agencies => "agencies_agency_rows.csv",
            Self::Contacts => "contacts_contact_rows.csv",
        }
    }

    /// Error label returned to the API clients.
    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::Agencies => "Failed to read agencies",
            Self::Contacts => "Failed to read contacts",
        }
    }

    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Agencies => "/dashboard/agencies",
            Self::Contacts => "/dashboard/contacts",
        }
    }

    pub async fn read(self, data_dir: &Path) -> Result<Vec<Record>, ReadError> {
        read_records(&data_dir.join(self.file_name())).await
    }
}
