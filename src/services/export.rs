//! CSV export of dashboard rows

use crate::model::Lead;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct LeadRecord<'a> {
    id: i64,
    clinic_name: &'a str,
    email: &'a str,
    website: &'a str,
    contact: &'a str,
    status: &'a str,
    follow_up_count: u32,
    last_contacted: &'a str,
}

impl<'a> From<&'a Lead> for LeadRecord<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            id: lead.id,
            clinic_name: lead.clinic_name.as_deref().unwrap_or_default(),
            email: lead.email.as_deref().unwrap_or_default(),
            website: lead.website.as_deref().unwrap_or_default(),
            contact: lead.name.as_deref().unwrap_or_default(),
            status: lead.status.as_str(),
            follow_up_count: lead.follow_ups(),
            last_contacted: lead.last_contacted.as_deref().unwrap_or_default(),
        }
    }
}

const HEADER: [&str; 8] = [
    "id",
    "clinic_name",
    "email",
    "website",
    "contact",
    "status",
    "follow_up_count",
    "last_contacted",
];

/// Write `leads` to `<dir>/leads-<timestamp>.csv` and return the file path
///
/// The header is written even when `leads` is empty. An existing export is
/// never overwritten; a numeric suffix is added instead.
pub fn export_leads(leads: &[&Lead], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let stamp = Local::now().format("%Y%m%d-%H%M%S%3f").to_string();
    let (file, path) = create_unique(dir, &stamp)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(HEADER)?;
    for lead in leads {
        writer.serialize(LeadRecord::from(*lead))?;
    }
    writer.flush()?;

    Ok(path)
}

fn create_unique(dir: &Path, stamp: &str) -> Result<(File, PathBuf)> {
    for attempt in 0u32.. {
        let file_name = match attempt {
            0 => format!("leads-{}.csv", stamp),
            n => format!("leads-{}-{}.csv", stamp, n),
        };
        let path = dir.join(file_name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        }
    }
    anyhow::bail!("No free export file name in {}", dir.display())
}
