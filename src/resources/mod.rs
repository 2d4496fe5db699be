//! Resources shared across the *arr applications
//!
//! Single request/response mappings with no iteration. Each application
//! client calls these with its own API version.

mod profile;
mod system;

pub use profile::{BaseQuality, Quality, QualityProfile, QualityRevision};
pub use system::{download_backup, download_backup_with_cancel, BackupFile, SystemStatus};

pub(crate) use profile::{
    add_quality_profile, delete_quality_profile, get_quality_profiles, update_quality_profile,
};
pub(crate) use system::{get_backup_files, get_system_status};
